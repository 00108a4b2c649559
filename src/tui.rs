//! Formatting helpers shared by the terminal front-end.
//!
//! Everything here turns domain records into styled `ratatui` text. The
//! binary only lays these out, so the display rules (what to hide, what to
//! fall back to) are tested here without a terminal.
//!
//! # Features
//!
//! This module is only available when the `tui` feature is enabled.
//!
//! # Examples
//!
//! ```rust
//! use kisetsu::tui::{format_genres, format_score};
//!
//! assert_eq!(format_score(Some(8.71)).as_deref(), Some("★ 8.7"));
//! assert_eq!(format_score(None), None);
//!
//! let genres: Vec<String> = ["Action", "Comedy", "Drama", "Fantasy"].map(String::from).to_vec();
//! assert_eq!(format_genres(&genres, 3).as_deref(), Some("Action · Comedy · Drama +1 more"));
//! ```

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::types::{AiringStatus, AnimeDetail, AnimeSummary, Episode};

/// Synopsis fallback on listing cards.
pub const CARD_SYNOPSIS_FALLBACK: &str = "No synopsis available.";

/// Synopsis fallback on the detail page.
pub const DETAIL_SYNOPSIS_FALLBACK: &str = "No synopsis available";

/// Genres shown on a card before collapsing into "+N more".
pub const CARD_GENRE_LIMIT: usize = 3;

/// Color of the status badge. Currently Airing is highlighted.
pub fn status_color(status: &AiringStatus) -> Color {
    match status {
        AiringStatus::CurrentlyAiring => Color::Green,
        AiringStatus::NotYetAired => Color::Yellow,
        AiringStatus::FinishedAiring | AiringStatus::Other(_) => Color::Gray,
    }
}

/// Status badge span, e.g. `[Currently Airing]`.
pub fn format_status_badge(status: &AiringStatus) -> Span<'static> {
    let mut style = Style::default().fg(status_color(status));
    if status.is_airing() {
        style = style.add_modifier(Modifier::BOLD);
    }
    Span::styled(format!("[{}]", status), style)
}

/// Score badge text with one decimal, absent when there is no score.
pub fn format_score(score: Option<f64>) -> Option<String> {
    score.map(|s| format!("★ {:.1}", s))
}

/// First `limit` genres plus a "+N more" suffix. Absent when there are none.
pub fn format_genres(genres: &[String], limit: usize) -> Option<String> {
    if genres.is_empty() {
        return None;
    }

    let shown = genres
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" · ");

    if genres.len() > limit {
        Some(format!("{} +{} more", shown, genres.len() - limit))
    } else {
        Some(shown)
    }
}

/// Title line of a listing card: title, status badge and optional score.
pub fn format_card_title(anime: &AnimeSummary) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            anime.display_title().to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        format_status_badge(&anime.status),
    ];

    if let Some(score) = format_score(anime.score) {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(score, Style::default().fg(Color::Yellow)));
    }

    Line::from(spans)
}

/// Secondary line of a listing card: aired string and genres, each only if present.
pub fn format_card_meta(anime: &AnimeSummary) -> Line<'static> {
    let mut spans = Vec::new();

    if !anime.aired.trim().is_empty() {
        spans.push(Span::styled(
            anime.aired.clone(),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(genres) = format_genres(&anime.genres, CARD_GENRE_LIMIT) {
        if !spans.is_empty() {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(genres, Style::default().fg(Color::Magenta)));
    }

    Line::from(spans)
}

/// Word-wraps a synopsis, substituting `fallback` when it is absent or blank.
///
/// ```rust
/// use kisetsu::tui::{format_synopsis, CARD_SYNOPSIS_FALLBACK};
///
/// let lines = format_synopsis(None, 40, CARD_SYNOPSIS_FALLBACK);
/// assert_eq!(lines.len(), 1);
/// ```
pub fn format_synopsis(synopsis: Option<&str>, width: usize, fallback: &str) -> Vec<Line<'static>> {
    let text = match synopsis.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => {
            return vec![Line::from(Span::styled(
                fallback.to_string(),
                Style::default().fg(Color::DarkGray),
            ))];
        }
    };

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if !current.is_empty() && current.chars().count() + word.chars().count() + 1 > width {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(Line::from(current));
    }
    lines
}

/// Formats an ISO 8601 broadcast timestamp as a short date, e.g. `7/6/2025`.
///
/// Unparseable input keeps its date part.
///
/// ```rust
/// use kisetsu::tui::format_aired_date;
///
/// assert_eq!(format_aired_date("2025-07-06T00:00:00+00:00"), "7/6/2025");
/// assert_eq!(format_aired_date("2025-07-06"), "7/6/2025");
/// assert_eq!(format_aired_date("sometime"), "sometime");
/// ```
pub fn format_aired_date(aired: &str) -> String {
    let date = chrono::DateTime::parse_from_rfc3339(aired)
        .map(|dt| dt.date_naive())
        .or_else(|_| {
            let prefix = aired.split('T').next().unwrap_or(aired);
            chrono::NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
        });

    match date {
        Ok(date) => date.format("%-m/%-d/%Y").to_string(),
        Err(_) => aired.split('T').next().unwrap_or(aired).to_string(),
    }
}

/// Stats row of the detail page. Each entry appears only when its data is present.
pub fn format_detail_stats(detail: &AnimeDetail) -> Vec<String> {
    let mut stats = Vec::new();

    if let Some(count) = detail.episode_count {
        stats.push(format!("{} Episodes", count));
    }
    match &detail.summary.status {
        AiringStatus::Other(text) if text.trim().is_empty() => {}
        status => stats.push(status.to_string()),
    }
    if !detail.summary.aired.trim().is_empty() {
        stats.push(detail.summary.aired.clone());
    }
    if let Some(score) = format_score(detail.summary.score) {
        stats.push(score);
    }
    if !detail.studios.is_empty() {
        stats.push(detail.studios.join(", "));
    }

    stats
}

/// One row of the episode grid: number, title, optional score, date and tags.
pub fn format_episode_line(episode: &Episode) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("Episode {}", episode.number),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(episode.title.clone(), Style::default().fg(Color::White)),
    ];

    if let Some(score) = format_score(episode.score) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(score, Style::default().fg(Color::Yellow)));
    }
    if let Some(aired) = &episode.aired {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format_aired_date(aired),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if episode.is_filler {
        spans.push(Span::raw(" "));
        spans.push(Span::styled("[Filler]", Style::default().fg(Color::LightRed)));
    }
    if episode.is_recap {
        spans.push(Span::raw(" "));
        spans.push(Span::styled("[Recap]", Style::default().fg(Color::LightBlue)));
    }

    Line::from(spans)
}

/// Creates a styled status message for TUI display.
///
/// ```rust
/// use kisetsu::tui::create_status_message;
/// use ratatui::style::Color;
///
/// let message = create_status_message("Loaded", "61 series", Color::Green);
/// ```
pub fn create_status_message(prefix: &str, message: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{}:", prefix),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(message.to_string(), Style::default().fg(color)),
    ])
}

pub fn success_message(message: &str) -> Line<'static> {
    create_status_message("Success", message, Color::Green)
}

pub fn warning_message(message: &str) -> Line<'static> {
    create_status_message("Warning", message, Color::Yellow)
}

pub fn error_message(message: &str) -> Line<'static> {
    create_status_message("Error", message, Color::Red)
}

pub fn info_message(message: &str) -> Line<'static> {
    create_status_message("Info", message, Color::Blue)
}

/// Truncates text to at most `width` characters, ending in "..." when cut.
///
/// ```rust
/// use kisetsu::tui::truncate_text;
///
/// assert_eq!(truncate_text("Kusuriya no Hitorigoto", 10), "Kusuriy...");
/// ```
pub fn truncate_text(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else if width > 3 {
        let kept: String = text.chars().take(width - 3).collect();
        format!("{}...", kept)
    } else {
        text.chars().take(width).collect()
    }
}
