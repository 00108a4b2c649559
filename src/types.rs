//! Core data types for seasonal listings, anime details and episodes.
//!
//! This module defines the domain records every page works with:
//!
//! - [`AnimeSummary`] - One card in a seasonal listing
//! - [`AnimeDetail`] - The full record shown on the detail page
//! - [`Episode`] - One entry of an episode listing
//! - [`AiringStatus`] - Broadcast state of a series
//! - [`Season`] - Quarter of the broadcast year
//!
//! These are decoupled from the Jikan wire format. See
//! [`sources::jikan`](crate::sources::jikan) for the mapping.
//!
//! # Examples
//!
//! ```rust
//! use kisetsu::types::*;
//!
//! let anime = AnimeSummary {
//!     id: 52991,
//!     title: "Sousou no Frieren".to_string(),
//!     title_english: Some("Frieren: Beyond Journey's End".to_string()),
//!     image_url: "https://cdn.myanimelist.net/images/anime/1015/138006.jpg".to_string(),
//!     synopsis: None,
//!     status: AiringStatus::FinishedAiring,
//!     aired: "Sep 29, 2023 to Mar 22, 2024".to_string(),
//!     genres: vec!["Adventure".to_string(), "Drama".to_string()],
//!     score: Some(9.3),
//! };
//!
//! assert_eq!(anime.display_title(), "Frieren: Beyond Journey's End");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// One entry of a seasonal listing.
///
/// `id` is the MyAnimeList id and is unique within a listing. It is the
/// handle the list page passes to the detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeSummary {
    /// MyAnimeList id
    pub id: u32,
    /// Default (usually romanized) title
    pub title: String,
    /// English title, when one is published
    pub title_english: Option<String>,
    /// Poster image URL (jpg variant)
    pub image_url: String,
    pub synopsis: Option<String>,
    pub status: AiringStatus,
    /// Human readable aired range, e.g. "Jul 6, 2025 to ?"
    pub aired: String,
    /// Genre names in API order
    pub genres: Vec<String>,
    /// Community score on a 0-10 scale
    pub score: Option<f64>,
}

impl AnimeSummary {
    /// Title shown on cards and headers.
    ///
    /// Prefers the English title and falls back to the default title.
    ///
    /// ```rust
    /// # use kisetsu::types::*;
    /// # let mut anime = AnimeSummary {
    /// #     id: 1, title: "Kimetsu no Yaiba".into(), title_english: None,
    /// #     image_url: String::new(), synopsis: None, status: AiringStatus::FinishedAiring,
    /// #     aired: String::new(), genres: vec![], score: None,
    /// # };
    /// assert_eq!(anime.display_title(), "Kimetsu no Yaiba");
    /// anime.title_english = Some("".into());
    /// assert_eq!(anime.display_title(), "Kimetsu no Yaiba");
    /// ```
    pub fn display_title(&self) -> &str {
        match self.title_english.as_deref() {
            Some(english) if !english.trim().is_empty() => english,
            _ => &self.title,
        }
    }
}

/// Broadcast state of a series.
///
/// Jikan reports it as free text. Unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiringStatus {
    CurrentlyAiring,
    FinishedAiring,
    NotYetAired,
    Other(String),
}

impl AiringStatus {
    /// Whether this is the highlighted "Currently Airing" state.
    pub fn is_airing(&self) -> bool {
        matches!(self, AiringStatus::CurrentlyAiring)
    }
}

impl From<&str> for AiringStatus {
    fn from(value: &str) -> Self {
        match value {
            "Currently Airing" => AiringStatus::CurrentlyAiring,
            "Finished Airing" => AiringStatus::FinishedAiring,
            "Not yet aired" => AiringStatus::NotYetAired,
            other => AiringStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AiringStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiringStatus::CurrentlyAiring => write!(f, "Currently Airing"),
            AiringStatus::FinishedAiring => write!(f, "Finished Airing"),
            AiringStatus::NotYetAired => write!(f, "Not yet aired"),
            AiringStatus::Other(text) => write!(f, "{}", text),
        }
    }
}

/// Full record for a single anime.
///
/// The optional fields are shown only when present. Empty vectors count as
/// absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeDetail {
    pub summary: AnimeSummary,
    /// Announced episode total
    pub episode_count: Option<u32>,
    pub studios: Vec<String>,
    /// Age rating, e.g. "PG-13 - Teens 13 or older"
    pub rating: Option<String>,
    /// Per-episode runtime, e.g. "24 min per ep"
    pub duration: Option<String>,
    pub popularity: Option<u32>,
    pub rank: Option<u32>,
    /// Source material, e.g. "Manga"
    pub source: Option<String>,
    pub scored_by: Option<u32>,
}

/// One episode of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode number as reported by the API (`mal_id`), not necessarily sequential
    pub number: u32,
    pub title: String,
    pub title_japanese: Option<String>,
    pub title_romanji: Option<String>,
    /// ISO 8601 timestamp of the first broadcast
    pub aired: Option<String>,
    pub score: Option<f64>,
    pub is_filler: bool,
    pub is_recap: bool,
}

/// Quarter of the broadcast year.
///
/// ```rust
/// use kisetsu::types::Season;
///
/// let season: Season = "Summer".parse().unwrap();
/// assert_eq!(season.as_str(), "summer");
/// assert_eq!(season.to_string(), "Summer");
/// assert_eq!(Season::Fall.next(2025), (Season::Winter, 2026));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// All seasons in broadcast-year order.
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    /// Lowercase name used in API paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }

    /// Season containing the given month (1-12).
    pub fn from_month(month: u32) -> Self {
        match month {
            1..=3 => Season::Winter,
            4..=6 => Season::Spring,
            7..=9 => Season::Summer,
            _ => Season::Fall,
        }
    }

    /// Current season and year by UTC date.
    pub fn current() -> (Season, i32) {
        let now = chrono::Utc::now();
        (Season::from_month(now.month()), now.year())
    }

    /// The following season, rolling Fall over into the next year's Winter.
    pub fn next(self, year: i32) -> (Season, i32) {
        match self {
            Season::Winter => (Season::Spring, year),
            Season::Spring => (Season::Summer, year),
            Season::Summer => (Season::Fall, year),
            Season::Fall => (Season::Winter, year + 1),
        }
    }

    /// The preceding season, rolling Winter back into the previous year's Fall.
    pub fn prev(self, year: i32) -> (Season, i32) {
        match self {
            Season::Winter => (Season::Fall, year - 1),
            Season::Spring => (Season::Winter, year),
            Season::Summer => (Season::Spring, year),
            Season::Fall => (Season::Summer, year),
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        };
        f.write_str(name)
    }
}

impl FromStr for Season {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            other => Err(crate::Error::parse(format!("Unknown season: {}", other))),
        }
    }
}
