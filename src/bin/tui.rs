//! Kisetsu TUI - seasonal anime catalog in the terminal
//!
//! Sidebar navigation between the catalog, the contact form and the
//! placeholder sections, with a detail screen per title and modal dialogs for
//! episodes and help.

use clap::Parser;
use color_eyre::{eyre::Result, install};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use std::{
    io,
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use kisetsu::{
    config::Config,
    logging,
    nav::{BRAND, GENRE_COLUMNS, GENRES, NAV_ITEMS, Route},
    pages::{CONTACT_CHANNELS, CONTACT_INTRO, ContactField, SubmitState, footer, series_label},
    prelude::*,
};

/// Browse the seasonal anime catalog from the terminal
#[derive(Parser, Debug)]
#[command(name = "kisetsu-tui", version, about)]
struct Args {
    /// Year to open on (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,

    /// Season to open on: winter, spring, summer or fall
    #[arg(long)]
    season: Option<Season>,

    /// Path to a config file
    #[arg(long, short)]
    config: Option<PathBuf>,
}

// Results coming back from spawned fetches
#[derive(Debug)]
enum AppEvent {
    SeasonLoaded(Ticket, kisetsu::Result<Vec<AnimeSummary>>),
    DetailLoaded(Ticket, kisetsu::Result<DetailData>),
}

#[derive(Debug, Clone, PartialEq)]
enum ModalState {
    None,
    HelpDialog,
}

mod theme {
    use ratatui::style::Color;

    pub const PRIMARY: Color = Color::Rgb(139, 92, 246); // Purple

    pub const ACCENT: Color = Color::Rgb(236, 72, 153); // Pink
    pub const SUCCESS: Color = Color::Rgb(76, 175, 80); // Green
    pub const WARNING: Color = Color::Rgb(255, 193, 7); // Yellow
    pub const ERROR: Color = Color::Rgb(244, 67, 54); // Red
    pub const INFO: Color = Color::Rgb(33, 150, 243); // Light Blue

    pub const TEXT_PRIMARY: Color = Color::Rgb(255, 255, 255);
    pub const TEXT_SECONDARY: Color = Color::Rgb(189, 189, 189);
    pub const TEXT_MUTED: Color = Color::Rgb(117, 117, 117);

    pub const BORDER: Color = Color::Rgb(66, 66, 66);
    pub const BORDER_FOCUS: Color = PRIMARY;
}

#[derive(Debug, Clone, PartialEq)]
enum StatusType {
    Info,
    Success,
    Warning,
    Error,
}

impl StatusType {
    fn color(&self) -> ratatui::style::Color {
        match self {
            StatusType::Info => theme::INFO,
            StatusType::Success => theme::SUCCESS,
            StatusType::Warning => theme::WARNING,
            StatusType::Error => theme::ERROR,
        }
    }
}

struct App {
    // Navigation
    route: Route,
    history: Vec<Route>,
    modal_state: ModalState,
    should_quit: bool,

    // Pages
    home: HomePage,
    home_list_state: ListState,
    detail: DetailPage,
    episodes_list_state: ListState,
    contact: ContactForm,
    contact_editing: bool,
    contact_error: Option<String>,

    // UI state
    status_message: String,
    status_type: StatusType,

    // Communication
    event_sender: mpsc::UnboundedSender<AppEvent>,
    event_receiver: mpsc::UnboundedReceiver<AppEvent>,

    // Backend
    source: Arc<dyn Source>,
}

impl App {
    fn new(source: Arc<dyn Source>, year: i32, season: Season) -> Self {
        let (event_sender, event_receiver) = mpsc::unbounded_channel();

        Self {
            route: Route::Home,
            history: Vec::new(),
            modal_state: ModalState::None,
            should_quit: false,

            home: HomePage::new(year, season),
            home_list_state: ListState::default(),
            detail: DetailPage::new(),
            episodes_list_state: ListState::default(),
            contact: ContactForm::new(),
            contact_editing: false,
            contact_error: None,

            status_message: "Press F1 for help".to_string(),
            status_type: StatusType::Info,

            event_sender,
            event_receiver,

            source,
        }
    }

    fn set_status(&mut self, message: impl Into<String>, status_type: StatusType) {
        self.status_message = message.into();
        self.status_type = status_type;
    }

    fn is_typing(&self) -> bool {
        match self.route {
            Route::Home => self.home.editing,
            Route::Contact => self.contact_editing,
            _ => false,
        }
    }

    // ── Navigation ────────────────────────────────────────────────

    fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        debug!(from = %self.route, to = %route, "navigate");
        self.leave_route();
        self.history.push(self.route);
        self.route = route;
        self.enter_route();
    }

    fn go_back(&mut self) {
        let previous = self.history.pop().unwrap_or(Route::Home);
        if previous == self.route {
            return;
        }
        self.leave_route();
        self.route = previous;
        self.enter_route();
    }

    fn leave_route(&mut self) {
        if let Route::Anime(_) = self.route {
            self.detail.leave();
        }
    }

    fn enter_route(&mut self) {
        match self.route {
            Route::Home => {
                if let Some(ticket) = self.home.enter() {
                    self.spawn_season(ticket);
                }
            }
            Route::Anime(id) => {
                if let Some(ticket) = self.detail.open(id) {
                    self.episodes_list_state.select(None);
                    self.spawn_detail(ticket, id);
                }
            }
            _ => {}
        }
    }

    fn cycle_nav(&mut self, forward: bool) {
        let len = NAV_ITEMS.len();
        let next = match (self.route.nav_index(), forward) {
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
            (None, _) => 0,
        };
        self.navigate(NAV_ITEMS[next].route);
    }

    // ── Fetches ───────────────────────────────────────────────────

    fn spawn_season(&mut self, ticket: Ticket) {
        let source = Arc::clone(&self.source);
        let sender = self.event_sender.clone();
        let key = self.home.key();
        self.home_list_state.select(None);
        self.set_status(format!("Loading {} {}...", key.1, key.0), StatusType::Info);

        tokio::spawn(async move {
            if let Some(result) = ticket.run(load_season(source.as_ref(), key)).await {
                let _ = sender.send(AppEvent::SeasonLoaded(ticket, result));
            }
        });
    }

    fn spawn_detail(&mut self, ticket: Ticket, id: u32) {
        let source = Arc::clone(&self.source);
        let sender = self.event_sender.clone();
        self.set_status("Loading anime details...", StatusType::Info);

        tokio::spawn(async move {
            if let Some(result) = ticket.run(load_detail(source.as_ref(), id)).await {
                let _ = sender.send(AppEvent::DetailLoaded(ticket, result));
            }
        });
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SeasonLoaded(ticket, result) => {
                let outcome = result.as_ref().map(Vec::len).map_err(ToString::to_string);
                if self.home.resolve(&ticket, result) {
                    match outcome {
                        Ok(count) => self.set_status(
                            format!("Loaded {}", series_label(count)),
                            StatusType::Success,
                        ),
                        Err(e) => self.set_status(e, StatusType::Error),
                    }
                }
            }
            AppEvent::DetailLoaded(ticket, result) => {
                let outcome = result
                    .as_ref()
                    .map(|d| d.episodes.len())
                    .map_err(ToString::to_string);
                if self.detail.resolve(&ticket, result) {
                    match outcome {
                        Ok(count) => {
                            self.episodes_list_state
                                .select(if count == 0 { None } else { Some(0) });
                            self.set_status(
                                format!("Loaded {} episodes", count),
                                StatusType::Success,
                            );
                        }
                        Err(e) => self.set_status(e, StatusType::Error),
                    }
                }
            }
        }
    }

    fn tick(&mut self) {
        if self.contact.tick(Instant::now()) {
            match self.contact.state() {
                SubmitState::Success { .. } => {
                    self.contact_editing = false;
                    self.set_status(
                        "Thank you! Your message has been sent successfully.",
                        StatusType::Success,
                    );
                }
                SubmitState::Idle | SubmitState::Submitting { .. } => {}
            }
        }
    }

    // ── Keys ──────────────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyCode) {
        // Handle modal states first
        if self.modal_state != ModalState::None {
            self.modal_state = ModalState::None;
            return;
        }
        if self.detail.selected_episode().is_some() {
            self.handle_episode_modal_keys(key);
            return;
        }
        if self.is_typing() {
            self.handle_route_keys(key);
            return;
        }

        match key {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::F(1) => self.modal_state = ModalState::HelpDialog,
            KeyCode::Tab => self.cycle_nav(true),
            KeyCode::BackTab => self.cycle_nav(false),
            _ => self.handle_route_keys(key),
        }
    }

    fn handle_route_keys(&mut self, key: KeyCode) {
        match self.route {
            Route::Home => self.handle_home_keys(key),
            Route::Anime(_) => self.handle_detail_keys(key),
            Route::Contact => self.handle_contact_keys(key),
            Route::Browse | Route::Favorites | Route::Categories => {
                if key == KeyCode::Esc {
                    self.go_back();
                }
            }
        }
    }

    fn handle_home_keys(&mut self, key: KeyCode) {
        if self.home.editing {
            match key {
                KeyCode::Enter | KeyCode::Esc => self.home.editing = false,
                KeyCode::Backspace => self.home.pop_char(),
                KeyCode::Char(c) => self.home.push_char(c),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Char('s') | KeyCode::Char('/') => {
                self.home.editing = true;
                self.set_status("Type to filter, Enter to finish", StatusType::Info);
            }
            KeyCode::Up => self.home.move_up(),
            KeyCode::Down => self.home.move_down(),
            KeyCode::Enter => {
                if let Some(id) = self.home.selected().map(|a| a.id) {
                    self.navigate(Route::Anime(id));
                }
            }
            KeyCode::Char('r') => {
                if let Some(ticket) = self.home.reload() {
                    self.spawn_season(ticket);
                }
            }
            KeyCode::Char('c') | KeyCode::Esc => {
                if !self.home.search_term().is_empty() {
                    self.home.clear_search();
                    self.set_status("Search cleared", StatusType::Info);
                }
            }
            KeyCode::Char('[') => {
                if let Some(ticket) = self.home.prev_season() {
                    self.spawn_season(ticket);
                }
            }
            KeyCode::Char(']') => {
                if let Some(ticket) = self.home.next_season() {
                    self.spawn_season(ticket);
                }
            }
            _ => {}
        }
    }

    fn handle_detail_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.detail.move_up(),
            KeyCode::Down => self.detail.move_down(),
            KeyCode::Enter => {
                self.detail.select_current();
            }
            KeyCode::Char('b') | KeyCode::Backspace | KeyCode::Esc => self.go_back(),
            KeyCode::Char('w') => {
                self.set_status("Streaming is not available", StatusType::Warning)
            }
            KeyCode::Char('a') => {
                self.set_status("Watchlists are not available", StatusType::Warning)
            }
            _ => {}
        }
    }

    fn handle_episode_modal_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('x') => self.detail.close_episode(),
            KeyCode::Char('w') => {
                self.set_status("Streaming is not available", StatusType::Warning)
            }
            _ => {}
        }
    }

    fn handle_contact_keys(&mut self, key: KeyCode) {
        if self.contact_editing {
            match key {
                KeyCode::Enter | KeyCode::Esc => self.contact_editing = false,
                KeyCode::Backspace => self.contact.backspace(),
                KeyCode::Char(c) => self.contact.input(c),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Up => self.contact.focus_prev(),
            KeyCode::Down => self.contact.focus_next(),
            KeyCode::Left if self.contact.focus == ContactField::Subject => {
                self.contact.cycle_subject(false)
            }
            KeyCode::Right if self.contact.focus == ContactField::Subject => {
                self.contact.cycle_subject(true)
            }
            KeyCode::Enter => match self.contact.focus {
                ContactField::Subject => self.contact.cycle_subject(true),
                ContactField::Submit => match self.contact.submit(Instant::now()) {
                    Ok(()) => {
                        self.contact_error = None;
                        self.set_status("Sending...", StatusType::Info);
                    }
                    Err(e) => {
                        self.set_status(e.to_string(), StatusType::Warning);
                        self.contact_error = Some(e.to_string());
                    }
                },
                _ if !self.contact.is_submitting() => self.contact_editing = true,
                _ => {}
            },
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }
}

// Rendering implementation
impl App {
    fn render(&mut self, f: &mut Frame) {
        let size = f.size();

        // Main layout with sidebar
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(20), Constraint::Min(0)])
            .split(size);

        self.render_sidebar(f, chunks[0]);

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Status bar
            ])
            .split(chunks[1]);

        self.render_header(f, main_chunks[0]);
        self.render_main_content(f, main_chunks[1]);
        self.render_status_bar(f, main_chunks[2]);

        // Render modals on top
        self.render_modals(f);
    }

    fn render_sidebar(&self, f: &mut Frame, area: Rect) {
        let active = self.route.nav_index();
        let items: Vec<ListItem> = NAV_ITEMS
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if Some(i) == active {
                    Style::default()
                        .fg(theme::PRIMARY)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme::TEXT_SECONDARY)
                };

                ListItem::new(Line::from(item.label)).style(style)
            })
            .collect();

        let sidebar = List::new(items).block(
            Block::default()
                .title(BRAND)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BORDER))
                .title_style(
                    Style::default()
                        .fg(theme::PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
        );

        f.render_widget(sidebar, area);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let (title, subtitle) = match self.route {
            Route::Home => (
                self.home.title(),
                format!(
                    "Discover the hottest anime series of the {} season  ·  [ ] to change season",
                    self.home.season().as_str()
                ),
            ),
            Route::Anime(_) => (
                "Anime Details".to_string(),
                "b to go back  ·  Enter to open an episode".to_string(),
            ),
            Route::Contact => (
                "Contact Us".to_string(),
                "Send us a message".to_string(),
            ),
            Route::Browse => ("Browse".to_string(), "Coming soon".to_string()),
            Route::Favorites => ("Favorites".to_string(), "Coming soon".to_string()),
            Route::Categories => ("Categories".to_string(), "Genres".to_string()),
        };

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                title,
                Style::default()
                    .fg(theme::TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                subtitle,
                Style::default().fg(theme::TEXT_SECONDARY),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::BORDER)),
        )
        .alignment(Alignment::Center);

        f.render_widget(header, area);
    }

    fn render_main_content(&mut self, f: &mut Frame, area: Rect) {
        match self.route {
            Route::Home => self.render_home(f, area),
            Route::Anime(_) => self.render_detail(f, area),
            Route::Contact => self.render_contact(f, area),
            Route::Browse | Route::Favorites | Route::Categories => {
                self.render_placeholder(f, area)
            }
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status = Paragraph::new(self.status_message.as_str())
            .style(Style::default().fg(self.status_type.color()))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::BORDER))
                    .title(format!("Data provided by {}", self.source.name()))
                    .title_style(Style::default().fg(theme::TEXT_MUTED)),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(status, area);
    }

    fn render_message(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
        let message = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::BORDER))
                    .title(title.to_string()),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(message, area);
    }

    fn headline(text: &str, color: ratatui::style::Color) -> Line<'static> {
        Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    }

    fn hint(text: &str) -> Line<'static> {
        Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(theme::TEXT_MUTED),
        ))
    }

    fn render_home(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search input
                Constraint::Min(0),    // Grid
            ])
            .margin(1)
            .split(area);

        let search_style = if self.home.editing {
            Style::default().fg(theme::BORDER_FOCUS)
        } else {
            Style::default().fg(theme::BORDER)
        };
        let search_title = match self.home.count_label() {
            Some(label) => format!("Search anime (/)  ·  {}", label),
            None => "Search anime (/)".to_string(),
        };
        let search_text = if self.home.search_term().is_empty() && !self.home.editing {
            Span::styled("Search by title...", Style::default().fg(theme::TEXT_MUTED))
        } else {
            Span::styled(
                self.home.search_term().to_string(),
                Style::default().fg(theme::TEXT_PRIMARY),
            )
        };
        let search = Paragraph::new(Line::from(search_text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(search_title),
        );
        f.render_widget(search, chunks[0]);

        match self.home.view() {
            ListView::Loading => Self::render_message(
                f,
                chunks[1],
                "Catalog",
                vec![Line::from(""), Self::hint("Loading amazing anime...")],
            ),
            ListView::Error(message) => Self::render_message(
                f,
                chunks[1],
                "Catalog",
                vec![
                    Line::from(""),
                    Self::headline("Oops! Something went wrong", theme::ERROR),
                    error_message(message),
                    Line::from(""),
                    Self::hint("Press r to Try Again"),
                ],
            ),
            ListView::EmptyListing => Self::render_message(
                f,
                chunks[1],
                "Catalog",
                vec![
                    Line::from(""),
                    Self::headline("No anime found", theme::TEXT_PRIMARY),
                    Line::from("Try refreshing the page or check back later"),
                    Line::from(""),
                    Self::hint("Press r to Refresh"),
                ],
            ),
            ListView::NoResults { term } => Self::render_message(
                f,
                chunks[1],
                "Catalog",
                vec![
                    Line::from(""),
                    Self::headline("No results found", theme::TEXT_PRIMARY),
                    Line::from(format!("Try a different search term than \"{}\"", term)),
                    Line::from(""),
                    Self::hint("Press c to Clear Search"),
                ],
            ),
            ListView::Grid(items) => {
                let panes = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(chunks[1]);

                let preview_width = panes[1].width.saturating_sub(2) as usize;
                let preview = items.get(self.home.cursor()).map(|anime| {
                    let mut lines = vec![
                        format_card_title(anime),
                        format_card_meta(anime),
                        Line::from(""),
                    ];
                    lines.extend(format_synopsis(
                        anime.synopsis.as_deref(),
                        preview_width,
                        CARD_SYNOPSIS_FALLBACK,
                    ));
                    lines.push(Line::from(""));
                    lines.push(Self::hint("Enter: Watch Now"));
                    lines
                });

                let list_width = panes[0].width.saturating_sub(4) as usize;
                let cards: Vec<ListItem> = items
                    .iter()
                    .map(|anime| {
                        let title = truncate_text(anime.display_title(), list_width);
                        let mut first = vec![Span::styled(
                            title,
                            Style::default().fg(theme::TEXT_PRIMARY),
                        )];
                        if let Some(score) = format_score(anime.score) {
                            first.push(Span::raw(" "));
                            first.push(Span::styled(score, Style::default().fg(theme::WARNING)));
                        }
                        ListItem::new(vec![
                            Line::from(first),
                            Line::from(vec![
                                Span::raw("  "),
                                format_status_badge(&anime.status),
                            ]),
                        ])
                    })
                    .collect();

                let list = List::new(cards)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(theme::BORDER))
                            .title(format!("{} {}", self.home.season(), self.home.year())),
                    )
                    .highlight_style(
                        Style::default()
                            .bg(theme::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    );

                self.home_list_state.select(Some(self.home.cursor()));
                f.render_stateful_widget(list, panes[0], &mut self.home_list_state);

                if let Some(lines) = preview {
                    let preview = Paragraph::new(lines)
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .border_style(Style::default().fg(theme::BORDER))
                                .title("Details"),
                        )
                        .wrap(Wrap { trim: false });
                    f.render_widget(preview, panes[1]);
                }
            }
        }
    }

    fn render_detail(&mut self, f: &mut Frame, area: Rect) {
        let area = area.inner(&Margin {
            horizontal: 1,
            vertical: 1,
        });

        match self.detail.view() {
            DetailView::Loading => Self::render_message(
                f,
                area,
                "Anime",
                vec![Line::from(""), Self::hint("Loading anime details...")],
            ),
            DetailView::Error(message) => Self::render_message(
                f,
                area,
                "Anime",
                vec![
                    Line::from(""),
                    Self::headline("Oops! Something went wrong", theme::ERROR),
                    error_message(message),
                    Line::from(""),
                    Self::hint("Press b to Go Back"),
                ],
            ),
            DetailView::Ready { anime, episodes } => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Percentage(45), Constraint::Min(0)])
                    .split(area);

                let width = chunks[0].width.saturating_sub(2) as usize;
                let mut info = vec![Line::from(Span::styled(
                    anime.summary.display_title().to_string(),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                ))];

                let stats = format_detail_stats(anime);
                if !stats.is_empty() {
                    info.push(Line::from(Span::styled(
                        stats.join("  •  "),
                        Style::default().fg(theme::TEXT_SECONDARY),
                    )));
                }
                if let Some(genres) = format_genres(&anime.summary.genres, usize::MAX) {
                    info.push(Line::from(Span::styled(
                        genres,
                        Style::default().fg(theme::PRIMARY),
                    )));
                }
                info.push(Self::hint("[w] Watch Now   [a] Add to List"));
                info.push(Line::from(""));
                info.push(Self::headline("Synopsis", theme::TEXT_PRIMARY));
                info.extend(format_synopsis(
                    anime.summary.synopsis.as_deref(),
                    width,
                    DETAIL_SYNOPSIS_FALLBACK,
                ));

                let info = Paragraph::new(info)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(Style::default().fg(theme::BORDER))
                            .title("Anime Information"),
                    )
                    .wrap(Wrap { trim: false });
                f.render_widget(info, chunks[0]);

                if episodes.is_empty() {
                    Self::render_message(
                        f,
                        chunks[1],
                        "Episodes (0)",
                        vec![
                            Line::from(""),
                            Self::headline("No Episodes Available", theme::TEXT_PRIMARY),
                            Self::hint("Episode information is not available for this anime."),
                        ],
                    );
                } else {
                    let items: Vec<ListItem> = episodes
                        .iter()
                        .map(|episode| ListItem::new(format_episode_line(episode)))
                        .collect();

                    let list = List::new(items)
                        .block(
                            Block::default()
                                .borders(Borders::ALL)
                                .border_style(Style::default().fg(theme::BORDER))
                                .title(format!("Episodes ({})", episodes.len())),
                        )
                        .highlight_style(
                            Style::default()
                                .bg(theme::PRIMARY)
                                .add_modifier(Modifier::BOLD),
                        );

                    self.episodes_list_state.select(Some(self.detail.cursor()));
                    f.render_stateful_widget(list, chunks[1], &mut self.episodes_list_state);
                }
            }
        }
    }

    fn render_contact(&self, f: &mut Frame, area: Rect) {
        let area = area.inner(&Margin {
            horizontal: 1,
            vertical: 1,
        });
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        self.render_contact_info(f, panes[1]);
        let area = panes[0];

        let mut lines = Vec::new();

        match self.contact.state() {
            SubmitState::Success { .. } => {
                lines.push(success_message(
                    "Thank you! Your message has been sent successfully.",
                ));
                lines.push(Line::from(""));
            }
            SubmitState::Submitting { .. } => {
                lines.push(info_message("Sending..."));
                lines.push(Line::from(""));
            }
            SubmitState::Idle => {
                if let Some(error) = &self.contact_error {
                    lines.push(warning_message(error));
                    lines.push(Line::from(""));
                }
            }
        }

        for field in ContactField::ALL {
            let focused = self.contact.focus == field;
            let marker = if focused { "▶ " } else { "  " };
            let label_style = if focused {
                Style::default()
                    .fg(theme::PRIMARY)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::TEXT_SECONDARY)
            };

            let (value, placeholder) = match field {
                ContactField::Name => (self.contact.name.clone(), "Your name"),
                ContactField::Email => (self.contact.email.clone(), "your.email@example.com"),
                ContactField::Subject => (
                    self.contact
                        .subject
                        .map(|s| format!("◀ {} ▶", s.label()))
                        .unwrap_or_default(),
                    "◀ Select a subject ▶",
                ),
                ContactField::Message => {
                    (self.contact.message.clone(), "Tell us what's on your mind...")
                }
                ContactField::Submit => {
                    let label = if self.contact.is_submitting() {
                        "[ Sending... ]"
                    } else {
                        "[ Send Message ]"
                    };
                    lines.push(Line::from(""));
                    lines.push(Line::from(vec![
                        Span::raw(marker),
                        Span::styled(label, label_style),
                    ]));
                    continue;
                }
            };

            let value_span = if value.is_empty() {
                Span::styled(placeholder, Style::default().fg(theme::TEXT_MUTED))
            } else {
                Span::styled(value, Style::default().fg(theme::TEXT_PRIMARY))
            };
            let cursor = if focused && self.contact_editing { "_" } else { "" };

            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{} *  ", field), label_style),
                value_span,
                Span::styled(cursor, Style::default().fg(theme::ACCENT)),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Self::hint(
            "↑↓ select field  ·  Enter edit/confirm  ·  ←→ change subject",
        ));

        let border = if self.contact_editing {
            theme::BORDER_FOCUS
        } else {
            theme::BORDER
        };
        let form = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title("Send us a message"),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(form, area);
    }

    fn render_contact_info(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                CONTACT_INTRO,
                Style::default().fg(theme::TEXT_SECONDARY),
            )),
            Line::from(""),
        ];

        for channel in CONTACT_CHANNELS {
            lines.push(Self::headline(channel.heading, theme::PRIMARY));
            lines.push(Line::from(Span::styled(
                channel.detail,
                Style::default().fg(theme::TEXT_PRIMARY),
            )));
            lines.push(Self::hint(channel.note));
            lines.push(Line::from(""));
        }

        let (_, year) = Season::current();
        lines.push(Self::hint(&footer(year)));

        let info = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::BORDER))
                    .title("Get in touch"),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(info, area);
    }

    fn render_placeholder(&self, f: &mut Frame, area: Rect) {
        let area = area.inner(&Margin {
            horizontal: 1,
            vertical: 1,
        });

        let mut lines = vec![Line::from("")];
        if self.route == Route::Categories {
            for row in GENRES.chunks(GENRE_COLUMNS) {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|genre| {
                        Span::styled(
                            format!("{:<16}", genre),
                            Style::default().fg(theme::PRIMARY),
                        )
                    })
                    .collect();
                lines.push(Line::from(spans));
            }
            lines.push(Line::from(""));
            lines.push(Self::hint("Genre pages are coming soon"));
        } else {
            lines.push(Self::headline("Coming soon", theme::TEXT_PRIMARY));
            lines.push(Self::hint("This section is not available yet"));
        }

        Self::render_message(f, area, &self.route.path(), lines);
    }

    fn render_modals(&self, f: &mut Frame) {
        if let Some(episode) = self.detail.selected_episode() {
            self.render_episode_modal(f, episode);
        }
        if self.modal_state == ModalState::HelpDialog {
            self.render_help_modal(f);
        }
    }

    fn render_episode_modal(&self, f: &mut Frame, episode: &Episode) {
        let area = self.centered_rect(60, 40, f.size());
        f.render_widget(Clear, area);

        let mut lines = vec![
            Self::headline(&format!("Episode {}", episode.number), theme::ACCENT),
            Line::from(""),
            Line::from(Span::styled(
                episode.title.clone(),
                Style::default().fg(theme::TEXT_PRIMARY),
            )),
        ];
        if let Some(romanji) = &episode.title_romanji {
            lines.push(Self::hint(romanji));
        }
        if let Some(aired) = &episode.aired {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("Aired: {}", format_aired_date(aired))));
        }
        lines.push(Line::from(""));
        lines.push(Self::hint("[w] Watch Episode   [x] Close"));

        let modal = Paragraph::new(lines)
            .block(
                Block::default()
                    .title("Episode")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::PRIMARY))
                    .border_type(BorderType::Rounded),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(modal, area);
    }

    fn render_help_modal(&self, f: &mut Frame) {
        let area = self.centered_rect(70, 80, f.size());
        f.render_widget(Clear, area);

        let help_text = vec![
            Line::from("Kisetsu - Quick Help"),
            Line::from(""),
            Line::from("Navigation:"),
            Line::from("  Tab       - Next section"),
            Line::from("  ↑↓        - Navigate items"),
            Line::from("  Enter     - Select/Activate"),
            Line::from("  Esc, b    - Go back"),
            Line::from("  q         - Quit application"),
            Line::from(""),
            Line::from("Catalog:"),
            Line::from("  s, /      - Search by title"),
            Line::from("  c         - Clear search"),
            Line::from("  r         - Reload"),
            Line::from("  [ ]       - Previous/next season"),
            Line::from(""),
            Line::from("Anime details:"),
            Line::from("  Enter     - Open episode"),
            Line::from("  x, Esc    - Close episode"),
            Line::from(""),
            Line::from("Press any key to close"),
        ];

        let help = Paragraph::new(help_text)
            .style(Style::default().fg(theme::TEXT_PRIMARY))
            .block(
                Block::default()
                    .title("Help")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme::INFO))
                    .border_type(BorderType::Rounded),
            )
            .wrap(Wrap { trim: true });

        f.render_widget(help, area);
    }

    fn centered_rect(&self, percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    install()?;

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let _log_guard = logging::init(&config.logging)?;

    let (default_year, default_season) = config.resolved_season();
    let year = args.year.unwrap_or(default_year);
    let season = args.season.unwrap_or(default_season);
    info!(year, season = %season, base_url = %config.api.base_url, "starting");

    let source: Arc<dyn Source> = Arc::new(config.source());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(source, year, season);
    app.enter_route();

    // Main loop
    loop {
        terminal.draw(|f| app.render(f))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key_event(key.code);
                }
            }
        }

        while let Ok(app_event) = app.event_receiver.try_recv() {
            app.handle_app_event(app_event);
        }
        app.tick();

        if app.should_quit {
            break;
        }
    }

    app.detail.leave();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
