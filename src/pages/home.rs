//! Home page: the seasonal listing with search.

use crate::{
    error::Result,
    fetch::{FetchState, Phase, SeasonKey, Ticket},
    search,
    types::{AnimeSummary, Season},
};

/// What the home page shows, derived from its fetch phase and search term.
#[derive(Debug, PartialEq)]
pub enum ListView<'a> {
    Loading,
    /// The fetch failed; offers "Try Again"
    Error(&'a str),
    /// The API returned no entries at all; offers "Refresh"
    EmptyListing,
    /// Entries exist but none match the term; offers "Clear Search"
    NoResults { term: &'a str },
    Grid(Vec<&'a AnimeSummary>),
}

/// Count label shown above the grid.
///
/// ```rust
/// assert_eq!(kisetsu::pages::series_label(2), "2 Series");
/// ```
pub fn series_label(count: usize) -> String {
    format!("{} Series", count)
}

/// State of the seasonal listing page.
#[derive(Debug)]
pub struct HomePage {
    key: SeasonKey,
    fetch: FetchState<SeasonKey, Vec<AnimeSummary>>,
    search_term: String,
    cursor: usize,
    /// Whether keystrokes go to the search box
    pub editing: bool,
}

impl HomePage {
    pub fn new(year: i32, season: Season) -> Self {
        Self {
            key: (year, season),
            fetch: FetchState::new(),
            search_term: String::new(),
            cursor: 0,
            editing: false,
        }
    }

    pub fn year(&self) -> i32 {
        self.key.0
    }

    pub fn season(&self) -> Season {
        self.key.1
    }

    pub fn key(&self) -> SeasonKey {
        self.key
    }

    /// Header line, e.g. "Summer 2025 Anime".
    pub fn title(&self) -> String {
        format!("{} {} Anime", self.season(), self.year())
    }

    pub fn phase(&self) -> &Phase<Vec<AnimeSummary>> {
        self.fetch.phase()
    }

    /// Called when the page becomes visible. Starts a fetch unless the current
    /// season was already requested.
    pub fn enter(&mut self) -> Option<Ticket> {
        self.fetch.begin(self.key)
    }

    /// "Try Again" and "Refresh".
    pub fn reload(&mut self) -> Option<Ticket> {
        self.cursor = 0;
        self.fetch.reload()
    }

    /// Applies a finished fetch. Returns whether it was current.
    pub fn resolve(&mut self, ticket: &Ticket, result: Result<Vec<AnimeSummary>>) -> bool {
        let applied = self.fetch.resolve(ticket, result);
        if applied {
            self.cursor = 0;
        }
        applied
    }

    /// Steps to the previous season and starts loading it.
    pub fn prev_season(&mut self) -> Option<Ticket> {
        let (season, year) = self.season().prev(self.year());
        self.switch_season(year, season)
    }

    /// Steps to the following season and starts loading it.
    pub fn next_season(&mut self) -> Option<Ticket> {
        let (season, year) = self.season().next(self.year());
        self.switch_season(year, season)
    }

    fn switch_season(&mut self, year: i32, season: Season) -> Option<Ticket> {
        self.key = (year, season);
        self.cursor = 0;
        self.fetch.begin(self.key)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.clamp_cursor();
    }

    pub fn push_char(&mut self, c: char) {
        self.search_term.push(c);
        self.clamp_cursor();
    }

    pub fn pop_char(&mut self) {
        self.search_term.pop();
        self.clamp_cursor();
    }

    /// "Clear Search".
    pub fn clear_search(&mut self) {
        self.search_term.clear();
        self.editing = false;
        self.cursor = 0;
    }

    /// Entries that pass the current filter, in listing order.
    pub fn visible(&self) -> Vec<&AnimeSummary> {
        match self.fetch.phase() {
            Phase::Ready(listing) => search::filter_refs(listing, &self.search_term),
            _ => Vec::new(),
        }
    }

    pub fn view(&self) -> ListView<'_> {
        match self.fetch.phase() {
            Phase::Idle | Phase::Loading => ListView::Loading,
            Phase::Error(message) => ListView::Error(message),
            Phase::Ready(listing) if listing.is_empty() => ListView::EmptyListing,
            Phase::Ready(listing) => {
                let items = search::filter_refs(listing, &self.search_term);
                if items.is_empty() {
                    ListView::NoResults {
                        term: self.search_term.trim(),
                    }
                } else {
                    ListView::Grid(items)
                }
            }
        }
    }

    /// "{n} Series" for the filtered grid, absent while nothing is loaded.
    pub fn count_label(&self) -> Option<String> {
        self.fetch
            .phase()
            .is_ready()
            .then(|| series_label(self.visible().len()))
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let len = self.visible().len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    /// Entry under the cursor.
    pub fn selected(&self) -> Option<&AnimeSummary> {
        self.visible().get(self.cursor).copied()
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}
