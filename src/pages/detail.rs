//! Detail page: one anime, its episodes and the episode modal.

use crate::{
    error::Result,
    fetch::{DetailData, FetchState, Phase, Ticket},
    types::{AnimeDetail, Episode},
};

/// What the detail page shows.
#[derive(Debug, PartialEq)]
pub enum DetailView<'a> {
    Loading,
    /// Either request failed; offers "Go Back"
    Error(&'a str),
    Ready {
        anime: &'a AnimeDetail,
        episodes: &'a [Episode],
    },
}

/// State of the detail page.
///
/// `selected_episode`, when set, always names an episode of the loaded
/// listing. It is cleared whenever a cycle starts or a listing arrives.
#[derive(Debug, Default)]
pub struct DetailPage {
    fetch: FetchState<u32, DetailData>,
    selected_episode: Option<u32>,
    cursor: usize,
}

impl DetailPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anime id this page was last opened for.
    pub fn anime_id(&self) -> Option<u32> {
        self.fetch.key().copied()
    }

    pub fn phase(&self) -> &Phase<DetailData> {
        self.fetch.phase()
    }

    /// Shows the given anime, starting the joint fetch if needed.
    pub fn open(&mut self, id: u32) -> Option<Ticket> {
        let ticket = self.fetch.begin(id);
        if ticket.is_some() {
            self.selected_episode = None;
            self.cursor = 0;
        }
        ticket
    }

    /// Called when navigating away. Cancels any in-flight fetch.
    pub fn leave(&mut self) {
        self.fetch.teardown();
        self.selected_episode = None;
        self.cursor = 0;
    }

    /// Applies the joined result. Returns whether it was current.
    pub fn resolve(&mut self, ticket: &Ticket, result: Result<DetailData>) -> bool {
        let applied = self.fetch.resolve(ticket, result);
        if applied {
            self.selected_episode = None;
            self.cursor = 0;
        }
        applied
    }

    pub fn view(&self) -> DetailView<'_> {
        match self.fetch.phase() {
            Phase::Idle | Phase::Loading => DetailView::Loading,
            Phase::Error(message) => DetailView::Error(message),
            Phase::Ready(data) => DetailView::Ready {
                anime: &data.anime,
                episodes: &data.episodes,
            },
        }
    }

    fn episodes(&self) -> &[Episode] {
        self.fetch
            .phase()
            .data()
            .map(|data| data.episodes.as_slice())
            .unwrap_or_default()
    }

    /// Opens the episode modal. Ignored for numbers not in the listing.
    pub fn select_episode(&mut self, number: u32) -> bool {
        let known = self.episodes().iter().any(|e| e.number == number);
        if known {
            self.selected_episode = Some(number);
        }
        known
    }

    /// Opens the modal for the episode under the cursor.
    pub fn select_current(&mut self) -> bool {
        match self.episodes().get(self.cursor).map(|e| e.number) {
            Some(number) => self.select_episode(number),
            None => false,
        }
    }

    pub fn close_episode(&mut self) {
        self.selected_episode = None;
    }

    /// Episode shown in the modal, if open.
    pub fn selected_episode(&self) -> Option<&Episode> {
        let number = self.selected_episode?;
        self.fetch.phase().data()?.episode(number)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.episodes().len() {
            self.cursor += 1;
        }
    }
}
