//! Fetch lifecycle shared by the pages.
//!
//! Every page that loads remote data owns one [`FetchState`]. It moves
//! through [`Phase::Idle`] → [`Phase::Loading`] → [`Phase::Ready`] or
//! [`Phase::Error`]. Starting a cycle hands out a [`Ticket`] that the
//! spawned task carries. Its result is applied only if the ticket is still
//! current, so results of an abandoned cycle never overwrite newer state.
//!
//! # Examples
//!
//! ```rust
//! use kisetsu::fetch::{FetchState, Phase};
//!
//! let mut state: FetchState<u32, String> = FetchState::new();
//! let ticket = state.begin(21).unwrap();
//! assert!(state.phase().is_loading());
//!
//! // Same key while loading: no new cycle
//! assert!(state.begin(21).is_none());
//!
//! assert!(state.resolve(&ticket, Ok("One Piece".to_string())));
//! assert_eq!(state.phase().data().map(String::as_str), Some("One Piece"));
//! ```

use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    error::Result,
    source::Source,
    types::{AnimeDetail, AnimeSummary, Episode, Season},
};

/// Coarse lifecycle state of a page's data.
///
/// Data exists only inside `Ready`, so a page can never render a half
/// loaded state.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase<T> {
    Idle,
    Loading,
    Ready(T),
    /// Display message of the error that ended the cycle
    Error(String),
}

impl<T> Phase<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Phase::Ready(_))
    }

    /// Loaded data, if the cycle succeeded.
    pub fn data(&self) -> Option<&T> {
        match self {
            Phase::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// Error message, if the cycle failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Phase::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Handle for one fetch cycle.
///
/// Cloning is cheap. All clones share the same cancellation token.
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    token: CancellationToken,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drives `fut` until it completes or the cycle is torn down.
    ///
    /// Returns `None` when cancelled. The future is dropped at that point,
    /// which aborts any in-flight request.
    ///
    /// ```rust
    /// # use kisetsu::fetch::FetchState;
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let mut state: FetchState<u32, u32> = FetchState::new();
    /// let ticket = state.begin(1).unwrap();
    /// state.teardown();
    ///
    /// let outcome = ticket.run(std::future::pending::<u32>()).await;
    /// assert_eq!(outcome, None);
    /// # }
    /// ```
    pub async fn run<F, R>(&self, fut: F) -> Option<R>
    where
        F: Future<Output = R>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            result = fut => Some(result),
        }
    }
}

/// Per-page fetch state keyed by what was requested.
///
/// `K` is the request key (a season for the home page, an anime id for the
/// detail page). A cycle starts when the state is idle or the key changes.
#[derive(Debug)]
pub struct FetchState<K, T> {
    key: Option<K>,
    phase: Phase<T>,
    generation: u64,
    token: Option<CancellationToken>,
}

impl<K, T> FetchState<K, T>
where
    K: Clone + PartialEq + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            key: None,
            phase: Phase::Idle,
            generation: 0,
            token: None,
        }
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn phase(&self) -> &Phase<T> {
        &self.phase
    }

    /// Starts a cycle for `key` unless one for the same key already ran or is running.
    pub fn begin(&mut self, key: K) -> Option<Ticket> {
        if !self.phase.is_idle() && self.key.as_ref() == Some(&key) {
            return None;
        }
        self.key = Some(key);
        Some(self.start())
    }

    /// Starts a new cycle for the current key, whatever the phase.
    ///
    /// Returns `None` if no key was ever set.
    pub fn reload(&mut self) -> Option<Ticket> {
        self.key.as_ref()?;
        Some(self.start())
    }

    fn start(&mut self) -> Ticket {
        if let Some(token) = self.token.take() {
            token.cancel();
        }

        self.generation += 1;
        let token = CancellationToken::new();
        self.token = Some(token.clone());
        self.phase = Phase::Loading;

        debug!(key = ?self.key, generation = self.generation, "fetch cycle started");

        Ticket {
            generation: self.generation,
            token,
        }
    }

    /// Applies the outcome of a cycle.
    ///
    /// Returns `false`, leaving the state untouched, when the ticket is stale
    /// or was cancelled.
    pub fn resolve(&mut self, ticket: &Ticket, result: Result<T>) -> bool {
        if ticket.generation != self.generation || ticket.is_cancelled() {
            warn!(
                key = ?self.key,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale fetch result"
            );
            return false;
        }

        self.token = None;
        self.phase = match result {
            Ok(data) => Phase::Ready(data),
            Err(e) => {
                warn!(key = ?self.key, error = %e, "fetch failed");
                Phase::Error(e.to_string())
            }
        };
        true
    }

    /// Cancels the active cycle and returns to idle.
    ///
    /// The key is kept, so a later [`begin`](FetchState::begin) with the
    /// same key refetches.
    pub fn teardown(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
        // Invalidate tickets already handed out
        self.generation += 1;
        self.phase = Phase::Idle;
    }
}

impl<K, T> Default for FetchState<K, T>
where
    K: Clone + PartialEq + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Key of a seasonal listing.
pub type SeasonKey = (i32, Season);

/// Joined result of the detail page's two requests.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailData {
    pub anime: AnimeDetail,
    pub episodes: Vec<Episode>,
}

impl DetailData {
    /// Looks up an episode by its number.
    pub fn episode(&self, number: u32) -> Option<&Episode> {
        self.episodes.iter().find(|e| e.number == number)
    }
}

/// Loads one seasonal listing.
pub async fn load_season(source: &dyn Source, key: SeasonKey) -> Result<Vec<AnimeSummary>> {
    let (year, season) = key;
    source.fetch_season(year, season).await
}

/// Loads the anime record and its episodes concurrently.
///
/// Succeeds only if both requests succeed. The first failure ends the join
/// and the other request is dropped.
pub async fn load_detail(source: &dyn Source, id: u32) -> Result<DetailData> {
    let (anime, episodes) = futures::try_join!(source.fetch_anime(id), source.fetch_episodes(id))?;
    Ok(DetailData { anime, episodes })
}
