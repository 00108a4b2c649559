//! Common test utilities and fixtures
//!
//! Shared functionality used across all test modules.
// Common test utilities and fixtures - all must be public

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use kisetsu::prelude::*;
use kisetsu::{Error, Result};

#[allow(dead_code)]
pub const TEST_TIMEOUT: Duration = Duration::from_secs(30);
#[allow(dead_code)]
pub const TEST_YEAR: i32 = 2025;
#[allow(dead_code)]
pub const TEST_SEASON: Season = Season::Summer;
#[allow(dead_code)]
pub const TEST_ANIME_ID: u32 = 52991;

/// Builds a listing entry with sensible defaults
#[allow(dead_code)]
pub fn anime(id: u32, title: &str, english: Option<&str>) -> AnimeSummary {
    AnimeSummary {
        id,
        title: title.to_string(),
        title_english: english.map(str::to_string),
        image_url: format!("https://cdn.myanimelist.net/images/anime/{}.jpg", id),
        synopsis: Some(format!("Synopsis of {}", title)),
        status: AiringStatus::CurrentlyAiring,
        aired: "Jul 6, 2025 to ?".to_string(),
        genres: vec!["Action".to_string(), "Fantasy".to_string()],
        score: Some(8.2),
    }
}

/// Five entries out of which two mention "kaiju"
#[allow(dead_code)]
pub fn sample_listing() -> Vec<AnimeSummary> {
    vec![
        anime(1, "Dandadan", Some("Dan Da Dan")),
        anime(2, "Kaijuu 8-gou", Some("Kaiju No. 8")),
        anime(3, "Ore dake Level Up na Ken", Some("Solo Leveling")),
        anime(4, "Kaiju Girls", None),
        anime(5, "Sakamoto Days", None),
    ]
}

#[allow(dead_code)]
pub fn detail(id: u32) -> AnimeDetail {
    AnimeDetail {
        summary: anime(id, "Sousou no Frieren", Some("Frieren: Beyond Journey's End")),
        episode_count: Some(28),
        studios: vec!["Madhouse".to_string()],
        rating: Some("PG-13 - Teens 13 or older".to_string()),
        duration: Some("24 min per ep".to_string()),
        popularity: Some(120),
        rank: Some(1),
        source: Some("Manga".to_string()),
        scored_by: Some(500_000),
    }
}

#[allow(dead_code)]
pub fn episode(number: u32, title: &str) -> Episode {
    Episode {
        number,
        title: title.to_string(),
        title_japanese: None,
        title_romanji: None,
        aired: Some("2023-09-29T00:00:00+00:00".to_string()),
        score: Some(4.5),
        is_filler: false,
        is_recap: false,
    }
}

#[allow(dead_code)]
pub fn sample_episodes() -> Vec<Episode> {
    vec![
        episode(1, "The Journey's End"),
        episode(2, "It Didn't Have to Be Magic..."),
        episode(3, "Killing Magic"),
    ]
}

/// Scripted in-memory source.
///
/// Each endpoint holds one canned response and its own delay. Call
/// counters let tests assert how often the pages actually fetched.
#[allow(dead_code)]
pub struct MockSource {
    season: Mutex<Result<Vec<AnimeSummary>>>,
    anime: Mutex<Result<AnimeDetail>>,
    episodes: Mutex<Result<Vec<Episode>>>,
    season_delay: Mutex<Duration>,
    anime_delay: Mutex<Duration>,
    episodes_delay: Mutex<Duration>,
    pub season_calls: AtomicUsize,
    pub anime_calls: AtomicUsize,
    pub episode_calls: AtomicUsize,
}

#[allow(dead_code)]
impl MockSource {
    pub fn new() -> Self {
        Self {
            season: Mutex::new(Ok(sample_listing())),
            anime: Mutex::new(Ok(detail(TEST_ANIME_ID))),
            episodes: Mutex::new(Ok(sample_episodes())),
            season_delay: Mutex::new(Duration::ZERO),
            anime_delay: Mutex::new(Duration::ZERO),
            episodes_delay: Mutex::new(Duration::ZERO),
            season_calls: AtomicUsize::new(0),
            anime_calls: AtomicUsize::new(0),
            episode_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_season(self, result: Result<Vec<AnimeSummary>>) -> Self {
        *self.season.lock().unwrap() = result;
        self
    }

    pub fn with_anime(self, result: Result<AnimeDetail>) -> Self {
        *self.anime.lock().unwrap() = result;
        self
    }

    pub fn with_episodes(self, result: Result<Vec<Episode>>) -> Self {
        *self.episodes.lock().unwrap() = result;
        self
    }

    /// Delays every endpoint by the same amount
    pub fn with_delay(self, delay: Duration) -> Self {
        self.with_season_delay(delay)
            .with_anime_delay(delay)
            .with_episodes_delay(delay)
    }

    pub fn with_season_delay(self, delay: Duration) -> Self {
        *self.season_delay.lock().unwrap() = delay;
        self
    }

    pub fn with_anime_delay(self, delay: Duration) -> Self {
        *self.anime_delay.lock().unwrap() = delay;
        self
    }

    pub fn with_episodes_delay(self, delay: Duration) -> Self {
        *self.episodes_delay.lock().unwrap() = delay;
        self
    }

    pub fn set_season(&self, result: Result<Vec<AnimeSummary>>) {
        *self.season.lock().unwrap() = result;
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

async fn pause(slot: &Mutex<Duration>) {
    let delay = *slot.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

// `Error` is not Clone, so canned failures are rebuilt from their message
fn replay<T: Clone>(slot: &Mutex<Result<T>>) -> Result<T> {
    match &*slot.lock().unwrap() {
        Ok(value) => Ok(value.clone()),
        Err(Error::Http { status, url }) => Err(Error::http(*status, url.clone())),
        Err(Error::NotFound(msg)) => Err(Error::not_found(msg.clone())),
        Err(Error::Parse(msg)) => Err(Error::parse(msg.clone())),
        Err(other) => Err(Error::Other(other.to_string())),
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &'static str {
        "mock"
    }

    fn name(&self) -> &'static str {
        "Mock Catalog"
    }

    fn base_url(&self) -> &str {
        "memory://catalog"
    }

    async fn fetch_season(&self, _year: i32, _season: Season) -> Result<Vec<AnimeSummary>> {
        self.season_calls.fetch_add(1, Ordering::SeqCst);
        pause(&self.season_delay).await;
        replay(&self.season)
    }

    async fn fetch_anime(&self, _id: u32) -> Result<AnimeDetail> {
        self.anime_calls.fetch_add(1, Ordering::SeqCst);
        pause(&self.anime_delay).await;
        replay(&self.anime)
    }

    async fn fetch_episodes(&self, _id: u32) -> Result<Vec<Episode>> {
        self.episode_calls.fetch_add(1, Ordering::SeqCst);
        pause(&self.episodes_delay).await;
        replay(&self.episodes)
    }
}
