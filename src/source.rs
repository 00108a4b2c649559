//! Source trait for anime catalog backends.
//!
//! This module defines the [`Source`] trait the pages fetch through. The
//! production implementation is [`JikanSource`](crate::sources::JikanSource).
//! Tests substitute a scripted in-memory source.
//!
//! # Examples
//!
//! ```rust,no_run
//! use kisetsu::prelude::*;
//!
//! # async fn example() -> kisetsu::Result<()> {
//! let source = JikanSource::new();
//! let listing = source.fetch_season(2025, Season::Summer).await?;
//!
//! if let Some(first) = listing.first() {
//!     let episodes = source.fetch_episodes(first.id).await?;
//!     println!("{} has {} episodes listed", first.display_title(), episodes.len());
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{AnimeDetail, AnimeSummary, Episode, Season},
};

/// Trait that all catalog sources must implement.
///
/// Each method issues exactly one request. Implementations do not retry and
/// do not follow pagination.
///
/// # Required Methods
///
/// * [`id()`](Source::id) - Unique identifier for the source
/// * [`name()`](Source::name) - Human-readable name
/// * [`base_url()`](Source::base_url) - Base URL of the API
/// * [`fetch_season()`](Source::fetch_season) - Seasonal listing
/// * [`fetch_anime()`](Source::fetch_anime) - Single anime record
/// * [`fetch_episodes()`](Source::fetch_episodes) - Episode listing
///
/// # Examples
///
/// ```rust
/// use kisetsu::prelude::*;
/// use async_trait::async_trait;
///
/// struct EmptyCatalog;
///
/// #[async_trait]
/// impl Source for EmptyCatalog {
///     fn id(&self) -> &'static str { "empty" }
///     fn name(&self) -> &'static str { "Empty Catalog" }
///     fn base_url(&self) -> &str { "memory://" }
///
///     async fn fetch_season(&self, _year: i32, _season: Season) -> kisetsu::Result<Vec<AnimeSummary>> {
///         Ok(vec![])
///     }
///
///     async fn fetch_anime(&self, id: u32) -> kisetsu::Result<AnimeDetail> {
///         Err(kisetsu::Error::not_found(format!("anime {}", id)))
///     }
///
///     async fn fetch_episodes(&self, _id: u32) -> kisetsu::Result<Vec<Episode>> {
///         Ok(vec![])
///     }
/// }
/// ```
#[async_trait]
pub trait Source: Send + Sync {
    /// Returns the unique identifier for this source.
    fn id(&self) -> &'static str;

    /// Returns the human-readable name of this source.
    ///
    /// Shown in the footer attribution.
    fn name(&self) -> &'static str;

    /// Returns the API root, without a trailing slash.
    fn base_url(&self) -> &str;

    /// Fetches the listing for one broadcast season.
    ///
    /// The returned order is the API order. Only the first page is read.
    ///
    /// # Errors
    ///
    /// * [`Error::Network`](crate::Error::Network) - For connection issues
    /// * [`Error::Http`](crate::Error::Http) - For non-success statuses
    /// * [`Error::Json`](crate::Error::Json) - For malformed bodies
    async fn fetch_season(&self, year: i32, season: Season) -> Result<Vec<AnimeSummary>>;

    /// Fetches the full record for one anime.
    ///
    /// # Errors
    ///
    /// * [`Error::Http`](crate::Error::Http) - For unknown ids (HTTP 404)
    /// * [`Error::NotFound`](crate::Error::NotFound) - When the body carries no record
    async fn fetch_anime(&self, id: u32) -> Result<AnimeDetail>;

    /// Fetches the episode listing for one anime.
    ///
    /// An anime without episode data yields an empty vector, not an error.
    async fn fetch_episodes(&self, id: u32) -> Result<Vec<Episode>>;
}
