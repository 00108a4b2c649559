//! # Kisetsu - Seasonal anime catalog viewer
//!
//! Kisetsu browses the seasonal anime catalog published by the Jikan API. The
//! library holds everything that is not drawing: a typed API client, the
//! fetch lifecycle the pages share, the search filter and the page state
//! machines. The `kisetsu-tui` binary (feature `tui`) renders them in a
//! terminal.
//!
//! ## Features
//!
//! - **Typed Jikan client**: seasonal listings, anime details and episodes
//! - **Fetch lifecycle**: Idle → Loading → Ready/Error with stale-result rejection
//! - **Concurrent detail load**: anime and episodes joined, no partial render
//! - **Client-side search**: case-insensitive match on either title
//! - **Page state without a terminal**: every transition is testable
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kisetsu::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> kisetsu::Result<()> {
//!     let source = JikanSource::new();
//!     let listing = source.fetch_season(2025, Season::Summer).await?;
//!
//!     let hits = listing.matching("kaiju");
//!     println!("{}", kisetsu::pages::series_label(hits.len()));
//!
//!     if let Some(anime) = hits.first() {
//!         let detail = load_detail(&source, anime.id).await?;
//!         println!("{} episodes listed", detail.episodes.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Driving a page
//!
//! Pages hand out a [`Ticket`](fetch::Ticket) when a fetch should start. The
//! caller runs the request and hands the result back together with the
//! ticket:
//!
//! ```rust,no_run
//! use kisetsu::prelude::*;
//!
//! # async fn example() {
//! let source = JikanSource::new();
//! let mut page = HomePage::new(2025, Season::Summer);
//!
//! if let Some(ticket) = page.enter() {
//!     if let Some(result) = ticket.run(load_season(&source, page.key())).await {
//!         page.resolve(&ticket, result);
//!     }
//! }
//!
//! match page.view() {
//!     ListView::Grid(items) => println!("{} cards", items.len()),
//!     ListView::EmptyListing => println!("No anime found"),
//!     other => println!("{:?}", other),
//! }
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`source`]: Core trait for catalog sources
//! - [`sources`]: The Jikan implementation
//! - [`fetch`]: Fetch phases, tickets and the detail join
//! - [`search`]: Title filter
//! - [`pages`]: Home, detail and contact page state
//! - [`nav`]: Routes and navigation chrome
//! - [`types`]: Anime, episode and season records
//! - [`net`]: HTTP client and JSON envelope helpers
//! - [`config`] and [`logging`]: Ambient setup for the binary
//! - [`error`]: Error handling

pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod nav;
pub mod net;
pub mod pages;
pub mod search;
pub mod source;
pub mod sources;
pub mod types;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude module for convenient imports.
///
/// ```rust
/// use kisetsu::prelude::*;
///
/// // Now you have access to:
/// // - Source, JikanSource
/// // - FetchState, Phase, Ticket, load_season, load_detail
/// // - HomePage, DetailPage, ContactForm and their views
/// // - AnimeSummary, AnimeDetail, Episode, Season
/// ```
pub mod prelude {
    pub use crate::{
        fetch::{DetailData, FetchState, Phase, Ticket, load_detail, load_season},
        nav::Route,
        pages::{ContactForm, DetailPage, DetailView, HomePage, ListView},
        search::{AnimeListExt, filter_anime, matches_term},
        source::Source,
        sources::JikanSource,
        types::{AiringStatus, AnimeDetail, AnimeSummary, Episode, Season},
    };

    #[cfg(feature = "tui")]
    pub use crate::tui::*;
}

// Re-export main types at crate root for direct access
pub use error::{Error, Result};
pub use search::{AnimeListExt, filter_anime, matches_term};
pub use source::Source;
pub use types::{AiringStatus, AnimeDetail, AnimeSummary, Episode, Season};
