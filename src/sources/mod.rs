//! Catalog source implementations.
//!
//! # Available Sources
//!
//! - [`JikanSource`] - Jikan v4, the unofficial MyAnimeList REST API

pub mod jikan;

pub use jikan::{JIKAN_BASE_URL, JikanSource};
