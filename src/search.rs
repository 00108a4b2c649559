//! Client-side search over a seasonal listing.
//!
//! The filter is a pure function of the listing and the term. It makes no
//! network calls, and pages recompute it on every keystroke.
//!
//! Matching rules:
//!
//! - The term is trimmed. An empty result leaves the listing unchanged.
//! - Otherwise an entry matches when its lowercase `title` or lowercase
//!   `title_english` contains the lowercase term.
//! - Matches keep their original order.
//!
//! # Examples
//!
//! ```rust
//! use kisetsu::prelude::*;
//! # fn anime(id: u32, title: &str, english: Option<&str>) -> AnimeSummary {
//! #     AnimeSummary {
//! #         id, title: title.into(), title_english: english.map(Into::into),
//! #         image_url: String::new(), synopsis: None, status: AiringStatus::CurrentlyAiring,
//! #         aired: String::new(), genres: vec![], score: None,
//! #     }
//! # }
//!
//! let listing = vec![
//!     anime(1, "Dandadan", None),
//!     anime(2, "Kaiju No. 8", Some("Kaiju No. 8")),
//!     anime(3, "Ore dake Level Up na Ken", Some("Solo Leveling")),
//! ];
//!
//! let hits = filter_anime(&listing, "  LEVEL ");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id, 3);
//!
//! assert_eq!(filter_anime(&listing, "   ").len(), 3);
//! ```

use crate::types::AnimeSummary;

/// Reports whether one entry matches the search term.
///
/// An empty or whitespace-only term matches everything.
///
/// ```rust
/// use kisetsu::search::matches_term;
/// # use kisetsu::types::*;
/// # let anime = AnimeSummary {
/// #     id: 1, title: "Sakamoto Days".into(), title_english: None,
/// #     image_url: String::new(), synopsis: None, status: AiringStatus::FinishedAiring,
/// #     aired: String::new(), genres: vec![], score: None,
/// # };
/// assert!(matches_term(&anime, "days"));
/// assert!(matches_term(&anime, ""));
/// assert!(!matches_term(&anime, "nights"));
/// ```
pub fn matches_term(anime: &AnimeSummary, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    needle.is_empty() || matches_needle(anime, &needle)
}

fn matches_needle(anime: &AnimeSummary, needle: &str) -> bool {
    anime.title.to_lowercase().contains(needle)
        || anime
            .title_english
            .as_deref()
            .is_some_and(|english| english.to_lowercase().contains(needle))
}

/// Returns the entries of `list` matching `term`, in their original order.
///
/// Filtering twice with the same term yields the same result as filtering once.
pub fn filter_anime(list: &[AnimeSummary], term: &str) -> Vec<AnimeSummary> {
    filter_refs(list, term).into_iter().cloned().collect()
}

/// Borrowing variant of [`filter_anime`], used by the page views.
pub fn filter_refs<'a>(list: &'a [AnimeSummary], term: &str) -> Vec<&'a AnimeSummary> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return list.iter().collect();
    }

    list.iter().filter(|anime| matches_needle(anime, &needle)).collect()
}

/// Extension trait providing search on owned listings.
///
/// ```rust
/// use kisetsu::prelude::*;
///
/// let listing: Vec<AnimeSummary> = Vec::new();
/// assert!(listing.matching("frieren").is_empty());
/// ```
pub trait AnimeListExt {
    /// Keeps only the entries matching `term`.
    fn matching(self, term: &str) -> Self;
}

impl AnimeListExt for Vec<AnimeSummary> {
    fn matching(mut self, term: &str) -> Self {
        let needle = term.trim().to_lowercase();
        if !needle.is_empty() {
            self.retain(|anime| matches_needle(anime, &needle));
        }
        self
    }
}
