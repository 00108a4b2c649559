//! Routes and the static navigation chrome.
//!
//! ```rust
//! use kisetsu::nav::Route;
//!
//! assert_eq!(Route::parse("/anime/52991"), Some(Route::Anime(52991)));
//! assert_eq!(Route::Anime(52991).path(), "/anime/52991");
//! assert_eq!(Route::parse("/anime/abc"), None);
//! ```

use std::fmt;

/// Every route the application declares.
///
/// Only [`Home`](Route::Home), [`Anime`](Route::Anime) and
/// [`Contact`](Route::Contact) have pages. The rest render a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Anime(u32),
    Contact,
    Browse,
    Favorites,
    Categories,
}

impl Route {
    /// Parses a path such as `/anime/21`. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Home),
            "/contact" => Some(Route::Contact),
            "/browse" => Some(Route::Browse),
            "/favorites" => Some(Route::Favorites),
            "/categories" => Some(Route::Categories),
            other => other
                .strip_prefix("/anime/")
                .and_then(|id| id.parse::<u32>().ok())
                .map(Route::Anime),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Anime(id) => format!("/anime/{}", id),
            Route::Contact => "/contact".to_string(),
            Route::Browse => "/browse".to_string(),
            Route::Favorites => "/favorites".to_string(),
            Route::Categories => "/categories".to_string(),
        }
    }

    /// Whether a real page backs the route.
    pub fn is_implemented(&self) -> bool {
        matches!(self, Route::Home | Route::Anime(_) | Route::Contact)
    }

    /// Index into [`NAV_ITEMS`] of the entry to highlight.
    ///
    /// Detail pages highlight nothing.
    pub fn nav_index(&self) -> Option<usize> {
        NAV_ITEMS.iter().position(|item| item.route == *self)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// One link of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
}

/// Application name shown in the navigation bar.
pub const BRAND: &str = "AnimeScraper";

/// Navigation bar links, in display order.
pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem { label: "Home", route: Route::Home },
    NavItem { label: "Browse", route: Route::Browse },
    NavItem { label: "Favorites", route: Route::Favorites },
    NavItem { label: "Contact Us", route: Route::Contact },
    NavItem { label: "Categories", route: Route::Categories },
];

/// Genres offered on the categories screen, row by row.
pub const GENRES: [&str; 15] = [
    "Action",
    "Music",
    "Shonen",
    "Adventure",
    "Romance",
    "Slice of life",
    "Comedy",
    "Sci-Fi",
    "Sports",
    "Drama",
    "Seinen",
    "Supernatural",
    "Fantasy",
    "Shojo",
    "Thriller",
];

/// Columns of the genre grid.
pub const GENRE_COLUMNS: usize = 3;
