//! JSON envelope helpers for Jikan-style API responses.
//!
//! Every Jikan v4 response wraps its payload in a `data` field, and list
//! endpoints add a `pagination` object next to it. These helpers walk that
//! envelope with dot notation and turn a missing or null payload into
//! [`Error::NotFound`](crate::Error::NotFound).
//!
//! # Examples
//!
//! ```rust
//! use kisetsu::net::json;
//! use serde_json::json;
//!
//! let body = json!({
//!     "data": [{"mal_id": 1, "title": "Cowboy Bebop"}],
//!     "pagination": {"has_next_page": true}
//! });
//!
//! assert!(json::has_next_page(&body));
//! let title = json::extract_path(&body, "data.0.title");
//! assert_eq!(title.and_then(|v| v.as_str()), Some("Cowboy Bebop"));
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Extracts a value from nested JSON using dot notation.
///
/// Numeric segments index into arrays.
///
/// ```rust
/// use kisetsu::net::json;
/// use serde_json::json;
///
/// let data = json!({"data": {"studios": [{"name": "Sunrise"}]}});
///
/// let studio = json::extract_path(&data, "data.studios.0.name");
/// assert_eq!(studio.and_then(|v| v.as_str()), Some("Sunrise"));
/// assert_eq!(json::extract_path(&data, "data.rating"), None);
/// ```
pub fn extract_path<'a>(json: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = json;

    for key in path.split('.') {
        current = match current {
            Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
            _ => current.get(key)?,
        };
    }

    Some(current)
}

/// Deserializes the `data` payload of a response envelope.
///
/// `what` names the requested resource in the error message.
///
/// # Errors
///
/// * [`Error::NotFound`](crate::Error::NotFound) - `data` is missing or null
/// * [`Error::Json`](crate::Error::Json) - `data` has the wrong shape
///
/// ```rust
/// use kisetsu::net::json;
/// use kisetsu::error::ErrorKind;
/// use serde_json::json;
///
/// let empty = json!({"data": null});
/// let err = json::extract_data::<Vec<u32>>(&empty, "anime 999").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::NotFound);
///
/// let ids: Vec<u32> = json::extract_data(&json!({"data": [1, 2]}), "ids").unwrap();
/// assert_eq!(ids, vec![1, 2]);
/// ```
pub fn extract_data<T>(json: &Value, what: &str) -> crate::Result<T>
where
    T: DeserializeOwned,
{
    match extract_path(json, "data") {
        None | Some(Value::Null) => Err(crate::Error::not_found(what.to_string())),
        Some(data) => T::deserialize(data).map_err(Into::into),
    }
}

/// Reports whether the envelope advertises further pages.
///
/// Only used for diagnostics. Further pages are never requested.
pub fn has_next_page(json: &Value) -> bool {
    extract_path(json, "pagination.has_next_page")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
