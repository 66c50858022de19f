use time::OffsetDateTime;
use url::Url;

use super::query_string::{parse_query, stringify_query, StringifyOptions};
use crate::EncodedQuery;

/// A snapshot of the current URL as a router sees it.
///
/// Updates never modify a `Location`; they return a new one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// The full URL
    pub href: String,
    /// The path, without query or fragment
    pub pathname: String,
    /// The query, with its leading `?`, or empty
    pub search: String,
    /// The fragment, with its leading `#`, or empty
    pub hash: String,
    /// The parsed query
    pub query: EncodedQuery,
    /// Changes on every update; `None` for a location not produced by one
    pub key: Option<String>,
}

impl Location {
    /// Builds a location from an absolute or relative URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use query_param_codec::location::Location;
    /// use query_param_codec::Encoded;
    ///
    /// let location = Location::new("https://example.com/items?page=2#list");
    /// assert_eq!(location.pathname, "/items");
    /// assert_eq!(location.search, "?page=2");
    /// assert_eq!(location.hash, "#list");
    /// assert_eq!(location.query["page"], Encoded::from("2"));
    /// ```
    pub fn new(href: impl Into<String>) -> Self {
        let href = href.into();
        let (rest, hash) = match href.find('#') {
            Some(at) => (&href[..at], href[at..].to_string()),
            None => (href.as_str(), String::new()),
        };
        let (base, search) = match rest.find('?') {
            Some(at) => (&rest[..at], rest[at..].to_string()),
            None => (rest, String::new()),
        };
        let pathname = match Url::parse(base) {
            Ok(url) => url.path().to_string(),
            Err(_) => base.to_string(),
        };
        let query = parse_query(&search);

        Self {
            pathname,
            search,
            hash,
            query,
            key: None,
            href,
        }
    }
}

/// Returns a copy of `location` with its query replaced by `encoded`.
///
/// `href` keeps everything before the old query and drops the fragment.
/// `hash` and `pathname` are copied unchanged and `key` is refreshed.
pub fn update_location(
    encoded: &EncodedQuery,
    location: &Location,
    options: &StringifyOptions,
) -> Location {
    let query_string = stringify_query(encoded, options);
    let search = if query_string.is_empty() {
        String::new()
    } else {
        format!("?{}", query_string)
    };
    let href = format!("{}{}", strip_query_and_fragment(&location.href), search);

    tracing::trace!(target: "query_params", href = %href, "location updated");

    Location {
        href,
        search,
        query: encoded.clone(),
        key: Some(fresh_key()),
        ..location.clone()
    }
}

/// Merges `replacements` into the query of `location`.
///
/// Parameters not named in `replacements` keep their current text. A
/// replacement of `Encoded::Absent` removes the parameter.
pub fn update_in_location(
    replacements: &EncodedQuery,
    location: &Location,
    options: &StringifyOptions,
) -> Location {
    let mut merged = parse_query(&location.search);
    for (name, value) in replacements {
        merged.insert(name.clone(), value.clone());
    }
    update_location(&merged, location, options)
}

fn strip_query_and_fragment(href: &str) -> &str {
    match href.find(|c: char| c == '?' || c == '#') {
        Some(at) => &href[..at],
        None => href,
    }
}

fn fresh_key() -> String {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000).to_string()
}
