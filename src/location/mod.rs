//! Query strings and location records.
//!
//! The engine works on [`EncodedQuery`](crate::EncodedQuery) maps. This module
//! converts those maps to and from `?a=1&b=2` text and folds them into a
//! [`Location`], the record a router or history stack keeps for the current
//! URL.
//!
//! # Example
//!
//! ```
//! use query_param_codec::location::{update_in_location, Location, StringifyOptions};
//! use query_param_codec::{Encoded, EncodedQuery};
//!
//! let current = Location::new("https://example.com/search?page=2&q=shoes#top");
//!
//! let mut changes = EncodedQuery::new();
//! changes.insert("page".to_string(), Encoded::from("3"));
//!
//! let next = update_in_location(&changes, &current, &StringifyOptions::default());
//! assert_eq!(next.search, "?page=3&q=shoes");
//! assert_eq!(next.href, "https://example.com/search?page=3&q=shoes");
//! ```

mod query_string;
mod update;

pub use query_string::{
    parse_query, stringify_query, transform_search_string_json_safe, StringifyOptions,
};
pub use update::{update_in_location, update_location, Location};
