use std::fmt;

use url::form_urlencoded;

use crate::{Encoded, EncodedQuery};

/// Options for [`stringify_query`].
#[derive(Clone, Copy)]
pub struct StringifyOptions {
    /// Sort parameters by name.
    pub sort: bool,
    /// Rewrites the finished search string, without its leading `?`.
    pub transform_search_string: Option<fn(&str) -> String>,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self {
            sort: true,
            transform_search_string: None,
        }
    }
}

impl fmt::Debug for StringifyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringifyOptions")
            .field("sort", &self.sort)
            .field(
                "transform_search_string",
                &self.transform_search_string.is_some(),
            )
            .finish()
    }
}

/// Parses a search string into encoded parameters.
///
/// A leading `?` is ignored. A key without `=` is `Null`; `key=` is an empty
/// `Single`. A repeated key becomes `Multiple`, in input order. Values are
/// never coerced; that is the decoders' job.
///
/// # Examples
///
/// ```
/// use query_param_codec::location::parse_query;
/// use query_param_codec::Encoded;
///
/// let query = parse_query("?a=1&flag&a=2&q=red+shoes");
/// assert_eq!(query["a"], Encoded::from(vec!["1", "2"]));
/// assert_eq!(query["flag"], Encoded::Null);
/// assert_eq!(query["q"], Encoded::from("red shoes"));
/// ```
pub fn parse_query(search: &str) -> EncodedQuery {
    let search = search.strip_prefix('?').unwrap_or(search);
    let mut query = EncodedQuery::new();

    for segment in search.split('&').filter(|segment| !segment.is_empty()) {
        let Some((key, value)) = form_urlencoded::parse(segment.as_bytes()).next() else {
            continue;
        };
        let value = segment.contains('=').then(|| value.into_owned());
        let key = key.into_owned();

        match query.get_mut(&key) {
            Some(existing) => push_value(existing, value),
            None => {
                let encoded = value.map_or(Encoded::Null, Encoded::Single);
                query.insert(key, encoded);
            }
        }
    }

    query
}

fn push_value(existing: &mut Encoded, value: Option<String>) {
    let mut values = match std::mem::take(existing) {
        Encoded::Absent => Vec::new(),
        Encoded::Null => vec![None],
        Encoded::Single(s) => vec![Some(s)],
        Encoded::Multiple(values) => values,
    };
    values.push(value);
    *existing = Encoded::Multiple(values);
}

/// Writes encoded parameters as a search string, without the leading `?`.
///
/// `Absent` parameters are left out and `Null` ones are written as a bare
/// key. The transform hook, if set, is applied to the result.
///
/// # Examples
///
/// ```
/// use query_param_codec::location::{stringify_query, StringifyOptions};
/// use query_param_codec::{Encoded, EncodedQuery};
///
/// let mut query = EncodedQuery::new();
/// query.insert("z".to_string(), Encoded::from("1"));
/// query.insert("gone".to_string(), Encoded::Absent);
/// query.insert("a".to_string(), Encoded::Null);
///
/// assert_eq!(stringify_query(&query, &StringifyOptions::default()), "a&z=1");
/// ```
pub fn stringify_query(query: &EncodedQuery, options: &StringifyOptions) -> String {
    let mut entries: Vec<(&String, &Encoded)> = query.iter().collect();
    if options.sort {
        entries.sort_by(|a, b| a.0.cmp(b.0));
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, encoded) in entries {
        match encoded {
            Encoded::Absent => {}
            Encoded::Null => {
                serializer.append_key_only(key);
            }
            Encoded::Single(value) => {
                serializer.append_pair(key, value);
            }
            Encoded::Multiple(values) => {
                for value in values {
                    match value {
                        Some(value) => serializer.append_pair(key, value),
                        None => serializer.append_key_only(key),
                    };
                }
            }
        }
    }
    let search = serializer.finish();

    match options.transform_search_string {
        Some(transform) => transform(&search),
        None => search,
    }
}

/// Un-escapes the JSON punctuation that form encoding escapes, so JSON
/// parameters stay readable in the address bar.
///
/// # Examples
///
/// ```
/// use query_param_codec::location::transform_search_string_json_safe;
///
/// assert_eq!(
///     transform_search_string_json_safe("f=%7B%22a%22%3A%5B1%2C2%5D%7D"),
///     r#"f={"a":[1,2]}"#
/// );
/// ```
pub fn transform_search_string_json_safe(search: &str) -> String {
    const REPLACEMENTS: [(&str, &str); 7] = [
        ("%7B", "{"),
        ("%7D", "}"),
        ("%5B", "["),
        ("%5D", "]"),
        ("%2C", ","),
        ("%22", "\""),
        ("%3A", ":"),
    ];
    REPLACEMENTS
        .iter()
        .fold(search.to_string(), |acc, (from, to)| acc.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_keeps_order_and_empty_values() {
        let query = parse_query("b=&a=1&&c");
        assert_eq!(query.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(query["b"], Encoded::from(""));
        assert_eq!(query["c"], Encoded::Null);
    }

    #[test]
    fn parse_repeated_bare_keys() {
        let query = parse_query("t&t=x&t");
        assert_eq!(
            query["t"],
            Encoded::Multiple(vec![None, Some("x".to_string()), None])
        );
    }

    #[test]
    fn parse_decodes_percent_escapes() {
        let query = parse_query("na%20me=a%26b");
        assert_eq!(query["na me"], Encoded::from("a&b"));
        assert!(parse_query("").is_empty());
        assert!(parse_query("?").is_empty());
    }

    #[test]
    fn stringify_repeated_and_unsorted() {
        let mut query = EncodedQuery::new();
        query.insert("z".to_string(), Encoded::Multiple(vec![Some("1".to_string()), None]));
        query.insert("a".to_string(), Encoded::from("x y"));
        let options = StringifyOptions {
            sort: false,
            ..StringifyOptions::default()
        };
        assert_eq!(stringify_query(&query, &options), "z=1&z&a=x+y");
    }

    #[test]
    fn stringify_then_parse_restores_values() {
        let mut query = EncodedQuery::new();
        query.insert("a".to_string(), Encoded::from("1&2=3"));
        query.insert("b".to_string(), Encoded::from(vec!["x", "y"]));
        query.insert("c".to_string(), Encoded::Null);
        let text = stringify_query(&query, &StringifyOptions::default());
        assert_eq!(parse_query(&text), query);
    }

    #[test]
    fn transform_hook_runs_last() {
        let mut query = EncodedQuery::new();
        query.insert("f".to_string(), Encoded::from(r#"{"a":1}"#));
        let options = StringifyOptions {
            transform_search_string: Some(transform_search_string_json_safe),
            ..StringifyOptions::default()
        };
        assert_eq!(stringify_query(&query, &options), r#"f={"a":1}"#);
    }
}
