//! Encoded query parameter values and the shared input normalization.
//!
//! Every decoder in the crate funnels its input through [`encoded_value`] or
//! [`encoded_value_array`], so the array/null/empty policy lives here once.

use crate::Decoded;

/// The textual form of a query parameter, as read from or written to a
/// query string.
///
/// - `Absent`: the key is not present (on output: the key is removed).
/// - `Null`: the key is present without a value, as in `?flag`.
/// - `Single`: a single `key=value` pair.
/// - `Multiple`: a repeated key, in order. A `None` entry is a repeated bare
///   key.
///
/// # Examples
///
/// ```
/// use query_param_codec::Encoded;
///
/// let single = Encoded::from("10");
/// assert_eq!(single.first(), Some("10"));
///
/// let repeated = Encoded::from(vec!["a", "b"]);
/// assert_eq!(repeated.first(), Some("a"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Encoded {
    /// Key not present
    #[default]
    Absent,
    /// Key present without a value
    Null,
    /// A single value
    Single(String),
    /// A repeated key
    Multiple(Vec<Option<String>>),
}

impl Encoded {
    /// Returns `true` if the key is not present.
    pub fn is_absent(&self) -> bool {
        matches!(self, Encoded::Absent)
    }

    /// Returns the first textual value, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            Encoded::Single(s) => Some(s),
            Encoded::Multiple(values) => values.first().and_then(|v| v.as_deref()),
            Encoded::Absent | Encoded::Null => None,
        }
    }
}

impl From<&str> for Encoded {
    fn from(value: &str) -> Self {
        Encoded::Single(value.to_string())
    }
}

impl From<String> for Encoded {
    fn from(value: String) -> Self {
        Encoded::Single(value)
    }
}

impl From<Vec<&str>> for Encoded {
    fn from(values: Vec<&str>) -> Self {
        Encoded::Multiple(values.into_iter().map(|v| Some(v.to_string())).collect())
    }
}

impl From<Vec<String>> for Encoded {
    fn from(values: Vec<String>) -> Self {
        Encoded::Multiple(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<String>>> for Encoded {
    fn from(values: Vec<Option<String>>) -> Self {
        Encoded::Multiple(values)
    }
}

/// `Invalid` encodes like `Absent`: an invalid value is never written.
impl From<Decoded<String>> for Encoded {
    fn from(value: Decoded<String>) -> Self {
        match value {
            Decoded::Absent | Decoded::Invalid => Encoded::Absent,
            Decoded::Null => Encoded::Null,
            Decoded::Value(s) => Encoded::Single(s),
        }
    }
}

/// Reduces an encoded input to a single string.
///
/// Only the first entry of a repeated key is considered. An empty string is
/// `Null` unless `allow_empty` is set.
pub(crate) fn encoded_value(input: &Encoded, allow_empty: bool) -> Decoded<&str> {
    let text = match input {
        Encoded::Absent => return Decoded::Absent,
        Encoded::Null => return Decoded::Null,
        Encoded::Single(s) => s.as_str(),
        Encoded::Multiple(values) => match values.first() {
            Some(Some(s)) => s.as_str(),
            Some(None) | None => return Decoded::Null,
        },
    };

    if text.is_empty() && !allow_empty {
        return Decoded::Null;
    }
    Decoded::Value(text)
}

/// Normalizes an encoded input to a sequence of entries.
///
/// An empty string is an empty sequence; a single string is a one-element
/// sequence.
pub(crate) fn encoded_value_array(input: &Encoded) -> Decoded<Vec<Option<String>>> {
    match input {
        Encoded::Absent => Decoded::Absent,
        Encoded::Null => Decoded::Null,
        Encoded::Single(s) if s.is_empty() => Decoded::Value(Vec::new()),
        Encoded::Single(s) => Decoded::Value(vec![Some(s.clone())]),
        Encoded::Multiple(values) => Decoded::Value(values.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_value_takes_first_entry() {
        let input = Encoded::from(vec!["x", "y"]);
        assert_eq!(encoded_value(&input, false), Decoded::Value("x"));
    }

    #[test]
    fn encoded_value_empty_policy() {
        let empty = Encoded::from("");
        assert_eq!(encoded_value(&empty, false), Decoded::Null);
        assert_eq!(encoded_value(&empty, true), Decoded::Value(""));

        let empty_first = Encoded::from(vec!["", "b"]);
        assert_eq!(encoded_value(&empty_first, false), Decoded::Null);
        assert_eq!(encoded_value(&empty_first, true), Decoded::Value(""));
    }

    #[test]
    fn encoded_value_empty_sequence_is_null() {
        let input = Encoded::Multiple(Vec::new());
        assert_eq!(encoded_value(&input, false), Decoded::Null);
        assert_eq!(encoded_value(&input, true), Decoded::Null);
    }

    #[test]
    fn encoded_value_null_first_entry() {
        let input = Encoded::Multiple(vec![None, Some("a".to_string())]);
        assert_eq!(encoded_value(&input, true), Decoded::Null);
    }

    #[test]
    fn encoded_value_preserves_absence() {
        assert_eq!(encoded_value(&Encoded::Absent, false), Decoded::Absent);
        assert_eq!(encoded_value(&Encoded::Null, true), Decoded::Null);
    }

    #[test]
    fn encoded_value_array_normalizes() {
        assert_eq!(encoded_value_array(&Encoded::Absent), Decoded::Absent);
        assert_eq!(encoded_value_array(&Encoded::Null), Decoded::Null);
        assert_eq!(
            encoded_value_array(&Encoded::from("")),
            Decoded::Value(Vec::new())
        );
        assert_eq!(
            encoded_value_array(&Encoded::from("a")),
            Decoded::Value(vec![Some("a".to_string())])
        );
        let repeated = Encoded::Multiple(vec![Some("a".to_string()), None]);
        assert_eq!(
            encoded_value_array(&repeated),
            Decoded::Value(vec![Some("a".to_string()), None])
        );
    }

    #[test]
    fn decoded_string_into_encoded() {
        assert_eq!(Encoded::from(Decoded::<String>::Absent), Encoded::Absent);
        assert_eq!(Encoded::from(Decoded::<String>::Invalid), Encoded::Absent);
        assert_eq!(Encoded::from(Decoded::<String>::Null), Encoded::Null);
        assert_eq!(
            Encoded::from(Decoded::Value("v".to_string())),
            Encoded::Single("v".to_string())
        );
    }
}
