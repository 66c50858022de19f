use crate::encoded::{encoded_value, encoded_value_array};
use crate::{Decoded, Encoded, Error};

use super::number::{numeric_entry, number_to_string};
use super::{check_separator, encode_with, split_entries, Codec, DEFAULT_ENTRY_SEPARATOR};

/// Encodes an array as a repeated key (`?a=x&a=y`).
pub fn encode_array(value: Decoded<&Vec<Option<String>>>) -> Encoded {
    match value {
        Decoded::Absent | Decoded::Invalid => Encoded::Absent,
        Decoded::Null => Encoded::Null,
        Decoded::Value(entries) => Encoded::Multiple(entries.clone()),
    }
}

/// Decodes a repeated key into an array.
///
/// A single value becomes a one-element array and an empty string an empty
/// array.
///
/// # Examples
///
/// ```
/// use query_param_codec::{decode_array, Decoded, Encoded};
///
/// assert_eq!(decode_array(&Encoded::from("a")), Decoded::Value(vec![Some("a".to_string())]));
/// assert_eq!(decode_array(&Encoded::from("")), Decoded::Value(vec![]));
/// ```
pub fn decode_array(input: &Encoded) -> Decoded<Vec<Option<String>>> {
    encoded_value_array(input)
}

/// Encodes a numeric array as a repeated key.
///
/// `None` entries are written as bare repeated keys.
pub fn encode_numeric_array(value: Decoded<&Vec<Option<f64>>>) -> Encoded {
    match value {
        Decoded::Absent | Decoded::Invalid => Encoded::Absent,
        Decoded::Null => Encoded::Null,
        Decoded::Value(entries) => Encoded::Multiple(
            entries
                .iter()
                .map(|entry| entry.map(number_to_string))
                .collect(),
        ),
    }
}

/// Decodes a repeated key into numbers.
///
/// Empty and missing entries are `None`; malformed entries are NaN.
pub fn decode_numeric_array(input: &Encoded) -> Decoded<Vec<Option<f64>>> {
    decode_array(input).map(|entries| {
        entries
            .iter()
            .map(|entry| numeric_entry(entry.as_deref()))
            .collect()
    })
}

/// Encodes an array as one string, entries joined by `separator`.
///
/// # Examples
///
/// ```
/// use query_param_codec::{encode_delimited_array, Decoded, Encoded};
///
/// let value = vec!["a".to_string(), "b".to_string()];
/// assert_eq!(encode_delimited_array(Decoded::Value(&value), "_"), Encoded::from("a_b"));
/// ```
pub fn encode_delimited_array(value: Decoded<&Vec<String>>, separator: &str) -> Encoded {
    encode_with(value, |entries| entries.join(separator))
}

/// Decodes a delimited string into an array.
///
/// An empty string is an empty array. When the input is a repeated key only
/// the first value is split.
///
/// # Examples
///
/// ```
/// use query_param_codec::{decode_delimited_array, Decoded, Encoded};
///
/// assert_eq!(
///     decode_delimited_array(&Encoded::from("a_b_c"), "_"),
///     Decoded::Value(vec!["a".to_string(), "b".to_string(), "c".to_string()])
/// );
/// assert_eq!(decode_delimited_array(&Encoded::from(""), "_"), Decoded::Value(vec![]));
/// ```
pub fn decode_delimited_array(input: &Encoded, separator: &str) -> Decoded<Vec<String>> {
    encoded_value(input, true).map(|text| {
        if text.is_empty() {
            Vec::new()
        } else {
            split_entries(text, separator)
        }
    })
}

/// Encodes a numeric array as one delimited string.
///
/// A `None` entry is written as an empty segment.
pub fn encode_delimited_numeric_array(
    value: Decoded<&Vec<Option<f64>>>,
    separator: &str,
) -> Encoded {
    encode_with(value, |entries| {
        entries
            .iter()
            .map(|entry| entry.map(number_to_string).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(separator)
    })
}

/// Decodes a delimited string into numbers.
///
/// Empty segments are `None`; malformed segments are NaN.
pub fn decode_delimited_numeric_array(
    input: &Encoded,
    separator: &str,
) -> Decoded<Vec<Option<f64>>> {
    decode_delimited_array(input, separator).map(|entries| {
        entries
            .iter()
            .map(|entry| numeric_entry(Some(entry.as_str())))
            .collect()
    })
}

/// Codec for string arrays written as repeated keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayParam;

impl Codec for ArrayParam {
    type Value = Vec<Option<String>>;

    fn encode(&self, value: Decoded<&Self::Value>) -> Encoded {
        encode_array(value)
    }

    fn decode(&self, input: &Encoded) -> Decoded<Self::Value> {
        decode_array(input)
    }
}

/// Codec for numeric arrays written as repeated keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericArrayParam;

impl Codec for NumericArrayParam {
    type Value = Vec<Option<f64>>;

    fn encode(&self, value: Decoded<&Self::Value>) -> Encoded {
        encode_numeric_array(value)
    }

    fn decode(&self, input: &Encoded) -> Decoded<Self::Value> {
        decode_numeric_array(input)
    }
}

/// Codec for string arrays written as one delimited value.
///
/// # Examples
///
/// ```
/// use query_param_codec::{Codec, Decoded, DelimitedArrayParam, Encoded};
///
/// let tags = DelimitedArrayParam::with_separator(",").unwrap();
/// assert_eq!(
///     tags.decode(&Encoded::from("red,blue")),
///     Decoded::Value(vec!["red".to_string(), "blue".to_string()])
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedArrayParam {
    separator: String,
}

impl DelimitedArrayParam {
    /// Creates a codec using the default `_` separator.
    pub fn new() -> Self {
        Self {
            separator: DEFAULT_ENTRY_SEPARATOR.to_string(),
        }
    }

    /// Creates a codec with a custom separator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySeparator`] if `separator` is empty.
    pub fn with_separator(separator: &str) -> Result<Self, Error> {
        Ok(Self {
            separator: check_separator(separator)?,
        })
    }

    /// Returns the entry separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Default for DelimitedArrayParam {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for DelimitedArrayParam {
    type Value = Vec<String>;

    fn encode(&self, value: Decoded<&Self::Value>) -> Encoded {
        encode_delimited_array(value, &self.separator)
    }

    fn decode(&self, input: &Encoded) -> Decoded<Self::Value> {
        decode_delimited_array(input, &self.separator)
    }
}

/// Codec for numeric arrays written as one delimited value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedNumericArrayParam {
    separator: String,
}

impl DelimitedNumericArrayParam {
    /// Creates a codec using the default `_` separator.
    pub fn new() -> Self {
        Self {
            separator: DEFAULT_ENTRY_SEPARATOR.to_string(),
        }
    }

    /// Creates a codec with a custom separator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySeparator`] if `separator` is empty.
    pub fn with_separator(separator: &str) -> Result<Self, Error> {
        Ok(Self {
            separator: check_separator(separator)?,
        })
    }

    /// Returns the entry separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Default for DelimitedNumericArrayParam {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for DelimitedNumericArrayParam {
    type Value = Vec<Option<f64>>;

    fn encode(&self, value: Decoded<&Self::Value>) -> Encoded {
        encode_delimited_numeric_array(value, &self.separator)
    }

    fn decode(&self, input: &Encoded) -> Decoded<Self::Value> {
        decode_delimited_numeric_array(input, &self.separator)
    }
}
