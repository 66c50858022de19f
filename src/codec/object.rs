use indexmap::IndexMap;

use crate::encoded::encoded_value;
use crate::{Decoded, Encoded, Error};

use super::number::{decode_number, number_to_string};
use super::{
    check_separator, encode_with, split_entries, Codec, DEFAULT_ENTRY_SEPARATOR,
    DEFAULT_KEY_VALUE_SEPARATOR,
};

/// A flat key/value object with string values, in insertion order.
///
/// A `None` value is an entry written without a key/value separator.
pub type FlatObject = IndexMap<String, Option<String>>;

/// A flat key/value object with numeric values, in insertion order.
pub type NumericObject = IndexMap<String, Decoded<f64>>;

/// Encodes a flat object as `key-value_key-value`.
///
/// An empty object encodes to the empty string.
///
/// # Examples
///
/// ```
/// use query_param_codec::{encode_object, Decoded, Encoded, FlatObject};
///
/// let mut object = FlatObject::new();
/// object.insert("foo".to_string(), Some("bar".to_string()));
/// object.insert("boo".to_string(), Some("baz".to_string()));
/// assert_eq!(encode_object(Decoded::Value(&object), "-", "_"), Encoded::from("foo-bar_boo-baz"));
/// ```
pub fn encode_object(
    value: Decoded<&FlatObject>,
    key_value_separator: &str,
    entry_separator: &str,
) -> Encoded {
    encode_with(value, |object| {
        join_entries(
            object.iter().map(|(key, value)| (key, value.as_deref())),
            key_value_separator,
            entry_separator,
        )
    })
}

/// Decodes a flat object.
///
/// Entries are split on `entry_separator`, then each entry is split at the
/// first `key_value_separator` only, so values may contain it.
///
/// # Examples
///
/// ```
/// use query_param_codec::{decode_object, Encoded};
///
/// let object = decode_object(&Encoded::from("foo-bar_boo-baz-qux"), "-", "_")
///     .into_option()
///     .unwrap();
/// assert_eq!(object["foo"].as_deref(), Some("bar"));
/// assert_eq!(object["boo"].as_deref(), Some("baz-qux"));
/// ```
pub fn decode_object(
    input: &Encoded,
    key_value_separator: &str,
    entry_separator: &str,
) -> Decoded<FlatObject> {
    encoded_value(input, true).map(|text| {
        let mut object = FlatObject::new();
        if text.is_empty() {
            return object;
        }
        for entry in split_entries(text, entry_separator) {
            let (key, value) = match entry.split_once(key_value_separator) {
                Some((key, value)) => (key.to_string(), Some(value.to_string())),
                None => (entry.clone(), None),
            };
            object.insert(key, value);
        }
        object
    })
}

/// Encodes a flat numeric object as `key-1_key-2`.
///
/// An absent value is written as the bare key and a `Null` value as the key
/// followed by the separator, so both survive a round trip.
pub fn encode_numeric_object(
    value: Decoded<&NumericObject>,
    key_value_separator: &str,
    entry_separator: &str,
) -> Encoded {
    encode_with(value, |object| {
        let texts: Vec<(&String, Option<String>)> = object
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Decoded::Value(n) => Some(number_to_string(*n)),
                    Decoded::Null => Some(String::new()),
                    Decoded::Absent | Decoded::Invalid => None,
                };
                (key, text)
            })
            .collect();
        join_entries(
            texts.iter().map(|(key, text)| (*key, text.as_deref())),
            key_value_separator,
            entry_separator,
        )
    })
}

/// Decodes a flat object whose values are numbers.
///
/// Each value goes through [`decode_number`]: an empty value is `Null`, a
/// missing one `Absent` and a malformed one NaN.
pub fn decode_numeric_object(
    input: &Encoded,
    key_value_separator: &str,
    entry_separator: &str,
) -> Decoded<NumericObject> {
    decode_object(input, key_value_separator, entry_separator).map(|object| {
        object
            .into_iter()
            .map(|(key, value)| {
                let encoded = value.map_or(Encoded::Absent, Encoded::Single);
                (key, decode_number(&encoded))
            })
            .collect()
    })
}

fn join_entries<'a, I>(entries: I, key_value_separator: &str, entry_separator: &str) -> String
where
    I: Iterator<Item = (&'a String, Option<&'a str>)>,
{
    entries
        .map(|(key, value)| match value {
            Some(value) => format!("{}{}{}", key, key_value_separator, value),
            None => key.clone(),
        })
        .collect::<Vec<_>>()
        .join(entry_separator)
}

/// Codec for flat string objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectParam {
    key_value_separator: String,
    entry_separator: String,
}

impl ObjectParam {
    /// Creates a codec with the default `-` and `_` separators.
    pub fn new() -> Self {
        Self {
            key_value_separator: DEFAULT_KEY_VALUE_SEPARATOR.to_string(),
            entry_separator: DEFAULT_ENTRY_SEPARATOR.to_string(),
        }
    }

    /// Creates a codec with custom separators.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySeparator`] if either separator is empty.
    pub fn with_separators(
        key_value_separator: &str,
        entry_separator: &str,
    ) -> Result<Self, Error> {
        Ok(Self {
            key_value_separator: check_separator(key_value_separator)?,
            entry_separator: check_separator(entry_separator)?,
        })
    }
}

impl Default for ObjectParam {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for ObjectParam {
    type Value = FlatObject;

    fn encode(&self, value: Decoded<&FlatObject>) -> Encoded {
        encode_object(value, &self.key_value_separator, &self.entry_separator)
    }

    fn decode(&self, input: &Encoded) -> Decoded<FlatObject> {
        decode_object(input, &self.key_value_separator, &self.entry_separator)
    }
}

/// Codec for flat numeric objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericObjectParam {
    key_value_separator: String,
    entry_separator: String,
}

impl NumericObjectParam {
    /// Creates a codec with the default `-` and `_` separators.
    pub fn new() -> Self {
        Self {
            key_value_separator: DEFAULT_KEY_VALUE_SEPARATOR.to_string(),
            entry_separator: DEFAULT_ENTRY_SEPARATOR.to_string(),
        }
    }

    /// Creates a codec with custom separators.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySeparator`] if either separator is empty.
    pub fn with_separators(
        key_value_separator: &str,
        entry_separator: &str,
    ) -> Result<Self, Error> {
        Ok(Self {
            key_value_separator: check_separator(key_value_separator)?,
            entry_separator: check_separator(entry_separator)?,
        })
    }
}

impl Default for NumericObjectParam {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for NumericObjectParam {
    type Value = NumericObject;

    fn encode(&self, value: Decoded<&NumericObject>) -> Encoded {
        encode_numeric_object(value, &self.key_value_separator, &self.entry_separator)
    }

    fn decode(&self, input: &Encoded) -> Decoded<NumericObject> {
        decode_numeric_object(input, &self.key_value_separator, &self.entry_separator)
    }
}
