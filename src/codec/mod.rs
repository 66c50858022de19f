//! Primitive codecs: one encode/decode pair per supported value shape.
//!
//! Each shape is available both as a pair of free functions
//! (`encode_number` / `decode_number`, ...) and as a small codec struct
//! implementing [`Codec`] (`NumberParam`, ...) that can be registered in a
//! [`ParamConfigMap`](crate::ParamConfigMap).
//!
//! Decoders share one input policy: only the first entry of a repeated key
//! is read, `Absent` and `Null` inputs pass through, and an empty string
//! decodes to `Null` unless the shape allows empty strings (string, enum,
//! delimited array and flat object shapes do).

mod array;
mod date;
mod json;
mod number;
mod object;
mod scalar;

pub use array::{
    decode_array, decode_delimited_array, decode_delimited_numeric_array, decode_numeric_array,
    encode_array, encode_delimited_array, encode_delimited_numeric_array, encode_numeric_array,
    ArrayParam, DelimitedArrayParam, DelimitedNumericArrayParam, NumericArrayParam,
};
pub use date::{
    decode_date, decode_date_time, encode_date, encode_date_time, DateParam, DateTimeParam,
};
pub use json::{decode_json, encode_json, JsonParam};
pub use number::{decode_number, encode_number, NumberParam};
pub use object::{
    decode_numeric_object, decode_object, encode_numeric_object, encode_object, FlatObject,
    NumericObject, NumericObjectParam, ObjectParam,
};
pub use scalar::{
    decode_boolean, decode_enum, decode_string, encode_boolean, encode_enum, encode_string,
    BooleanParam, EnumParam, StringParam,
};

pub(crate) use number::number_to_string;

use crate::{Decoded, Encoded, Error};

/// Separator placed between entries of delimited arrays and flat objects.
pub const DEFAULT_ENTRY_SEPARATOR: &str = "_";

/// Separator placed between a key and its value in flat objects.
pub const DEFAULT_KEY_VALUE_SEPARATOR: &str = "-";

/// A paired encoder/decoder for one value shape.
///
/// Implementations are pure and total: they never panic and hold no mutable
/// state, so a single codec can be shared by any number of threads.
///
/// For every well-formed `v` the codec supports,
/// `decode(&encode(Decoded::Value(&v)))` yields `Decoded::Value(v)`.
///
/// # Examples
///
/// ```
/// use query_param_codec::{BooleanParam, Codec, Decoded, Encoded};
///
/// let codec = BooleanParam;
/// let encoded = codec.encode(Decoded::Value(&true));
/// assert_eq!(encoded, Encoded::from("1"));
/// assert_eq!(codec.decode(&encoded), Decoded::Value(true));
/// ```
pub trait Codec: Send + Sync {
    /// The decoded, in-memory type.
    type Value;

    /// Encodes a value into its query string form.
    fn encode(&self, value: Decoded<&Self::Value>) -> Encoded;

    /// Decodes a query string input into a value.
    fn decode(&self, input: &Encoded) -> Decoded<Self::Value>;
}

pub(crate) fn check_separator(separator: &str) -> Result<String, Error> {
    if separator.is_empty() {
        return Err(Error::EmptySeparator);
    }
    Ok(separator.to_string())
}

/// Splits delimited text. An empty separator splits into characters.
pub(crate) fn split_entries(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return text.chars().map(String::from).collect();
    }
    text.split(separator).map(str::to_string).collect()
}

/// Applies an encoder to the value, passing `Absent`/`Null`/`Invalid` through.
pub(crate) fn encode_with<T>(value: Decoded<&T>, f: impl FnOnce(&T) -> String) -> Encoded {
    Encoded::from(value.map(f))
}
