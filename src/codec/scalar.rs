use crate::encoded::encoded_value;
use crate::{Decoded, Encoded};

use super::{encode_with, Codec};

/// Encodes a boolean as `"1"` (true) or `"0"` (false).
pub fn encode_boolean(value: Decoded<&bool>) -> Encoded {
    encode_with(value, |b| if *b { "1" } else { "0" }.to_string())
}

/// Decodes a boolean from `"1"` or `"0"`.
///
/// Any other non-empty text is ambiguous and decodes to `Null`.
///
/// # Examples
///
/// ```
/// use query_param_codec::{decode_boolean, Decoded, Encoded};
///
/// assert_eq!(decode_boolean(&Encoded::from("1")), Decoded::Value(true));
/// assert_eq!(decode_boolean(&Encoded::from("0")), Decoded::Value(false));
/// assert_eq!(decode_boolean(&Encoded::from("yes")), Decoded::Null);
/// ```
pub fn decode_boolean(input: &Encoded) -> Decoded<bool> {
    encoded_value(input, false).and_then(|text| match text {
        "1" => Decoded::Value(true),
        "0" => Decoded::Value(false),
        _ => Decoded::Null,
    })
}

/// Encodes a string.
pub fn encode_string(value: Decoded<&String>) -> Encoded {
    encode_with(value, String::clone)
}

/// Decodes a string, keeping the empty string.
///
/// `?q=` decodes to `Value("")` while a missing `q` decodes to `Absent`.
pub fn decode_string(input: &Encoded) -> Decoded<String> {
    encoded_value(input, true).map(str::to_string)
}

/// Encodes an enum member. Members are written as plain strings.
pub fn encode_enum(value: Decoded<&String>) -> Encoded {
    encode_string(value)
}

/// Decodes an enum member.
///
/// Text outside `allowed` decodes to [`Decoded::Invalid`], which is distinct
/// from the `Null` of an empty or missing value.
///
/// # Examples
///
/// ```
/// use query_param_codec::{decode_enum, Decoded, Encoded};
///
/// let allowed = ["a", "b", "c"];
/// assert_eq!(decode_enum(&Encoded::from("b"), &allowed), Decoded::Value("b".to_string()));
/// assert_eq!(decode_enum(&Encoded::from("z"), &allowed), Decoded::Invalid);
/// ```
pub fn decode_enum<S: AsRef<str>>(input: &Encoded, allowed: &[S]) -> Decoded<String> {
    decode_string(input).and_then(|text| {
        if allowed.iter().any(|member| member.as_ref() == text) {
            Decoded::Value(text)
        } else {
            Decoded::Invalid
        }
    })
}

/// Codec for `bool` parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanParam;

impl Codec for BooleanParam {
    type Value = bool;

    fn encode(&self, value: Decoded<&bool>) -> Encoded {
        encode_boolean(value)
    }

    fn decode(&self, input: &Encoded) -> Decoded<bool> {
        decode_boolean(input)
    }
}

/// Codec for `String` parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringParam;

impl Codec for StringParam {
    type Value = String;

    fn encode(&self, value: Decoded<&String>) -> Encoded {
        encode_string(value)
    }

    fn decode(&self, input: &Encoded) -> Decoded<String> {
        decode_string(input)
    }
}

/// Codec for string parameters restricted to a fixed set of members.
///
/// # Examples
///
/// ```
/// use query_param_codec::{Codec, Decoded, EnumParam, Encoded};
///
/// let sort = EnumParam::new(["asc", "desc"]);
/// assert_eq!(sort.decode(&Encoded::from("desc")), Decoded::Value("desc".to_string()));
/// assert_eq!(sort.decode(&Encoded::from("up")), Decoded::Invalid);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumParam {
    members: Vec<String>,
}

impl EnumParam {
    /// Creates an enum codec accepting the given members.
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the accepted members.
    pub fn members(&self) -> &[String] {
        &self.members
    }
}

impl Codec for EnumParam {
    type Value = String;

    fn encode(&self, value: Decoded<&String>) -> Encoded {
        encode_enum(value)
    }

    fn decode(&self, input: &Encoded) -> Decoded<String> {
        decode_enum(input, &self.members)
    }
}
