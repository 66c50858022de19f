use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::encoded::encoded_value;
use crate::{Decoded, Encoded};

use super::Codec;

/// Encodes any serializable value as a JSON string.
///
/// A value that cannot be serialized (a map with non-string keys, say)
/// encodes to `Null`.
pub fn encode_json<T: Serialize + ?Sized>(value: Decoded<&T>) -> Encoded {
    match value {
        Decoded::Absent | Decoded::Invalid => Encoded::Absent,
        Decoded::Null => Encoded::Null,
        Decoded::Value(v) => match serde_json::to_string(v) {
            Ok(text) => Encoded::Single(text),
            Err(err) => {
                tracing::debug!(target: "query_params", error = %err, "unserializable json value");
                Encoded::Null
            }
        },
    }
}

/// Decodes a JSON string.
///
/// Malformed JSON, or JSON that does not match `T`, decodes to `Null`.
///
/// # Examples
///
/// ```
/// use query_param_codec::{decode_json, Decoded, Encoded};
/// use serde_json::json;
///
/// let decoded: Decoded<serde_json::Value> = decode_json(&Encoded::from(r#"{"a":[1,2]}"#));
/// assert_eq!(decoded, Decoded::Value(json!({"a": [1, 2]})));
///
/// let malformed: Decoded<serde_json::Value> = decode_json(&Encoded::from("{oops"));
/// assert_eq!(malformed, Decoded::Null);
/// ```
pub fn decode_json<T: DeserializeOwned>(input: &Encoded) -> Decoded<T> {
    encoded_value(input, false).and_then(|text| match serde_json::from_str(text) {
        Ok(value) => Decoded::Value(value),
        Err(err) => {
            tracing::debug!(target: "query_params", error = %err, "malformed json parameter");
            Decoded::Null
        }
    })
}

/// Codec for JSON-encoded parameters.
///
/// Defaults to untyped [`serde_json::Value`]; any serde type can be used
/// instead.
///
/// # Examples
///
/// ```
/// use query_param_codec::{Codec, Decoded, Encoded, JsonParam};
///
/// let codec: JsonParam<Vec<u32>> = JsonParam::new();
/// assert_eq!(codec.encode(Decoded::Value(&vec![1, 2])), Encoded::from("[1,2]"));
/// assert_eq!(codec.decode(&Encoded::from("[3]")), Decoded::Value(vec![3]));
/// ```
pub struct JsonParam<T = serde_json::Value> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonParam<T> {
    /// Creates a JSON codec.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonParam<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonParam<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for JsonParam<T> {}

impl<T> fmt::Debug for JsonParam<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonParam")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Codec for JsonParam<T>
where
    T: Serialize + DeserializeOwned,
{
    type Value = T;

    fn encode(&self, value: Decoded<&T>) -> Encoded {
        encode_json(value)
    }

    fn decode(&self, input: &Encoded) -> Decoded<T> {
        decode_json(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Filter {
        field: String,
        min: Option<i32>,
    }

    #[test]
    fn json_round_trip_untyped() {
        let value = json!({"foo": "bar", "n": [1, 2.5, null]});
        let encoded = encode_json(Decoded::Value(&value));
        assert_eq!(decode_json::<Value>(&encoded), Decoded::Value(value));
    }

    #[test]
    fn json_round_trip_typed() {
        let codec: JsonParam<Filter> = JsonParam::new();
        let filter = Filter {
            field: "age".to_string(),
            min: Some(18),
        };
        let encoded = codec.encode(Decoded::Value(&filter));
        assert_eq!(encoded, Encoded::from(r#"{"field":"age","min":18}"#));
        assert_eq!(codec.decode(&encoded), Decoded::Value(filter));
    }

    #[test]
    fn json_malformed_is_null() {
        assert_eq!(decode_json::<Value>(&Encoded::from("{")), Decoded::Null);
        assert_eq!(decode_json::<Value>(&Encoded::from("")), Decoded::Null);
        assert_eq!(
            decode_json::<Filter>(&Encoded::from(r#"{"nope":1}"#)),
            Decoded::Null
        );
    }

    #[test]
    fn json_absence_passes_through() {
        assert_eq!(encode_json::<Value>(Decoded::Absent), Encoded::Absent);
        assert_eq!(encode_json::<Value>(Decoded::Null), Encoded::Null);
        assert_eq!(decode_json::<Value>(&Encoded::Absent), Decoded::Absent);
    }

    #[test]
    fn json_unserializable_is_null() {
        let mut map = HashMap::new();
        map.insert((1, 2), "tuple key");
        assert_eq!(encode_json(Decoded::Value(&map)), Encoded::Null);
    }
}
