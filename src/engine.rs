//! Whole-query encoding and decoding driven by a [`ParamConfigMap`].

use indexmap::IndexMap;

use crate::diagnostics::{default_sink, Diagnostic, DiagnosticKind, DiagnosticSink, Direction};
use crate::value::ParamValue;
use crate::{Decoded, DecodedQuery, Encoded, ParamConfigMap};

/// Encoded query parameters keyed by name, in order.
pub type EncodedQuery = IndexMap<String, Encoded>;

/// Encodes every parameter in `query` with its configured codec.
///
/// Reports diagnostics to [`default_sink`]. See
/// [`encode_query_params_with_sink`].
pub fn encode_query_params(config: &ParamConfigMap, query: &DecodedQuery) -> EncodedQuery {
    encode_query_params_with_sink(config, query, default_sink())
}

/// Encodes every parameter in `query`, reporting diagnostics to `sink`.
///
/// The result has exactly the keys of `query`, in the same order. Configured
/// parameters are not added when missing from `query`. A parameter with no
/// codec, or whose value does not match its codec's type, is written as its
/// plain string form.
///
/// # Examples
///
/// ```
/// use query_param_codec::{
///     encode_query_params_with_sink, DecodedQuery, Encoded, NoopSink, NumberParam,
///     ParamConfigMap,
/// };
///
/// let config = ParamConfigMap::builder().with("page", NumberParam).build();
/// let mut query = DecodedQuery::new();
/// query.insert("page", 2.0);
///
/// let encoded = encode_query_params_with_sink(&config, &query, &NoopSink);
/// assert_eq!(encoded["page"], Encoded::from("2"));
/// ```
pub fn encode_query_params_with_sink(
    config: &ParamConfigMap,
    query: &DecodedQuery,
    sink: &dyn DiagnosticSink,
) -> EncodedQuery {
    query
        .iter()
        .map(|(name, value)| {
            let encoded = match config.get(name) {
                Some(codec) => codec.encode_erased(value).unwrap_or_else(|| {
                    sink.report(&Diagnostic::new(
                        name,
                        Direction::Encode,
                        DiagnosticKind::TypeMismatch {
                            expected: codec.value_type(),
                        },
                    ));
                    encode_fallback(value)
                }),
                None => {
                    sink.report(&Diagnostic::new(
                        name,
                        Direction::Encode,
                        DiagnosticKind::Unconfigured,
                    ));
                    encode_fallback(value)
                }
            };
            (name.to_string(), encoded)
        })
        .collect()
}

/// Decodes `query` with the configured codecs.
///
/// Reports diagnostics to [`default_sink`]. See
/// [`decode_query_params_with_sink`].
pub fn decode_query_params(config: &ParamConfigMap, query: &EncodedQuery) -> DecodedQuery {
    decode_query_params_with_sink(config, query, default_sink())
}

/// Decodes `query`, reporting diagnostics to `sink`.
///
/// Every configured parameter appears in the result, first and in
/// configuration order, even when missing from `query` (it then decodes
/// from `Absent`). Unconfigured parameters follow in input order and pass
/// through as their raw [`Encoded`] value.
///
/// # Examples
///
/// ```
/// use query_param_codec::{
///     decode_query_params_with_sink, Decoded, EncodedQuery, NoopSink, NumberParam,
///     ParamConfigMap,
/// };
///
/// let mut config = ParamConfigMap::new();
/// let foo = config.register("foo", NumberParam);
///
/// let decoded = decode_query_params_with_sink(&config, &EncodedQuery::new(), &NoopSink);
/// assert_eq!(decoded.get(&foo).unwrap(), Decoded::Absent);
/// ```
pub fn decode_query_params_with_sink(
    config: &ParamConfigMap,
    query: &EncodedQuery,
    sink: &dyn DiagnosticSink,
) -> DecodedQuery {
    let absent = Encoded::Absent;
    let mut decoded = DecodedQuery::new();

    for (name, codec) in config.iter() {
        let input = query.get(name).unwrap_or(&absent);
        decoded.insert_raw(name, codec.decode_erased(input));
    }

    for (name, encoded) in query {
        if config.contains(name) {
            continue;
        }
        sink.report(&Diagnostic::new(
            name.as_str(),
            Direction::Decode,
            DiagnosticKind::Unconfigured,
        ));
        let passed = match encoded {
            Encoded::Absent => Decoded::Absent,
            Encoded::Null => Decoded::Null,
            other => Decoded::Value(other.clone()),
        };
        decoded.insert_decoded(name.as_str(), passed);
    }

    decoded
}

fn encode_fallback(value: Decoded<&dyn ParamValue>) -> Encoded {
    match value {
        Decoded::Absent | Decoded::Invalid => Encoded::Absent,
        Decoded::Null => Encoded::Null,
        Decoded::Value(v) => Encoded::Single(v.to_query_string()),
    }
}
