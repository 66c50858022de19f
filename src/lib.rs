//! Typed query parameter codecs.
//!
//! This crate converts between the textual form of URL query parameters and
//! typed values. It provides:
//! - **Codecs**: encode/decode pairs for numbers, strings, booleans, enums,
//!   dates, date-times, JSON, arrays and flat objects
//! - **Config maps**: a [`ParamConfigMap`] naming the codec for each
//!   parameter
//! - **The engine**: [`encode_query_params`] and [`decode_query_params`],
//!   which apply a config map to a whole query at once
//! - **Location glue**: the [`location`] module, which parses and writes
//!   search strings and produces updated location records
//!
//! # Core Types
//!
//! - [`Decoded<T>`]: a decoded value that keeps `Absent`, `Null` and
//!   `Invalid` apart
//! - [`Encoded`]: the textual form of one parameter
//! - [`Codec`]: the encode/decode pair every codec implements
//! - [`DecodedQuery`] / [`EncodedQuery`]: whole queries, keyed by name
//! - [`DiagnosticSink`]: where unconfigured parameters are reported
//!
//! # Examples
//!
//! ```
//! use query_param_codec::location::parse_query;
//! use query_param_codec::{
//!     decode_query_params, encode_query_params, Decoded, DelimitedArrayParam, Encoded,
//!     NumberParam, ParamConfigMap,
//! };
//!
//! let mut config = ParamConfigMap::new();
//! let page = config.register("page", NumberParam);
//! let tags = config.register("tags", DelimitedArrayParam::new());
//!
//! let mut decoded = decode_query_params(&config, &parse_query("?page=3&tags=red_blue"));
//! assert_eq!(decoded.get(&page).unwrap(), Decoded::Value(&3.0));
//!
//! decoded.set(&tags, Decoded::Value(vec!["green".to_string()]));
//! let encoded = encode_query_params(&config, &decoded);
//! assert_eq!(encoded["tags"], Encoded::from("green"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod config;
mod decoded;
mod diagnostics;
mod encoded;
mod engine;
mod error;
pub mod location;
mod value;

pub use codec::{
    decode_array, decode_boolean, decode_date, decode_date_time, decode_delimited_array,
    decode_delimited_numeric_array, decode_enum, decode_json, decode_number,
    decode_numeric_array, decode_numeric_object, decode_object, decode_string, encode_array,
    encode_boolean, encode_date, encode_date_time, encode_delimited_array,
    encode_delimited_numeric_array, encode_enum, encode_json, encode_number,
    encode_numeric_array, encode_numeric_object, encode_object, encode_string, ArrayParam,
    BooleanParam, Codec, DateParam, DateTimeParam, DelimitedArrayParam,
    DelimitedNumericArrayParam, EnumParam, FlatObject, JsonParam, NumberParam,
    NumericArrayParam, NumericObject, NumericObjectParam, ObjectParam, StringParam,
    DEFAULT_ENTRY_SEPARATOR, DEFAULT_KEY_VALUE_SEPARATOR,
};
pub use config::{ErasedCodec, ParamConfigBuilder, ParamConfigMap, ParamKey};
pub use decoded::Decoded;
pub use diagnostics::{
    default_sink, Diagnostic, DiagnosticKind, DiagnosticMode, DiagnosticSink, Direction, FnSink,
    NoopSink, RecordingSink, TracingSink,
};
pub use encoded::Encoded;
pub use engine::{
    decode_query_params, decode_query_params_with_sink, encode_query_params,
    encode_query_params_with_sink, EncodedQuery,
};
pub use error::Error;
pub use value::{AnyValue, AsAny, DecodedQuery, ParamValue};
