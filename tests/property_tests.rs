//! Property tests for the codecs and the engine.
//!
//! These check the round-trip and absence laws every codec promises, and
//! the key-set rules of whole-query encoding and decoding.

use proptest::prelude::*;
use query_param_codec::location::{parse_query, stringify_query, StringifyOptions};
use query_param_codec::{
    decode_query_params_with_sink, encode_query_params_with_sink, ArrayParam, BooleanParam,
    Codec, DateParam, DateTimeParam, Decoded, DecodedQuery, DelimitedArrayParam,
    DelimitedNumericArrayParam, Encoded, EncodedQuery, EnumParam, FlatObject, JsonParam,
    NumberParam, NumericArrayParam, NumericObjectParam, ObjectParam, ParamConfigMap,
    RecordingSink, StringParam,
};
use time::{Date, Duration, Month, OffsetDateTime, Time, UtcOffset};

// Strategy: calendar dates within the four-digit year range
fn arb_date() -> impl Strategy<Value = Date> {
    (1000i32..=9999, 1u8..=12, 1u8..=28).prop_map(|(year, month, day)| {
        Date::from_calendar_date(year, month.try_into().unwrap(), day).unwrap()
    })
}

// Strategy: UTC instants at millisecond precision
fn arb_date_time() -> impl Strategy<Value = OffsetDateTime> {
    (0i64..253_402_300_799_000).prop_map(|ms| {
        OffsetDateTime::UNIX_EPOCH + Duration::milliseconds(ms)
    })
}

// Strategy: local times at the top of the year range, in any whole-hour offset
fn arb_offset_date_time() -> impl Strategy<Value = OffsetDateTime> {
    (9998i32..=9999, 0u8..24, 0u8..60, -23i8..=23).prop_map(|(year, hour, minute, offset)| {
        let date = Date::from_calendar_date(year, Month::December, 31).unwrap();
        let clock = Time::from_hms(hour, minute, 0).unwrap();
        let offset = UtcOffset::from_hms(offset, 0, 0).unwrap();
        date.with_time(clock).assume_offset(offset)
    })
}

// Strategy: finite numbers, without negative zero
fn arb_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-1_000_000i64..1_000_000).prop_map(|n| n as f64),
        proptest::num::f64::NORMAL,
    ]
}

// Strategy: text free of the default separators
fn arb_token() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 .!~]{1,8}").unwrap()
}

fn arb_flat_object() -> impl Strategy<Value = FlatObject> {
    prop::collection::vec((arb_token(), prop::option::of(arb_token())), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}

fn assert_round_trip<C>(codec: &C, value: C::Value) -> Result<(), TestCaseError>
where
    C: Codec,
    C::Value: PartialEq + std::fmt::Debug,
{
    let encoded = codec.encode(Decoded::Value(&value));
    prop_assert_eq!(codec.decode(&encoded), Decoded::Value(value));
    Ok(())
}

fn assert_absent_law<C: Codec>(codec: &C) -> Result<(), TestCaseError> {
    prop_assert_eq!(codec.encode(Decoded::Absent), Encoded::Absent);
    prop_assert!(codec.decode(&Encoded::Absent).is_absent());
    Ok(())
}

proptest! {
    /// Property: dates survive a round trip at day precision
    #[test]
    fn proptest_date_round_trip(date in arb_date()) {
        assert_round_trip(&DateParam, date)?;
    }

    /// Property: instants survive a round trip at millisecond precision
    #[test]
    fn proptest_date_time_round_trip(at in arb_date_time()) {
        assert_round_trip(&DateTimeParam, at)?;
    }

    /// Property: any offset either round-trips as the same instant or encodes to Null
    #[test]
    fn proptest_date_time_offsets_are_total(at in arb_offset_date_time()) {
        let encoded = DateTimeParam.encode(Decoded::Value(&at));
        if at.checked_to_offset(UtcOffset::UTC).is_some() {
            prop_assert_eq!(DateTimeParam.decode(&encoded), Decoded::Value(at));
        } else {
            prop_assert_eq!(encoded, Encoded::Null);
        }
    }

    /// Property: finite numbers survive a round trip
    #[test]
    fn proptest_number_round_trip(n in arb_number()) {
        assert_round_trip(&NumberParam, n)?;
    }

    /// Property: booleans survive a round trip
    #[test]
    fn proptest_boolean_round_trip(b in any::<bool>()) {
        assert_round_trip(&BooleanParam, b)?;
    }

    /// Property: any string, including the empty one, survives a round trip
    #[test]
    fn proptest_string_round_trip(s in ".*") {
        assert_round_trip(&StringParam, s)?;
    }

    /// Property: repeated-key arrays survive a round trip
    #[test]
    fn proptest_array_round_trip(values in prop::collection::vec(prop::option::of(".*"), 0..6)) {
        assert_round_trip(&ArrayParam, values)?;
    }

    /// Property: numeric arrays survive a round trip, gaps included
    #[test]
    fn proptest_numeric_array_round_trip(
        values in prop::collection::vec(prop::option::of(arb_number()), 0..6)
    ) {
        assert_round_trip(&NumericArrayParam, values)?;
    }

    /// Property: delimited arrays of separator-free tokens survive a round trip
    #[test]
    fn proptest_delimited_array_round_trip(values in prop::collection::vec(arb_token(), 0..6)) {
        assert_round_trip(&DelimitedArrayParam::new(), values)?;
    }

    /// Property: delimited numeric arrays survive a round trip
    #[test]
    fn proptest_delimited_numeric_array_round_trip(
        values in prop::collection::vec(arb_number(), 1..6)
    ) {
        let values: Vec<Option<f64>> = values.into_iter().map(Some).collect();
        assert_round_trip(&DelimitedNumericArrayParam::new(), values)?;
    }

    /// Property: flat objects with separator-free keys and values survive a round trip
    #[test]
    fn proptest_object_round_trip(object in arb_flat_object()) {
        assert_round_trip(&ObjectParam::new(), object)?;
    }

    /// Property: untyped JSON survives a round trip
    #[test]
    fn proptest_json_round_trip(n in any::<i64>(), s in ".*", b in any::<bool>()) {
        let value = serde_json::json!({"n": n, "s": s, "b": b, "list": [n, null]});
        assert_round_trip(&JsonParam::<serde_json::Value>::new(), value)?;
    }

    /// Property: enum members survive a round trip and non-members are invalid
    #[test]
    fn proptest_enum_membership(pick in 0usize..3, other in "[d-z]{1,4}") {
        let members = ["a", "b", "c"];
        let codec = EnumParam::new(members);
        assert_round_trip(&codec, members[pick].to_string())?;
        prop_assert!(codec.decode(&Encoded::from(other)).is_invalid());
    }

    /// Property: Absent is preserved in both directions by every codec
    #[test]
    fn proptest_absent_laws(_seed in any::<u8>()) {
        assert_absent_law(&DateParam)?;
        assert_absent_law(&DateTimeParam)?;
        assert_absent_law(&NumberParam)?;
        assert_absent_law(&BooleanParam)?;
        assert_absent_law(&StringParam)?;
        assert_absent_law(&EnumParam::new(["x"]))?;
        assert_absent_law(&JsonParam::<serde_json::Value>::new())?;
        assert_absent_law(&ArrayParam)?;
        assert_absent_law(&NumericArrayParam)?;
        assert_absent_law(&DelimitedArrayParam::new())?;
        assert_absent_law(&DelimitedNumericArrayParam::new())?;
        assert_absent_law(&ObjectParam::new())?;
        assert_absent_law(&NumericObjectParam::new())?;
    }

    /// Property: encoding yields exactly the input keys, in input order
    #[test]
    fn proptest_encode_key_set(
        names in prop::collection::vec("[a-z]{1,6}", 0..8),
        configured in prop::collection::vec(any::<bool>(), 8)
    ) {
        let mut config = ParamConfigMap::new();
        let mut query = DecodedQuery::new();
        for (i, name) in names.iter().enumerate() {
            if configured[i] {
                config.insert_erased(name.clone(), Box::new(NumberParam));
            }
            query.insert(name.clone(), i as f64);
        }

        let sink = RecordingSink::new();
        let encoded = encode_query_params_with_sink(&config, &query, &sink);

        let input_keys: Vec<&str> = query.keys().collect();
        let output_keys: Vec<&str> = encoded.keys().map(String::as_str).collect();
        prop_assert_eq!(output_keys, input_keys);
        let unconfigured = query.keys().filter(|k| !config.contains(k)).count();
        prop_assert_eq!(sink.len(), unconfigured);
    }

    /// Property: decoding yields the configured keys first, then the rest of the input
    #[test]
    fn proptest_decode_key_set(
        configured in prop::collection::btree_set("[a-m]{1,4}", 0..5),
        present in prop::collection::btree_set("[a-z]{1,4}", 0..8)
    ) {
        let mut config = ParamConfigMap::new();
        for name in &configured {
            config.insert_erased(name.clone(), Box::new(StringParam));
        }
        let encoded: EncodedQuery = present
            .iter()
            .map(|name| (name.clone(), Encoded::from(name.as_str())))
            .collect();

        let sink = RecordingSink::new();
        let decoded = decode_query_params_with_sink(&config, &encoded, &sink);

        let mut expected: Vec<&str> = configured.iter().map(String::as_str).collect();
        expected.extend(
            present
                .iter()
                .filter(|name| !configured.contains(*name))
                .map(String::as_str),
        );
        let keys: Vec<&str> = decoded.keys().collect();
        prop_assert_eq!(keys, expected);
        prop_assert_eq!(sink.len(), present.difference(&configured).count());
    }

    /// Property: stringify then parse restores a query of single values
    #[test]
    fn proptest_query_string_round_trip(
        entries in prop::collection::btree_map("[a-z]{1,5}", ".*", 0..6)
    ) {
        let query: EncodedQuery = entries
            .into_iter()
            .map(|(k, v)| (k, Encoded::Single(v)))
            .collect();
        let text = stringify_query(&query, &StringifyOptions::default());
        prop_assert_eq!(parse_query(&text), query);
    }
}
