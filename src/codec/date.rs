use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::encoded::encoded_value;
use crate::{Decoded, Encoded};

use super::number::to_number;
use super::Codec;

/// Largest day offset accepted while rolling a date over.
const MAX_DAY_OFFSET: i64 = 100_000_000;

/// Encodes a calendar date as `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use query_param_codec::{encode_date, Decoded, Encoded};
/// use time::macros::date;
///
/// assert_eq!(encode_date(Decoded::Value(&date!(2015 - 10 - 01))), Encoded::from("2015-10-01"));
/// ```
pub fn encode_date(value: Decoded<&Date>) -> Encoded {
    Encoded::from(value.map(|date| {
        format!(
            "{}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        )
    }))
}

/// Decodes a calendar date from `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
///
/// A missing month or day is the first. Out-of-range months and days roll
/// over into the following month or year (`2015-13-01` is `2016-01-01`).
/// Further parts are read as hours, minutes, seconds and milliseconds, and
/// only move the date when they add up to whole days (`2015-10-01-25` is
/// `2015-10-02`). Text that is not a date decodes to `Null`.
///
/// # Examples
///
/// ```
/// use query_param_codec::{decode_date, Decoded, Encoded};
/// use time::macros::date;
///
/// assert_eq!(decode_date(&Encoded::from("2015")), Decoded::Value(date!(2015 - 01 - 01)));
/// assert_eq!(decode_date(&Encoded::from("2015-10")), Decoded::Value(date!(2015 - 10 - 01)));
/// assert_eq!(decode_date(&Encoded::from("not-a-date")), Decoded::Null);
/// ```
pub fn decode_date(input: &Encoded) -> Decoded<Date> {
    encoded_value(input, false).and_then(|text| match date_from_parts(text) {
        Some(date) => Decoded::Value(date),
        None => {
            tracing::debug!(target: "query_params", value = text, "unparseable date");
            Decoded::Null
        }
    })
}

/// Encodes a date-time as ISO-8601 UTC with millisecond precision.
///
/// A value whose UTC equivalent falls outside the supported year range
/// encodes to `Null`.
///
/// # Examples
///
/// ```
/// use query_param_codec::{encode_date_time, Decoded, Encoded};
/// use time::macros::datetime;
///
/// let at = datetime!(2019-05-28 10:58:40.5 +02:00);
/// assert_eq!(encode_date_time(Decoded::Value(&at)), Encoded::from("2019-05-28T08:58:40.500Z"));
/// ```
pub fn encode_date_time(value: Decoded<&OffsetDateTime>) -> Encoded {
    match value {
        Decoded::Absent | Decoded::Invalid => Encoded::Absent,
        Decoded::Null => Encoded::Null,
        Decoded::Value(at) => {
            let Some(utc) = at.checked_to_offset(UtcOffset::UTC) else {
                tracing::debug!(
                    target: "query_params",
                    value = %at,
                    "date-time out of range in UTC"
                );
                return Encoded::Null;
            };
            let format = format_description!(
                "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
            );
            match utc.format(format) {
                Ok(text) => Encoded::Single(text),
                Err(err) => {
                    tracing::debug!(
                        target: "query_params",
                        error = %err,
                        "unformattable date-time"
                    );
                    Encoded::Null
                }
            }
        }
    }
}

/// Decodes a date-time.
///
/// Accepts RFC 3339, ISO-8601 date-times without an offset (read as UTC),
/// bare `YYYY-MM-DD` dates (UTC midnight) and RFC 2822. Anything else
/// decodes to `Null`.
pub fn decode_date_time(input: &Encoded) -> Decoded<OffsetDateTime> {
    encoded_value(input, false).and_then(|text| match parse_date_time(text) {
        Some(at) => Decoded::Value(at),
        None => {
            tracing::debug!(target: "query_params", value = text, "unparseable date-time");
            Decoded::Null
        }
    })
}

/// Codec for calendar dates (`YYYY-MM-DD`).
#[derive(Debug, Clone, Copy, Default)]
pub struct DateParam;

impl Codec for DateParam {
    type Value = Date;

    fn encode(&self, value: Decoded<&Date>) -> Encoded {
        encode_date(value)
    }

    fn decode(&self, input: &Encoded) -> Decoded<Date> {
        decode_date(input)
    }
}

/// Codec for instants, written as ISO-8601 UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeParam;

impl Codec for DateTimeParam {
    type Value = OffsetDateTime;

    fn encode(&self, value: Decoded<&OffsetDateTime>) -> Encoded {
        encode_date_time(value)
    }

    fn decode(&self, input: &Encoded) -> Decoded<OffsetDateTime> {
        decode_date_time(input)
    }
}

fn date_from_parts(text: &str) -> Option<Date> {
    let mut parts = text.split('-');
    let year = integer_part(parts.next()?)?;
    // months are written one-based; the calendar arithmetic is zero-based
    let month_index = match parts.next() {
        Some(part) => integer_part(part)? - 1,
        None => 0,
    };
    let day = match parts.next() {
        Some(part) => integer_part(part)?,
        None => 1,
    };
    let day = day.checked_add(time_of_day_days(parts)?)?;
    calendar_date(year, month_index, day)
}

/// Whole days carried by trailing hour, minute, second and millisecond
/// parts. Parts past the milliseconds are ignored.
fn time_of_day_days<'a>(parts: impl Iterator<Item = &'a str>) -> Option<i64> {
    const UNIT_MILLIS: [i64; 4] = [3_600_000, 60_000, 1_000, 1];
    let mut millis: i64 = 0;
    for (part, unit) in parts.zip(UNIT_MILLIS) {
        millis = millis.checked_add(integer_part(part)?.checked_mul(unit)?)?;
    }
    Some(millis.div_euclid(86_400_000))
}

fn integer_part(text: &str) -> Option<i64> {
    let n = to_number(text);
    if !n.is_finite() {
        return None;
    }
    Some(n.trunc() as i64)
}

fn calendar_date(year: i64, month_index: i64, day: i64) -> Option<Date> {
    if !(-MAX_DAY_OFFSET..=MAX_DAY_OFFSET).contains(&day) {
        return None;
    }
    let year = year.checked_add(month_index.div_euclid(12))?;
    let month = u8::try_from(month_index.rem_euclid(12) + 1).ok()?;
    let month = Month::try_from(month).ok()?;
    let first = Date::from_calendar_date(i32::try_from(year).ok()?, month, 1).ok()?;
    first.checked_add(Duration::days(day - 1))
}

fn parse_date_time(text: &str) -> Option<OffsetDateTime> {
    if let Ok(at) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(at);
    }

    let local = PrimitiveDateTime::parse(
        text,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            text,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        )
    })
    .or_else(|_| {
        PrimitiveDateTime::parse(text, format_description!("[year]-[month]-[day]T[hour]:[minute]"))
    });
    if let Ok(at) = local {
        return Some(at.assume_utc());
    }

    if let Ok(date) = Date::parse(text, format_description!("[year]-[month]-[day]")) {
        return Some(date.midnight().assume_utc());
    }

    OffsetDateTime::parse(text, &Rfc2822).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn decode(text: &str) -> Decoded<Date> {
        decode_date(&Encoded::from(text))
    }

    #[test]
    fn decode_partial_dates() {
        assert_eq!(decode("2015"), Decoded::Value(date!(2015 - 01 - 01)));
        assert_eq!(decode("2015-10"), Decoded::Value(date!(2015 - 10 - 01)));
        assert_eq!(decode("2015-10-01"), Decoded::Value(date!(2015 - 10 - 01)));
    }

    #[test]
    fn decode_rolls_over() {
        assert_eq!(decode("2015-13-01"), Decoded::Value(date!(2016 - 01 - 01)));
        assert_eq!(decode("2015-02-29"), Decoded::Value(date!(2015 - 03 - 01)));
        assert_eq!(decode("2015-01-00"), Decoded::Value(date!(2014 - 12 - 31)));
    }

    #[test]
    fn decode_time_of_day_parts_roll_over() {
        assert_eq!(decode("2015-10-01-25"), Decoded::Value(date!(2015 - 10 - 02)));
        assert_eq!(decode("2015-10-01-23-59"), Decoded::Value(date!(2015 - 10 - 01)));
        assert_eq!(decode("2015-10-01-23-60"), Decoded::Value(date!(2015 - 10 - 02)));
        assert_eq!(decode("2015-10-01-0-0-0-0-99"), Decoded::Value(date!(2015 - 10 - 01)));
    }

    #[test]
    fn decode_invalid_is_null() {
        assert_eq!(decode("not-a-date"), Decoded::Null);
        assert_eq!(decode("2015-xx"), Decoded::Null);
        assert_eq!(decode("2015-10-01-zz"), Decoded::Null);
        assert_eq!(decode(""), Decoded::Null);
    }

    #[test]
    fn decode_first_entry_only() {
        let input = Encoded::from(vec!["2020-02-02", "2021-01-01"]);
        assert_eq!(decode_date(&input), Decoded::Value(date!(2020 - 02 - 02)));
    }

    #[test]
    fn encode_pads_month_and_day() {
        assert_eq!(
            encode_date(Decoded::Value(&date!(2019 - 03 - 07))),
            Encoded::from("2019-03-07")
        );
        assert_eq!(encode_date(Decoded::Null), Encoded::Null);
    }

    #[test]
    fn date_time_round_trip() {
        let at = datetime!(2019-05-28 10:58:40.123 UTC);
        let encoded = encode_date_time(Decoded::Value(&at));
        assert_eq!(encoded, Encoded::from("2019-05-28T10:58:40.123Z"));
        assert_eq!(decode_date_time(&encoded), Decoded::Value(at));
    }

    #[test]
    fn date_time_out_of_range_in_utc_is_null() {
        let late = datetime!(9999-12-31 23:30 -01:00);
        assert_eq!(encode_date_time(Decoded::Value(&late)), Encoded::Null);

        let edge = datetime!(9999-12-31 22:30 -01:00);
        assert_eq!(
            encode_date_time(Decoded::Value(&edge)),
            Encoded::from("9999-12-31T23:30:00.000Z")
        );
    }

    #[test]
    fn date_time_accepts_general_forms() {
        let decode = |text: &str| decode_date_time(&Encoded::from(text));
        assert_eq!(
            decode("1995-12-17T03:24:00"),
            Decoded::Value(datetime!(1995-12-17 03:24:00 UTC))
        );
        assert_eq!(
            decode("1995-12-17"),
            Decoded::Value(datetime!(1995-12-17 00:00:00 UTC))
        );
        assert_eq!(
            decode("2019-05-28T10:58:40+02:00"),
            Decoded::Value(datetime!(2019-05-28 08:58:40 UTC))
        );
        assert_eq!(
            decode("Sun, 17 Dec 1995 03:24:00 +0000"),
            Decoded::Value(datetime!(1995-12-17 03:24:00 UTC))
        );
        assert_eq!(decode("yesterday"), Decoded::Null);
    }
}
