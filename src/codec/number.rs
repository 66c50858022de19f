use crate::encoded::encoded_value;
use crate::{Decoded, Encoded};

use super::{encode_with, Codec};

/// Encodes a number as decimal text.
///
/// Integral values print without a fraction, negative zero prints as `0`,
/// and non-finite values print as `NaN`, `Infinity` and `-Infinity`.
/// Magnitudes of `1e21` and above or below `1e-6` use exponent notation.
///
/// # Examples
///
/// ```
/// use query_param_codec::{encode_number, Decoded, Encoded};
///
/// assert_eq!(encode_number(Decoded::Value(&42.0)), Encoded::from("42"));
/// assert_eq!(encode_number(Decoded::Value(&1.5)), Encoded::from("1.5"));
/// assert_eq!(encode_number(Decoded::Absent), Encoded::Absent);
/// ```
pub fn encode_number(value: Decoded<&f64>) -> Encoded {
    encode_with(value, |n| number_to_string(*n))
}

/// Decodes a number.
///
/// An empty string is `Null`. Text that is not a number decodes to
/// `Value(NaN)`, not `Null`, so callers can tell "no value" from "bad value".
pub fn decode_number(input: &Encoded) -> Decoded<f64> {
    encoded_value(input, false).map(to_number)
}

/// Codec for `f64` parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberParam;

impl Codec for NumberParam {
    type Value = f64;

    fn encode(&self, value: Decoded<&f64>) -> Encoded {
        encode_number(value)
    }

    fn decode(&self, input: &Encoded) -> Decoded<f64> {
        decode_number(input)
    }
}

pub(crate) fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if (1e-6..1e21).contains(&n.abs()) {
        n.to_string()
    } else {
        // exponent form with an explicit sign, as in `1e+21`
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => text,
        }
    }
}

/// Decodes one numeric entry of an array or delimited array.
///
/// Missing and empty entries are `None`.
pub(super) fn numeric_entry(entry: Option<&str>) -> Option<f64> {
    match entry {
        None | Some("") => None,
        Some(text) => Some(to_number(text)),
    }
}

/// Coerces text to a number.
///
/// Surrounding whitespace is ignored and blank text is zero. Decimal and
/// exponent notation, `Infinity`, and `0x`/`0o`/`0b` integer literals are
/// accepted; anything else is NaN.
pub(crate) fn to_number(text: &str) -> f64 {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = radix_literal(trimmed) {
        return value;
    }

    let decimal_chars = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal_chars {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_literal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let mut value = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * f64::from(radix) + f64::from(d),
            None => return Some(f64::NAN),
        }
    }
    Some(value)
}
