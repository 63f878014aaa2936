//! Conversion of raw cell values into comparable primitives.
//!
//! Every function here is total: malformed input degrades to `0`, `false`
//! or the empty string instead of failing. Source data is locale formatted
//! (decimal comma, grouped thousands, decorated status labels).

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::data::{ColumnType, Data};

/// Lower-cased tokens that coerce to `true` in boolean columns.
pub const TRUTHY_TOKENS: [&str; 6] = ["1", "true", "да", "yes", "активно", "✅ доступен"];

/// A coerced value, ready for [`crate::compare`].
#[derive(Clone, Debug, PartialEq)]
pub enum Comparable<'a> {
    Numeric(f64),
    Text(Cow<'a, str>)
}

pub fn coerce<'a>(data: Data<'a>, ty: ColumnType) -> Comparable<'a> {
    match ty {
        ColumnType::Number => Comparable::Numeric(to_number(data)),
        ColumnType::Boolean => Comparable::Numeric(if to_bool(data) { 1.0 } else { 0.0 }),
        ColumnType::Date => Comparable::Numeric(to_timestamp(data)),
        ColumnType::Text => Comparable::Text(data.as_text())
    }
}

pub fn to_number(data: Data) -> f64 {
    let value = match data {
        Data::Integer(num) => num as f64,
        Data::Float(num) => num,
        Data::Bool(b) => f64::from(u8::from(b)),
        Data::Str(s) => parse_number(s),
        Data::Timestamp(ts) => ts.timestamp_millis() as f64,
        Data::Null => 0.0
    };
    if value.is_finite() { value } else { 0.0 }
}

/// Parses locale formatted numbers such as `"1 234,50"` or `"12 шт"`.
pub fn parse_number(s: &str) -> f64 {
    let mut normalized = String::with_capacity(s.len());
    let mut seen_comma = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            continue;
        }
        let ch = if ch == ',' && !seen_comma {
            seen_comma = true;
            '.'
        } else {
            ch
        };
        if ch.is_ascii_digit() || matches!(ch, '+' | '-' | '.') {
            normalized.push(ch);
        }
    }

    leading_float(&normalized)
        .filter(|num| num.is_finite())
        .unwrap_or(0.0)
}

// Longest prefix of the form `[+-]digits[.digits]`, anything after it is ignored.
fn leading_float(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

pub fn to_bool(data: Data) -> bool {
    match data {
        Data::Bool(b) => b,
        Data::Integer(num) => num != 0,
        Data::Float(num) => num != 0.0 && !num.is_nan(),
        Data::Str(s) => {
            let normalized = s.to_lowercase();
            TRUTHY_TOKENS.contains(&normalized.trim())
        }
        Data::Timestamp(_) | Data::Null => false
    }
}

/// Epoch milliseconds; numbers are assumed to already be epoch-like.
pub fn to_timestamp(data: Data) -> f64 {
    let value = match data {
        Data::Timestamp(ts) => ts.timestamp_millis() as f64,
        Data::Integer(num) => num as f64,
        Data::Float(num) => num,
        Data::Str(s) => parse_timestamp(s).map_or(0.0, |ms| ms as f64),
        Data::Bool(_) | Data::Null => 0.0
    };
    if value.is_finite() { value } else { 0.0 }
}

/// Parses ISO-like timestamps; a space between date and time is accepted.
/// Timestamps without an offset are read as UTC. The input is not trimmed:
/// only the first space becomes `T`, so surrounding whitespace fails to parse.
pub fn parse_timestamp(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    let normalized = s.replacen(' ', "T", 1);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn numbers_tolerate_locale_formatting() {
        assert_eq!(to_number(Data::Str("1 234,50")), 1234.5);
        assert_eq!(to_number(Data::Str("1\u{a0}234,50")), 1234.5);
        assert_eq!(to_number(Data::Str("12 шт")), 12.0);
        assert_eq!(to_number(Data::Str("-3.5%")), -3.5);
        assert_eq!(to_number(Data::Str("+.5")), 0.5);
        assert_eq!(to_number(Data::Str("1.234.5")), 1.234);
    }

    #[test]
    fn unparsable_numbers_are_zero() {
        assert_eq!(to_number(Data::Str("abc")), 0.0);
        assert_eq!(to_number(Data::Str("")), 0.0);
        assert_eq!(to_number(Data::Str("-")), 0.0);
        assert_eq!(to_number(Data::Str(".")), 0.0);
        assert_eq!(to_number(Data::Float(f64::NAN)), 0.0);
        assert_eq!(to_number(Data::Float(f64::INFINITY)), 0.0);
        assert_eq!(to_number(Data::Null), 0.0);
    }

    #[test]
    fn native_numbers_pass_through() {
        assert_eq!(to_number(Data::Integer(42)), 42.0);
        assert_eq!(to_number(Data::Float(-0.25)), -0.25);
        assert_eq!(to_number(Data::Bool(true)), 1.0);
    }

    #[test]
    fn boolean_tokens_match_exactly() {
        assert!(to_bool(Data::Str("✅ Доступен")));
        assert!(to_bool(Data::Str("  ДА ")));
        assert!(to_bool(Data::Str("Активно")));
        assert!(to_bool(Data::Str("1")));
        assert!(!to_bool(Data::Str("")));
        assert!(!to_bool(Data::Str("❌ Заблокирован")));
        assert!(!to_bool(Data::Str("да, но")));
        assert!(!to_bool(Data::Str("доступен")));
    }

    #[test]
    fn boolean_from_native_values() {
        assert!(to_bool(Data::Bool(true)));
        assert!(to_bool(Data::Integer(-1)));
        assert!(to_bool(Data::Float(0.5)));
        assert!(!to_bool(Data::Float(f64::NAN)));
        assert!(!to_bool(Data::Integer(0)));
        assert!(!to_bool(Data::Null));
    }

    #[test]
    fn dates_parse_common_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap().timestamp_millis() as f64;
        assert_eq!(to_timestamp(Data::Str("2024-03-05 10:30:00")), expected);
        assert_eq!(to_timestamp(Data::Str("2024-03-05T10:30:00")), expected);
        assert_eq!(to_timestamp(Data::Str("2024-03-05T10:30")), expected);
        assert_eq!(to_timestamp(Data::Str("2024-03-05T13:30:00+03:00")), expected);

        let midnight = Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap().timestamp_millis() as f64;
        assert_eq!(to_timestamp(Data::Str("2024-03-05")), midnight);
    }

    #[test]
    fn malformed_dates_are_zero() {
        assert_eq!(to_timestamp(Data::Str("")), 0.0);
        assert_eq!(to_timestamp(Data::Str("вчера")), 0.0);
        assert_eq!(to_timestamp(Data::Str("05.03.2024")), 0.0);
        assert_eq!(to_timestamp(Data::Str(" 2024-03-05")), 0.0);
        assert_eq!(to_timestamp(Data::Str("2024-03-05 ")), 0.0);
        assert_eq!(to_timestamp(Data::Null), 0.0);
        assert_eq!(to_timestamp(Data::Integer(1_700_000_000_000)), 1_700_000_000_000.0);
    }

    #[test]
    fn text_is_not_coerced() {
        assert_eq!(coerce(Data::Str(" Б "), ColumnType::Text), Comparable::Text(" Б ".into()));
        assert_eq!(coerce(Data::Null, ColumnType::Text), Comparable::Text("".into()));
        assert_eq!(coerce(Data::Str("да"), ColumnType::Boolean), Comparable::Numeric(1.0));
    }
}
