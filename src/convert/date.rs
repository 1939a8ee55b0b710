//! Date/time coercion.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::unsupported;
use crate::error::ConvertError;
use crate::value::{Value, ValueKind};

/// The canonical rendering of a date/time: `2024-01-31 08:30:00`.
pub const NORM_DATETIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

const DATETIME_PATTERNS: &[&str] = &[
    NORM_DATETIME_PATTERN,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_PATTERNS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Parses the date/time forms accepted for `ValueKind::DateTime`.
///
/// RFC 3339 strings with an offset are normalised to UTC. Plain dates are
/// taken at midnight.
pub fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_utc());
    }
    DATETIME_PATTERNS
        .iter()
        .find_map(|p| NaiveDateTime::parse_from_str(input, p).ok())
        .or_else(|| {
            DATE_PATTERNS
                .iter()
                .find_map(|p| NaiveDate::parse_from_str(input, p).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Converts strings and epoch milliseconds to a date/time.
pub fn to_datetime(value: &Value) -> Result<Value, ConvertError> {
    match value {
        Value::DateTime(dt) => Ok(Value::DateTime(*dt)),
        Value::String(s) if s.trim().is_empty() => Ok(Value::Null),
        Value::String(s) => parse_datetime(s)
            .map(Value::DateTime)
            .ok_or_else(|| ConvertError::Parse {
                input: s.clone(),
                to: ValueKind::DateTime.to_string(),
            }),
        Value::Integer(millis) => from_millis(*millis),
        Value::Float(f) if f.is_finite() => from_millis(f.trunc() as i64),
        other => Err(unsupported(other, &ValueKind::DateTime)),
    }
}

fn from_millis(millis: i64) -> Result<Value, ConvertError> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| Value::DateTime(dt.naive_utc()))
        .ok_or_else(|| ConvertError::OutOfRange {
            value: millis.to_string(),
            to: ValueKind::DateTime.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::convert;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, NORM_DATETIME_PATTERN).unwrap()
    }

    #[test]
    fn test_parse_common_forms() {
        let expected = dt("2024-01-31 08:30:00");
        assert_eq!(parse_datetime("2024-01-31 08:30:00"), Some(expected));
        assert_eq!(parse_datetime("2024-01-31T08:30:00"), Some(expected));
        assert_eq!(parse_datetime("2024-01-31T09:30:00+01:00"), Some(expected));
        assert_eq!(parse_datetime("2024/01/31"), Some(dt("2024-01-31 00:00:00")));
        assert_eq!(parse_datetime("31st of January"), None);
    }

    #[test]
    fn test_epoch_millis_roundtrip() {
        let value = to_datetime(&Value::Integer(86_400_000)).unwrap();
        assert_eq!(value, Value::DateTime(dt("1970-01-02 00:00:00")));
        assert_eq!(convert(&value, &ValueKind::I64).unwrap(), Value::Integer(86_400_000));
    }

    #[test]
    fn test_datetime_to_string() {
        let value = Value::DateTime(dt("2020-02-29 23:59:59"));
        assert_eq!(convert(&value, &ValueKind::String).unwrap(), Value::from("2020-02-29 23:59:59"));
    }
}
