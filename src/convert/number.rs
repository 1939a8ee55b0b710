//! Numeric coercion.

use super::unsupported;
use crate::error::ConvertError;
use crate::value::{Value, ValueKind};

/// Converts to an integer kind, checking the kind's range.
pub fn to_integer(value: &Value, kind: &ValueKind) -> Result<Value, ConvertError> {
    let raw = match value {
        Value::Integer(i) => *i,
        Value::Float(f) => float_to_i64(*f, kind)?,
        Value::Bool(b) => i64::from(*b),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(Value::Null);
            }
            parse_integer(trimmed).ok_or_else(|| ConvertError::Parse {
                input: s.clone(),
                to: kind.to_string(),
            })?
        }
        Value::DateTime(dt) if matches!(kind, ValueKind::I64) => dt.and_utc().timestamp_millis(),
        other => return Err(unsupported(other, kind)),
    };

    let (min, max) = kind.integer_bounds().unwrap_or((i64::MIN, i64::MAX));
    if raw < min || raw > max {
        return Err(ConvertError::OutOfRange {
            value: raw.to_string(),
            to: kind.to_string(),
        });
    }
    Ok(Value::Integer(raw))
}

/// Converts to a float kind. `F32` rounds through single precision.
pub fn to_float(value: &Value, kind: &ValueKind) -> Result<Value, ConvertError> {
    let raw = match value {
        Value::Integer(i) => *i as f64,
        Value::Float(f) => *f,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(Value::Null);
            }
            trimmed.parse::<f64>().map_err(|_| ConvertError::Parse {
                input: s.clone(),
                to: kind.to_string(),
            })?
        }
        other => return Err(unsupported(other, kind)),
    };

    if matches!(kind, ValueKind::F32) {
        if raw.is_finite() && raw.abs() > f32::MAX as f64 {
            return Err(ConvertError::OutOfRange {
                value: raw.to_string(),
                to: kind.to_string(),
            });
        }
        return Ok(Value::Float(raw as f32 as f64));
    }
    Ok(Value::Float(raw))
}

fn float_to_i64(f: f64, kind: &ValueKind) -> Result<i64, ConvertError> {
    let truncated = f.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(ConvertError::OutOfRange {
            value: f.to_string(),
            to: kind.to_string(),
        });
    }
    Ok(truncated as i64)
}

/// Parses decimal, `0x` hex, or decimal-with-fraction (truncated) input.
fn parse_integer(s: &str) -> Option<i64> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        let parsed = i64::from_str_radix(hex, 16).ok()?;
        return Some(if negative { -parsed } else { parsed });
    }
    if let Ok(parsed) = s.parse::<i64>() {
        return Some(parsed);
    }
    let f = s.parse::<f64>().ok()?;
    let truncated = f.trunc();
    (truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64)
        .then_some(truncated as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrowing_is_range_checked() {
        assert_eq!(to_integer(&Value::from(127), &ValueKind::I8).unwrap(), Value::Integer(127));
        assert!(matches!(
            to_integer(&Value::from(128), &ValueKind::I8),
            Err(ConvertError::OutOfRange { .. })
        ));
        assert!(to_integer(&Value::from(i64::MAX), &ValueKind::I32).is_err());
    }

    #[test]
    fn test_float_truncates_toward_zero() {
        assert_eq!(to_integer(&Value::from(-2.7), &ValueKind::I32).unwrap(), Value::Integer(-2));
        assert!(to_integer(&Value::from(f64::NAN), &ValueKind::I64).is_err());
    }

    #[test]
    fn test_float_at_two_pow_63_is_out_of_range() {
        let two_pow_63 = 9_223_372_036_854_775_808.0_f64;
        assert!(matches!(
            to_integer(&Value::from(two_pow_63), &ValueKind::I64),
            Err(ConvertError::OutOfRange { .. })
        ));
        assert_eq!(
            to_integer(&Value::from(-two_pow_63), &ValueKind::I64).unwrap(),
            Value::Integer(i64::MIN)
        );
        assert!(parse_integer("9223372036854775808.0").is_none());
    }

    #[test]
    fn test_parse_integer_forms() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("-0x1F"), Some(-31));
        assert_eq!(parse_integer("3.9"), Some(3));
        assert_eq!(parse_integer("abc"), None);
    }

    #[test]
    fn test_bool_to_number() {
        assert_eq!(to_integer(&Value::Bool(true), &ValueKind::I16).unwrap(), Value::Integer(1));
        assert_eq!(to_float(&Value::Bool(false), &ValueKind::F64).unwrap(), Value::Float(0.0));
    }

    #[test]
    fn test_f32_rounds_and_checks_range() {
        assert_eq!(to_float(&Value::from(0.1), &ValueKind::F32).unwrap(), Value::Float(0.1f32 as f64));
        assert!(to_float(&Value::from(1e300), &ValueKind::F32).is_err());
    }

    #[test]
    fn test_blank_string_is_null() {
        assert_eq!(to_integer(&Value::from(" "), &ValueKind::I32).unwrap(), Value::Null);
        assert_eq!(to_float(&Value::from(""), &ValueKind::F64).unwrap(), Value::Null);
    }
}
