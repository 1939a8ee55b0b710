//! Value coercion.
//!
//! [`convert`] turns a [`Value`] into the representation a declared
//! [`ValueKind`] expects. It is what bean writes and the property copier use
//! to bridge mismatched source and target types.
//!
//! # Rules
//!
//! - `Null` converts to `Null` for every kind.
//! - Numbers widen and narrow between integers and floats; narrowing is range
//!   checked, float to integer truncates toward zero.
//! - Strings parse into numbers, booleans and date/times; blank strings
//!   become `Null`.
//! - Scalars render into strings; containers render as JSON.
//! - Maps fill beans by property name; beans flatten into maps.
//!
//! # Example
//!
//! ```
//! use beanpath::convert::convert;
//! use beanpath::value::{Value, ValueKind};
//!
//! assert_eq!(convert(&Value::from("42"), &ValueKind::I32).unwrap(), Value::Integer(42));
//! assert_eq!(convert(&Value::from(7), &ValueKind::String).unwrap(), Value::from("7"));
//! assert!(convert(&Value::from(300), &ValueKind::I8).is_err());
//! ```

mod date;
mod number;

use std::sync::Arc;

use indexmap::IndexMap;

pub use date::{parse_datetime, to_datetime, NORM_DATETIME_PATTERN};
pub use number::{to_float, to_integer};

use crate::error::ConvertError;
use crate::value::{Bean, BeanType, Value, ValueKind};

/// Coerces `value` to `kind`.
pub fn convert(value: &Value, kind: &ValueKind) -> Result<Value, ConvertError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    match kind {
        ValueKind::Any => Ok(value.clone()),
        ValueKind::Bool => to_bool(value),
        ValueKind::I8 | ValueKind::I16 | ValueKind::I32 | ValueKind::I64 => {
            to_integer(value, kind)
        }
        ValueKind::F32 | ValueKind::F64 => to_float(value, kind),
        ValueKind::String => to_string(value),
        ValueKind::DateTime => to_datetime(value),
        ValueKind::List => to_list(value),
        ValueKind::Map => to_map(value),
        ValueKind::Bean(ty) => to_bean(value, ty),
    }
}

pub(crate) fn unsupported(value: &Value, kind: &ValueKind) -> ConvertError {
    ConvertError::Unsupported {
        from: value.type_name().to_string(),
        to: kind.to_string(),
    }
}

fn to_bool(value: &Value) -> Result<Value, ConvertError> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::Integer(i) => Ok(Value::Bool(*i != 0)),
        Value::Float(f) => Ok(Value::Bool(*f != 0.0)),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(Value::Null);
            }
            match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" | "on" | "1" => Ok(Value::Bool(true)),
                "false" | "no" | "n" | "off" | "0" => Ok(Value::Bool(false)),
                _ => Err(ConvertError::Parse {
                    input: s.clone(),
                    to: ValueKind::Bool.to_string(),
                }),
            }
        }
        other => Err(unsupported(other, &ValueKind::Bool)),
    }
}

fn to_string(value: &Value) -> Result<Value, ConvertError> {
    match value {
        Value::String(s) => Ok(Value::String(s.clone())),
        other => Ok(Value::String(other.to_string())),
    }
}

fn to_list(value: &Value) -> Result<Value, ConvertError> {
    match value {
        Value::List(items) => Ok(Value::List(items.clone())),
        Value::String(s) => Ok(Value::List(
            s.split(',')
                .map(|part| Value::String(part.trim().to_string()))
                .collect(),
        )),
        Value::Map(_) | Value::Bean(_) => Err(unsupported(value, &ValueKind::List)),
        scalar => Ok(Value::List(vec![scalar.clone()])),
    }
}

fn to_map(value: &Value) -> Result<Value, ConvertError> {
    match value {
        Value::Map(map) => Ok(Value::Map(map.clone())),
        Value::Bean(bean) => Ok(Value::Map(
            bean.iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect::<IndexMap<_, _>>(),
        )),
        other => Err(unsupported(other, &ValueKind::Map)),
    }
}

/// Builds a bean of type `ty` from a map or a bean of another type.
///
/// Properties are matched by exact name; unknown entries and entries that
/// fail to convert are skipped.
fn to_bean(value: &Value, ty: &Arc<BeanType>) -> Result<Value, ConvertError> {
    let entries: Box<dyn Iterator<Item = (&str, &Value)> + '_> = match value {
        Value::Bean(bean) if bean.bean_type().is_subtype_of(ty) => {
            return Ok(value.clone());
        }
        Value::Bean(bean) => Box::new(bean.iter()),
        Value::Map(map) => Box::new(map.iter().map(|(k, v)| (k.as_str(), v))),
        other => return Err(unsupported(other, &ValueKind::Bean(Arc::clone(ty)))),
    };

    let mut bean = Bean::new(ty);
    for (name, field_value) in entries {
        if bean.get(name).is_none() {
            continue;
        }
        if let Err(e) = bean.set(name, field_value.clone()) {
            log::debug!("skipping {}.{}: {}", ty.name(), name, e);
        }
    }
    Ok(Value::Bean(bean))
}
