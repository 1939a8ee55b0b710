//! Declared property kinds.
//!
//! A `ValueKind` is what a bean property promises to hold. Writes into a bean
//! are coerced to the declared kind by [`crate::convert::convert`].

use std::fmt;
use std::sync::Arc;

use super::bean::BeanType;

/// The declared type of a bean property.
#[derive(Debug, Clone)]
pub enum ValueKind {
    /// Accepts any value unchanged.
    Any,
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    DateTime,
    List,
    Map,
    /// A nested bean of the given type (or one of its subtypes).
    Bean(Arc<BeanType>),
}

impl ValueKind {
    /// Returns true for the integer kinds.
    pub fn is_integer(&self) -> bool {
        matches!(self, ValueKind::I8 | ValueKind::I16 | ValueKind::I32 | ValueKind::I64)
    }

    /// Returns true for the floating point kinds.
    pub fn is_float(&self) -> bool {
        matches!(self, ValueKind::F32 | ValueKind::F64)
    }

    /// Returns true for any numeric kind.
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Inclusive bounds of an integer kind.
    pub fn integer_bounds(&self) -> Option<(i64, i64)> {
        match self {
            ValueKind::I8 => Some((i8::MIN as i64, i8::MAX as i64)),
            ValueKind::I16 => Some((i16::MIN as i64, i16::MAX as i64)),
            ValueKind::I32 => Some((i32::MIN as i64, i32::MAX as i64)),
            ValueKind::I64 => Some((i64::MIN, i64::MAX)),
            _ => None,
        }
    }
}

impl PartialEq for ValueKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ValueKind::Bean(a), ValueKind::Bean(b)) => a.id() == b.id(),
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Any => write!(f, "any"),
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::I8 => write!(f, "i8"),
            ValueKind::I16 => write!(f, "i16"),
            ValueKind::I32 => write!(f, "i32"),
            ValueKind::I64 => write!(f, "i64"),
            ValueKind::F32 => write!(f, "f32"),
            ValueKind::F64 => write!(f, "f64"),
            ValueKind::String => write!(f, "string"),
            ValueKind::DateTime => write!(f, "datetime"),
            ValueKind::List => write!(f, "list"),
            ValueKind::Map => write!(f, "map"),
            ValueKind::Bean(ty) => write!(f, "{}", ty.name()),
        }
    }
}
