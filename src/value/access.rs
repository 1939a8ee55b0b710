//! The three access capabilities of a structured value.
//!
//! Every container in a [`Value`] supports exactly one of:
//!
//! - [`FieldAccess`]: named, declared properties (beans),
//! - [`KeyAccess`]: string keys (maps),
//! - [`IndexAccess`]: positions (lists).
//!
//! [`Value::access`] and [`Value::access_mut`] perform the single dispatch
//! used by the path evaluator and the copier; scalars come back as
//! [`Access::Scalar`].

use std::sync::Arc;

use indexmap::IndexMap;

use super::bean::{Bean, BeanType};
use super::Value;
use crate::error::Result;

/// Field access over a bean-like value.
pub trait FieldAccess {
    fn bean_type(&self) -> &Arc<BeanType>;
    fn field(&self, name: &str) -> Option<&Value>;
    fn field_mut(&mut self, name: &str) -> Option<&mut Value>;
    /// Sets a field, coercing to its declared kind.
    fn set_field(&mut self, name: &str, value: Value) -> Result<()>;
}

/// Key access over a map-like value.
pub trait KeyAccess {
    fn key(&self, key: &str) -> Option<&Value>;
    fn key_mut(&mut self, key: &str) -> Option<&mut Value>;
    fn put_key(&mut self, key: String, value: Value);
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_>;
}

/// Index access over a sequence.
///
/// Negative indices count from the end.
pub trait IndexAccess {
    fn len(&self) -> usize;
    fn at(&self, index: i64) -> Option<&Value>;
    fn at_mut(&mut self, index: i64) -> Option<&mut Value>;
    /// Replaces the element at `index` if it exists, otherwise appends.
    fn set_or_append(&mut self, index: i64, value: Value);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared view of a value, by capability.
pub enum Access<'a> {
    Fields(&'a dyn FieldAccess),
    Keys(&'a dyn KeyAccess),
    Index(&'a dyn IndexAccess),
    Scalar(&'a Value),
}

/// Mutable view of a value, by capability.
pub enum AccessMut<'a> {
    Fields(&'a mut dyn FieldAccess),
    Keys(&'a mut dyn KeyAccess),
    Index(&'a mut dyn IndexAccess),
    Scalar(&'a mut Value),
}

/// Resolves a possibly negative index against `len`.
pub fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let idx = if index < 0 { len + index } else { index };
    (0..len).contains(&idx).then_some(idx as usize)
}

impl FieldAccess for Bean {
    fn bean_type(&self) -> &Arc<BeanType> {
        Bean::bean_type(self)
    }

    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.get_mut(name)
    }

    fn set_field(&mut self, name: &str, value: Value) -> Result<()> {
        self.set(name, value)
    }
}

impl KeyAccess for IndexMap<String, Value> {
    fn key(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }

    fn key_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.get_mut(key)
    }

    fn put_key(&mut self, key: String, value: Value) {
        self.insert(key, value);
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &Value)> + '_> {
        Box::new(self.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

impl IndexAccess for Vec<Value> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn at(&self, index: i64) -> Option<&Value> {
        normalize_index(index, Vec::len(self)).and_then(|i| self.get(i))
    }

    fn at_mut(&mut self, index: i64) -> Option<&mut Value> {
        normalize_index(index, Vec::len(self)).and_then(|i| self.get_mut(i))
    }

    fn set_or_append(&mut self, index: i64, value: Value) {
        match normalize_index(index, Vec::len(self)) {
            Some(i) => self[i] = value,
            None => self.push(value),
        }
    }
}

impl Value {
    /// Dispatches on the access capability of this value.
    pub fn access(&self) -> Access<'_> {
        match self {
            Value::Bean(bean) => Access::Fields(bean),
            Value::Map(map) => Access::Keys(map),
            Value::List(items) => Access::Index(items),
            other => Access::Scalar(other),
        }
    }

    /// Mutable counterpart of [`Value::access`].
    pub fn access_mut(&mut self) -> AccessMut<'_> {
        match self {
            Value::Bean(bean) => AccessMut::Fields(bean),
            Value::Map(map) => AccessMut::Keys(map),
            Value::List(items) => AccessMut::Index(items),
            other => AccessMut::Scalar(other),
        }
    }
}
