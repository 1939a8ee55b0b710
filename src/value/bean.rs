//! Bean types and bean instances.
//!
//! A [`BeanType`] declares a named set of properties, optionally extending a
//! parent type. A [`Bean`] is an instance of a type: one value slot per
//! property (inherited properties included), each slot holding a value of the
//! property's declared [`ValueKind`].
//!
//! # Example
//!
//! ```
//! use beanpath::value::{Bean, BeanType, Value, ValueKind};
//!
//! let person = BeanType::builder("Person")
//!     .property("name", ValueKind::String)
//!     .build();
//! let user = BeanType::builder("User")
//!     .extends(&person)
//!     .property("age", ValueKind::I32)
//!     .build();
//!
//! let mut bean = Bean::new(&user);
//! bean.set("name", Value::from("Alice")).unwrap();
//! bean.set("age", Value::from("30")).unwrap(); // coerced to an integer
//! assert_eq!(bean.get("age"), Some(&Value::Integer(30)));
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;

use super::kind::ValueKind;
use super::Value;
use crate::bean::cache::{self, PropertyTable};
use crate::convert;
use crate::error::{BeanError, Result};

static NEXT_TYPE_ID: AtomicU64 = AtomicU64::new(1);

/// Which accessors a property exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accessor {
    #[default]
    ReadWrite,
    ReadOnly,
    WriteOnly,
}

impl Accessor {
    pub fn is_readable(self) -> bool {
        matches!(self, Accessor::ReadWrite | Accessor::ReadOnly)
    }

    pub fn is_writable(self) -> bool {
        matches!(self, Accessor::ReadWrite | Accessor::WriteOnly)
    }
}

/// A declared property of a bean type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDesc {
    name: String,
    kind: ValueKind,
    accessor: Accessor,
    declared_by: String,
}

impl PropertyDesc {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn accessor(&self) -> Accessor {
        self.accessor
    }

    /// Name of the type that declares this property.
    pub fn declared_by(&self) -> &str {
        &self.declared_by
    }
}

/// A named, immutable description of a bean's properties.
///
/// Types are shared through `Arc` and identified by a process-unique id, so
/// two types with the same name are still distinct.
#[derive(Debug)]
pub struct BeanType {
    id: u64,
    name: String,
    parent: Option<Arc<BeanType>>,
    properties: Vec<PropertyDesc>,
}

impl BeanType {
    /// Starts building a type with the given name.
    pub fn builder(name: impl Into<String>) -> BeanTypeBuilder {
        BeanTypeBuilder {
            name: name.into(),
            parent: None,
            properties: Vec::new(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name without any `module::` prefix.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }

    pub fn parent(&self) -> Option<&Arc<BeanType>> {
        self.parent.as_ref()
    }

    /// Properties declared directly on this type, in declaration order.
    pub fn declared_properties(&self) -> &[PropertyDesc] {
        &self.properties
    }

    /// Iterates this type followed by its ancestors, nearest first.
    pub fn lineage(&self) -> impl Iterator<Item = &BeanType> {
        std::iter::successors(Some(self), |ty| ty.parent.as_deref())
    }

    /// Returns true if `self` is `other` or descends from it.
    pub fn is_subtype_of(&self, other: &BeanType) -> bool {
        self.lineage().any(|ty| ty.id == other.id)
    }

    /// The resolved property table (inherited properties included).
    ///
    /// Tables are computed once per type and cached for the life of the
    /// process.
    pub fn properties(&self) -> Arc<PropertyTable> {
        cache::property_table(self)
    }
}

impl PartialEq for BeanType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Builder for [`BeanType`].
#[derive(Debug)]
pub struct BeanTypeBuilder {
    name: String,
    parent: Option<Arc<BeanType>>,
    properties: Vec<PropertyDesc>,
}

impl BeanTypeBuilder {
    /// Inherits every property of `parent`.
    pub fn extends(mut self, parent: &Arc<BeanType>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    /// Declares a readable and writable property.
    pub fn property(self, name: impl Into<String>, kind: ValueKind) -> Self {
        self.property_with(name, kind, Accessor::ReadWrite)
    }

    /// Declares a property that can be read but not written by the copier.
    pub fn read_only(self, name: impl Into<String>, kind: ValueKind) -> Self {
        self.property_with(name, kind, Accessor::ReadOnly)
    }

    /// Declares a property that can be written but not read by the copier.
    pub fn write_only(self, name: impl Into<String>, kind: ValueKind) -> Self {
        self.property_with(name, kind, Accessor::WriteOnly)
    }

    pub fn property_with(
        mut self,
        name: impl Into<String>,
        kind: ValueKind,
        accessor: Accessor,
    ) -> Self {
        let name = name.into();
        // Redeclaring a name replaces the earlier declaration.
        self.properties.retain(|p| p.name != name);
        self.properties.push(PropertyDesc {
            name,
            kind,
            accessor,
            declared_by: self.name.clone(),
        });
        self
    }

    pub fn build(self) -> Arc<BeanType> {
        Arc::new(BeanType {
            id: NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed),
            name: self.name,
            parent: self.parent,
            properties: self.properties,
        })
    }
}

/// An instance of a [`BeanType`].
#[derive(Debug, Clone)]
pub struct Bean {
    ty: Arc<BeanType>,
    values: IndexMap<String, Value>,
}

impl Bean {
    /// Creates a bean with every property set to `Null`.
    pub fn new(ty: &Arc<BeanType>) -> Self {
        let values = ty
            .properties()
            .iter()
            .map(|prop| (prop.name().to_string(), Value::Null))
            .collect();
        Self {
            ty: Arc::clone(ty),
            values,
        }
    }

    pub fn bean_type(&self) -> &Arc<BeanType> {
        &self.ty
    }

    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    /// Reads a property value. Accessor modes are not enforced here.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values.get_mut(name)
    }

    /// Writes a property, coercing the value to the declared kind.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        let table = self.ty.properties();
        let prop = table.get(name, false).ok_or_else(|| BeanError::PropertyAssignment {
            field: name.to_string(),
            source_type: value.type_name().to_string(),
            target_type: self.ty.name().to_string(),
            reason: "no such property".to_string(),
        })?;
        let converted =
            convert::convert(&value, prop.kind()).map_err(|e| BeanError::PropertyAssignment {
                field: name.to_string(),
                source_type: value.type_name().to_string(),
                target_type: prop.kind().to_string(),
                reason: e.to_string(),
            })?;
        self.values.insert(prop.name().to_string(), converted);
        Ok(())
    }

    /// Builder-style [`Bean::set`].
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self> {
        self.set(name, value.into())?;
        Ok(self)
    }

    /// Property names and values in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PartialEq for Bean {
    fn eq(&self, other: &Self) -> bool {
        self.ty.id() == other.ty.id() && self.values == other.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> Arc<BeanType> {
        BeanType::builder("app::Person")
            .property("name", ValueKind::String)
            .property("age", ValueKind::I32)
            .build()
    }

    #[test]
    fn test_new_bean_has_null_slots() {
        let bean = Bean::new(&person());
        assert_eq!(bean.len(), 2);
        assert_eq!(bean.get("name"), Some(&Value::Null));
    }

    #[test]
    fn test_set_coerces_to_declared_kind() {
        let mut bean = Bean::new(&person());
        bean.set("age", Value::Float(41.9)).unwrap();
        assert_eq!(bean.get("age"), Some(&Value::Integer(41)));
    }

    #[test]
    fn test_set_unknown_property_fails() {
        let mut bean = Bean::new(&person());
        let err = bean.set("email", Value::from("a@b")).unwrap_err();
        assert!(matches!(err, BeanError::PropertyAssignment { ref field, .. } if field == "email"));
    }

    #[test]
    fn test_subtype_lineage() {
        let base = person();
        let child = BeanType::builder("Employee")
            .extends(&base)
            .property("salary", ValueKind::F64)
            .build();
        assert!(child.is_subtype_of(&base));
        assert!(!base.is_subtype_of(&child));
        assert_eq!(child.lineage().count(), 2);
    }

    #[test]
    fn test_simple_name_strips_module() {
        assert_eq!(person().simple_name(), "Person");
    }

    #[test]
    fn test_redeclared_property_replaces_earlier() {
        let ty = BeanType::builder("T")
            .property("a", ValueKind::I32)
            .property("a", ValueKind::String)
            .build();
        assert_eq!(ty.declared_properties().len(), 1);
        assert_eq!(ty.declared_properties()[0].kind(), &ValueKind::String);
    }
}
