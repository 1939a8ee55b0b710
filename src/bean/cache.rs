//! Process-wide cache of resolved property tables.
//!
//! Resolving a type's properties walks its whole ancestry, so the result is
//! computed once per type and kept for the life of the process. Population
//! goes through `DashMap::entry`, which makes compute-if-absent atomic: when
//! two threads race on the same type, the first insert wins and both observe
//! the same table.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use log::trace;
use once_cell::sync::Lazy;

use crate::value::{BeanType, PropertyDesc};

static PROPERTY_TABLES: Lazy<DashMap<u64, Arc<PropertyTable>>> = Lazy::new(DashMap::new);

/// All properties visible on a bean type, inherited ones included.
///
/// Ancestor properties come first; a property redeclared by a descendant
/// keeps the ancestor's position but takes the descendant's description.
#[derive(Debug)]
pub struct PropertyTable {
    properties: Vec<PropertyDesc>,
    by_name: HashMap<String, usize>,
    by_lower_name: HashMap<String, usize>,
}

impl PropertyTable {
    fn resolve(ty: &BeanType) -> Self {
        let mut lineage: Vec<&BeanType> = ty.lineage().collect();
        lineage.reverse();

        let mut properties: Vec<PropertyDesc> = Vec::new();
        let mut by_name = HashMap::new();
        for ancestor in lineage {
            for prop in ancestor.declared_properties() {
                match by_name.get(prop.name()) {
                    Some(&idx) => properties[idx] = prop.clone(),
                    None => {
                        by_name.insert(prop.name().to_string(), properties.len());
                        properties.push(prop.clone());
                    }
                }
            }
        }

        let mut by_lower_name = HashMap::new();
        for (idx, prop) in properties.iter().enumerate() {
            by_lower_name
                .entry(prop.name().to_lowercase())
                .or_insert(idx);
        }

        Self {
            properties,
            by_name,
            by_lower_name,
        }
    }

    /// Looks up a property, optionally ignoring case.
    ///
    /// An exact match always wins over a case-insensitive one.
    pub fn get(&self, name: &str, ignore_case: bool) -> Option<&PropertyDesc> {
        let idx = match self.by_name.get(name) {
            Some(idx) => Some(idx),
            None if ignore_case => self.by_lower_name.get(&name.to_lowercase()),
            None => None,
        };
        idx.map(|&i| &self.properties[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PropertyDesc> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Returns the cached property table for `ty`, resolving it on first use.
pub fn property_table(ty: &BeanType) -> Arc<PropertyTable> {
    if let Some(table) = PROPERTY_TABLES.get(&ty.id()) {
        return Arc::clone(table.value());
    }
    // Resolution must not touch the map: it would deadlock on the shard lock.
    let entry = PROPERTY_TABLES.entry(ty.id()).or_insert_with(|| {
        trace!("resolving property table for {}", ty.name());
        Arc::new(PropertyTable::resolve(ty))
    });
    Arc::clone(entry.value())
}

/// Number of types with a cached table.
pub fn cached_types() -> usize {
    PROPERTY_TABLES.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;
    use std::thread;

    #[test]
    fn test_inherited_properties_come_first() {
        let base = BeanType::builder("Base")
            .property("id", ValueKind::I64)
            .build();
        let child = BeanType::builder("Child")
            .extends(&base)
            .property("name", ValueKind::String)
            .property("id", ValueKind::String)
            .build();

        let table = property_table(&child);
        let names: Vec<_> = table.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["id", "name"]);
        assert_eq!(table.get("id", false).unwrap().kind(), &ValueKind::String);
        assert_eq!(table.get("id", false).unwrap().declared_by(), "Child");
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let ty = BeanType::builder("T")
            .property("userName", ValueKind::String)
            .build();
        let table = property_table(&ty);
        assert!(table.get("USERNAME", false).is_none());
        assert_eq!(table.get("USERNAME", true).unwrap().name(), "userName");
    }

    #[test]
    fn test_same_table_is_shared() {
        let ty = BeanType::builder("Shared")
            .property("a", ValueKind::Any)
            .build();
        let first = property_table(&ty);
        let second = property_table(&ty);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_concurrent_population_yields_one_table() {
        let ty = BeanType::builder("Raced")
            .property("a", ValueKind::Any)
            .build();
        let tables: Vec<Arc<PropertyTable>> = (0..8)
            .map(|_| {
                let ty = Arc::clone(&ty);
                thread::spawn(move || property_table(&ty))
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();
        assert!(tables.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
