//! Write access: assigning through a [`BeanPath`], creating missing
//! intermediate containers as empty maps.

use log::debug;

use super::ast::{BeanPath, Segment};
use super::evaluator::step;
use crate::error::{BeanError, Result};
use crate::value::{AccessMut, Value};

impl BeanPath {
    /// Writes `value` at the location this path addresses.
    ///
    /// Missing or `Null` intermediate locations are filled with empty maps
    /// first. An empty path replaces the root.
    ///
    /// ```
    /// use beanpath::path::BeanPath;
    /// use beanpath::value::Value;
    ///
    /// let mut root = Value::map();
    /// BeanPath::parse("a.b.c").unwrap().set(&mut root, 42).unwrap();
    /// assert_eq!(root["a"]["b"]["c"], 42);
    /// ```
    pub fn set(&self, root: &mut Value, value: impl Into<Value>) -> Result<()> {
        assign(root, self.segments(), self.is_rooted(), value.into())
    }
}

fn assign(root: &mut Value, segments: &[Segment], rooted: bool, value: Value) -> Result<()> {
    let Some((last, parents)) = segments.split_last() else {
        *root = value;
        return Ok(());
    };

    if resolve_mut(root, parents, rooted).is_none() {
        debug!(
            "creating empty map at '{}'",
            BeanPath::new(parents.to_vec(), rooted)
        );
        assign(root, parents, rooted, Value::map())?;
    }

    let parent = resolve_mut(root, parents, rooted).ok_or_else(|| BeanError::Unwritable {
        segment: last.to_string(),
        container: BeanPath::new(parents.to_vec(), rooted).to_string(),
    })?;
    write(parent, last, value)
}

/// Mutable counterpart of the evaluator, limited to name segments. `Null`
/// counts as absent.
fn resolve_mut<'v>(root: &'v mut Value, segments: &[Segment], rooted: bool) -> Option<&'v mut Value> {
    let mut current = root;
    for (i, segment) in segments.iter().enumerate() {
        let name = segment.as_name()?;
        if i == 0 && !rooted {
            let found = step(current, segment).is_some_and(|v| !v.is_null());
            if !found && current.matches_type_name(name) {
                continue;
            }
        }
        current = child_mut(current, name).filter(|v| !v.is_null())?;
    }
    Some(current)
}

fn child_mut<'v>(value: &'v mut Value, name: &str) -> Option<&'v mut Value> {
    match value.access_mut() {
        AccessMut::Index(items) => {
            let index = name.trim().parse::<i64>().ok()?;
            items.at_mut(index)
        }
        AccessMut::Keys(map) => map.key_mut(name),
        AccessMut::Fields(bean) => bean.field_mut(name),
        AccessMut::Scalar(_) => None,
    }
}

fn write(parent: &mut Value, segment: &Segment, value: Value) -> Result<()> {
    let container = parent.type_name().to_string();
    let name = match segment {
        Segment::Name(name) => name,
        other => {
            return Err(BeanError::Unwritable {
                segment: other.to_string(),
                container,
            })
        }
    };

    match parent.access_mut() {
        AccessMut::Keys(map) => {
            map.put_key(name.clone(), value);
            Ok(())
        }
        AccessMut::Index(items) => {
            let index = name
                .trim()
                .parse::<i64>()
                .map_err(|_| BeanError::InvalidIndex {
                    segment: name.clone(),
                })?;
            items.set_or_append(index, value);
            Ok(())
        }
        AccessMut::Fields(bean) => {
            let table = bean.bean_type().properties();
            if let Some(prop) = table.get(name, false) {
                if !prop.accessor().is_writable() {
                    return Err(BeanError::PropertyAssignment {
                        field: name.clone(),
                        source_type: value.type_name().to_string(),
                        target_type: container,
                        reason: "property is read-only".to_string(),
                    });
                }
            }
            bean.set_field(name, value)
        }
        AccessMut::Scalar(_) => Err(BeanError::Unwritable {
            segment: name.clone(),
            container,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Bean, BeanType, ValueKind};

    fn path(expr: &str) -> BeanPath {
        BeanPath::parse(expr).unwrap()
    }

    #[test]
    fn test_set_materializes_maps() {
        let mut root = Value::map();
        path("a.b.c").set(&mut root, 42).unwrap();
        assert_eq!(root["a"]["b"]["c"], 42);
    }

    #[test]
    fn test_set_replaces_null_intermediate() {
        let mut root = Value::from(serde_json::json!({"a": null}));
        path("a.b").set(&mut root, "x").unwrap();
        assert_eq!(root["a"]["b"], "x");
    }

    #[test]
    fn test_set_list_appends_out_of_range() {
        let mut root = Value::from(serde_json::json!({"items": [1, 2]}));
        path("items[5]").set(&mut root, 3).unwrap();
        path("items[0]").set(&mut root, 10).unwrap();
        path("items[-1]").set(&mut root, 30).unwrap();
        assert_eq!(root["items"], Value::from(serde_json::json!([10, 2, 30])));
    }

    #[test]
    fn test_set_list_non_numeric_index() {
        let mut root = Value::from(serde_json::json!({"items": [1]}));
        let err = path("items.first").set(&mut root, 3).unwrap_err();
        assert!(matches!(err, BeanError::InvalidIndex { .. }));
    }

    #[test]
    fn test_set_into_scalar_fails() {
        let mut root = Value::from(serde_json::json!({"a": 5}));
        let err = path("a.b").set(&mut root, 1).unwrap_err();
        assert!(matches!(err, BeanError::Unwritable { .. }));
    }

    #[test]
    fn test_set_slice_fails() {
        let mut root = Value::from(serde_json::json!({"items": [1, 2, 3]}));
        let err = path("items[0:2]").set(&mut root, 1).unwrap_err();
        assert!(matches!(err, BeanError::Unwritable { .. }));
    }

    #[test]
    fn test_set_empty_path_replaces_root() {
        let mut root = Value::from(1);
        path("").set(&mut root, "new").unwrap();
        assert_eq!(root, "new");
    }

    #[test]
    fn test_set_bean_field_coerces() {
        let ty = BeanType::builder("User")
            .property("age", ValueKind::I32)
            .read_only("id", ValueKind::I64)
            .build();
        let mut root = Value::Bean(Bean::new(&ty));
        path("user.age").set(&mut root, "33").unwrap();
        assert_eq!(root["age"], 33);

        let err = path("id").set(&mut root, 1).unwrap_err();
        assert!(matches!(err, BeanError::PropertyAssignment { .. }));
    }
}
