//! Convenience functions over beans, maps and paths.

use std::sync::Arc;

use indexmap::IndexMap;

use super::copier::BeanCopier;
use super::naming::{format_keyword, NamingStrategy};
use super::options::{eq_ignore_case, CopyOptions};
use crate::error::{BeanError, Result};
use crate::path::{BeanPath, Segment};
use crate::value::{upper_first, Access, Bean, BeanType, Value, ValueKind};

/// Reads the value at `expression`. Malformed expressions are errors, absent
/// values are `Ok(None)`.
pub fn get_property(root: &Value, expression: &str) -> Result<Option<Value>> {
    let path = BeanPath::parse(expression)?;
    Ok(path.get(root).map(|v| v.into_owned()))
}

/// Writes `value` at `expression`, creating missing maps on the way.
pub fn set_property(root: &mut Value, expression: &str, value: impl Into<Value>) -> Result<()> {
    BeanPath::parse(expression)?.set(root, value)
}

/// Reads one field, key or index without parsing a path.
pub fn get_field_value<'v>(value: &'v Value, field_or_index: &str) -> Option<&'v Value> {
    match value.access() {
        Access::Fields(bean) => bean.field(field_or_index),
        Access::Keys(map) => map.key(field_or_index),
        Access::Index(items) => field_or_index
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|i| items.at(i)),
        Access::Scalar(_) => None,
    }
}

/// Writes one field, key or index without parsing a path.
pub fn set_field_value(root: &mut Value, field_or_index: &str, value: impl Into<Value>) -> Result<()> {
    BeanPath::new(vec![Segment::Name(field_or_index.to_string())], true).set(root, value)
}

pub fn copy_properties(source: &Value, target: &mut Value) -> Result<()> {
    copy_properties_with(source, target, &CopyOptions::default())
}

pub fn copy_properties_with(source: &Value, target: &mut Value, options: &CopyOptions) -> Result<()> {
    BeanCopier::new(source, target, options).copy()
}

pub fn copy_properties_ignore_case(source: &Value, target: &mut Value, ignore_case: bool) -> Result<()> {
    let options = CopyOptions::builder().ignore_case(ignore_case).build();
    copy_properties_with(source, target, &options)
}

pub fn copy_properties_excluding(source: &Value, target: &mut Value, excluded: &[&str]) -> Result<()> {
    let options = CopyOptions::builder()
        .exclude_all(excluded.iter().copied())
        .build();
    copy_properties_with(source, target, &options)
}

/// Flattens a bean (or map) into a map with unchanged keys.
pub fn to_map(source: &Value) -> Result<IndexMap<String, Value>> {
    to_map_with(source, NamingStrategy::Default, false)
}

/// Flattens a bean (or map) into a map, renaming keys and optionally
/// dropping null values.
pub fn to_map_with(
    source: &Value,
    naming_strategy: NamingStrategy,
    ignore_null_value: bool,
) -> Result<IndexMap<String, Value>> {
    let options = CopyOptions::builder()
        .naming_strategy(naming_strategy)
        .ignore_null_value(ignore_null_value)
        .build();
    let mut target = Value::map();
    BeanCopier::new(source, &mut target, &options).copy()?;
    match target {
        Value::Map(map) => Ok(map),
        other => Err(BeanError::UnsupportedTarget(other.type_name().to_string())),
    }
}

/// Builds a new bean of type `ty` from `source`.
pub fn to_bean(source: &Value, ty: &Arc<BeanType>, options: &CopyOptions) -> Result<Bean> {
    fill_bean(source, Bean::new(ty), options)
}

/// Copies `source` into `bean` and hands it back.
pub fn fill_bean(source: &Value, bean: Bean, options: &CopyOptions) -> Result<Bean> {
    let mut target = Value::Bean(bean);
    BeanCopier::new(source, &mut target, options).copy()?;
    match target {
        Value::Bean(bean) => Ok(bean),
        other => Err(BeanError::UnsupportedTarget(other.type_name().to_string())),
    }
}

/// Trims every string property, except those named in `ignore` (compared
/// case-insensitively).
pub fn trim_str_fields(bean: &mut Bean, ignore: &[&str]) {
    let table = bean.bean_type().properties();
    for prop in table.iter() {
        if !matches!(prop.kind(), ValueKind::String)
            || ignore.iter().any(|i| eq_ignore_case(i, prop.name()))
        {
            continue;
        }
        if let Some(Value::String(s)) = bean.get_mut(prop.name()) {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_string();
            }
        }
    }
}

/// True if any property outside `ignore` is null.
pub fn has_null_field(bean: &Bean, ignore: &[&str]) -> bool {
    bean.iter()
        .any(|(name, value)| !ignore.contains(&name) && value.is_null())
}

/// True if every property outside `ignore` is null.
pub fn is_empty(bean: &Bean, ignore: &[&str]) -> bool {
    bean.iter()
        .all(|(name, value)| ignore.contains(&name) || value.is_null())
}

pub fn is_not_empty(bean: &Bean, ignore: &[&str]) -> bool {
    !is_empty(bean, ignore)
}

/// Checks a bean's type name. With `simple` the module prefix is ignored and
/// `type_name` may start lower-case (`user` matches `app::User`).
pub fn is_match_name(value: &Value, type_name: &str, simple: bool) -> bool {
    let Some(bean) = value.as_bean() else {
        return false;
    };
    if simple {
        bean.bean_type().simple_name() == upper_first(type_name)
    } else {
        bean.type_name() == type_name
    }
}

/// Property names of `ty`, inherited ones first, rewritten by `strategy`.
pub fn format_keys(ty: &BeanType, strategy: NamingStrategy) -> Vec<String> {
    ty.properties()
        .iter()
        .map(|prop| format_keyword(prop.name(), strategy))
        .collect()
}

pub fn join_keys(ty: &BeanType, separator: &str) -> String {
    format_keys(ty, NamingStrategy::Default).join(separator)
}

/// Joins every property value of `bean`. Date/times use the canonical
/// `%Y-%m-%d %H:%M:%S` form.
pub fn join_values(bean: &Bean, separator: &str) -> String {
    bean.iter()
        .map(|(_, value)| value.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account() -> Arc<BeanType> {
        BeanType::builder("app::Account")
            .property("login", ValueKind::String)
            .property("email", ValueKind::String)
            .property("visits", ValueKind::I32)
            .build()
    }

    #[test]
    fn test_get_field_value_by_shape() {
        let value = Value::from(json!({"a": [1, 2, 3]}));
        assert_eq!(get_field_value(&value, "a").map(|v| v.is_container()), Some(true));
        let list = &value["a"];
        assert_eq!(get_field_value(list, "-1"), Some(&Value::Integer(3)));
        assert!(get_field_value(list, "x").is_none());
    }

    #[test]
    fn test_set_field_value_does_not_match_type_name() {
        let mut value = Value::Bean(Bean::new(&account()));
        let err = set_field_value(&mut value, "account", 1).unwrap_err();
        assert!(matches!(err, BeanError::PropertyAssignment { .. }));
    }

    #[test]
    fn test_trim_str_fields() {
        let mut bean = Bean::new(&account())
            .with("login", "  ann ")
            .unwrap()
            .with("email", " a@b ")
            .unwrap();
        trim_str_fields(&mut bean, &["EMAIL"]);
        assert_eq!(bean.get("login"), Some(&Value::from("ann")));
        assert_eq!(bean.get("email"), Some(&Value::from(" a@b ")));
    }

    #[test]
    fn test_null_checks() {
        let bean = Bean::new(&account()).with("login", "ann").unwrap();
        assert!(has_null_field(&bean, &[]));
        assert!(!has_null_field(&bean, &["email", "visits"]));
        assert!(is_not_empty(&bean, &[]));
        assert!(is_empty(&bean, &["login"]));
    }

    #[test]
    fn test_is_match_name() {
        let value = Value::Bean(Bean::new(&account()));
        assert!(is_match_name(&value, "account", true));
        assert!(is_match_name(&value, "app::Account", false));
        assert!(!is_match_name(&value, "Account", false));
    }

    #[test]
    fn test_keys_and_values() {
        let ty = account();
        assert_eq!(join_keys(&ty, ","), "login,email,visits");
        assert_eq!(
            format_keys(&ty, NamingStrategy::UpperUnderline),
            vec!["LOGIN", "EMAIL", "VISITS"]
        );
        let bean = Bean::new(&ty)
            .with("login", "ann")
            .unwrap()
            .with("visits", 3)
            .unwrap();
        assert_eq!(join_values(&bean, "|"), "ann|null|3");
    }

    #[test]
    fn test_to_map_drops_nulls() {
        let bean = Bean::new(&account()).with("login", "ann").unwrap();
        let map = to_map_with(&Value::Bean(bean), NamingStrategy::UpperDashed, true).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("LOGIN"), Some(&Value::from("ann")));
    }

    #[test]
    fn test_to_bean_from_map() {
        let source = Value::from(json!({"login": "ann", "visits": "7", "extra": true}));
        let bean = to_bean(&source, &account(), &CopyOptions::default()).unwrap();
        assert_eq!(bean.get("visits"), Some(&Value::Integer(7)));
        assert_eq!(bean.get("login"), Some(&Value::from("ann")));
    }
}
