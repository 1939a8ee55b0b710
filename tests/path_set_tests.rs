//! Integration tests for writing values through paths.

use beanpath::error::BeanError;
use beanpath::path::BeanPath;
use beanpath::value::{Bean, BeanType, Value, ValueKind};
use serde_json::json;

fn set(root: &mut Value, expr: &str, value: impl Into<Value>) -> Result<(), BeanError> {
    BeanPath::parse(expr).unwrap().set(root, value)
}

fn get(root: &Value, expr: &str) -> Option<Value> {
    BeanPath::parse(expr).unwrap().get(root).map(|v| v.into_owned())
}

#[test]
fn test_set_creates_intermediate_maps() {
    let mut root = Value::map();
    set(&mut root, "a.b.c", 42).unwrap();
    assert_eq!(root["a"]["b"]["c"], 42);
    assert_eq!(root, Value::from(json!({"a": {"b": {"c": 42}}})));
}

#[test]
fn test_set_then_get_roundtrips() {
    let mut root = Value::from(json!({"list": [1, 2, 3], "map": {}}));
    let cases = [
        ("map.key", Value::from("v")),
        ("list[1]", Value::from(20)),
        ("list[-1]", Value::from(30)),
        ("deep.inner.value", Value::from(true)),
        ("['odd key']", Value::from(1.5)),
    ];
    for (expr, value) in cases {
        set(&mut root, expr, value.clone()).unwrap();
        assert_eq!(get(&root, expr), Some(value), "{}", expr);
    }
}

#[test]
fn test_set_appends_past_the_end() {
    let mut root = Value::from(json!({"list": [1]}));
    set(&mut root, "list[7]", 2).unwrap();
    set(&mut root, "list[-9]", 3).unwrap();
    assert_eq!(root["list"], Value::from(json!([1, 2, 3])));
}

#[test]
fn test_set_into_nested_list_element() {
    let mut root = Value::from(json!({"people": [{"name": "a"}, {"name": "b"}]}));
    set(&mut root, "people[1].age", 7).unwrap();
    assert_eq!(root["people"][1]["age"], 7);
    assert_eq!(root["people"][1]["name"], "b");
}

#[test]
fn test_set_missing_list_element_materializes_map() {
    let mut root = Value::from(json!({"people": []}));
    set(&mut root, "people[0].name", "x").unwrap();
    assert_eq!(root, Value::from(json!({"people": [{"name": "x"}]})));
}

#[test]
fn test_set_on_scalar_parent_fails() {
    let mut root = Value::from(json!({"n": 1}));
    assert!(matches!(
        set(&mut root, "n.x", 1),
        Err(BeanError::Unwritable { .. })
    ));
    assert!(matches!(
        set(&mut root, "n.x.y", 1),
        Err(BeanError::Unwritable { .. })
    ));
    assert_eq!(root, Value::from(json!({"n": 1})));
}

#[test]
fn test_set_with_multi_or_slice_fails() {
    let mut root = Value::from(json!({"list": [1, 2]}));
    assert!(matches!(
        set(&mut root, "list[0,1]", 1),
        Err(BeanError::Unwritable { .. })
    ));
    assert!(matches!(
        set(&mut root, "list[:]", 1),
        Err(BeanError::Unwritable { .. })
    ));
}

#[test]
fn test_set_non_numeric_list_index_fails() {
    let mut root = Value::from(json!({"list": [1, 2]}));
    let err = set(&mut root, "list.first", 1).unwrap_err();
    assert_eq!(
        err,
        BeanError::InvalidIndex {
            segment: "first".to_string()
        }
    );
}

#[test]
fn test_set_bean_property() {
    let ty = BeanType::builder("Point")
        .property("x", ValueKind::I32)
        .property("tags", ValueKind::List)
        .property("extra", ValueKind::Map)
        .build();
    let mut root = Value::Bean(Bean::new(&ty));

    set(&mut root, "x", "12").unwrap();
    set(&mut root, "tags", "a,b").unwrap();
    set(&mut root, "extra.note", "hi").unwrap();

    assert_eq!(root["x"], 12);
    assert_eq!(root["tags"], Value::from(json!(["a", "b"])));
    assert_eq!(root["extra"]["note"], "hi");

    let err = set(&mut root, "y", 1).unwrap_err();
    assert!(matches!(err, BeanError::PropertyAssignment { .. }));
    let err = set(&mut root, "x", "twelve").unwrap_err();
    assert!(matches!(err, BeanError::PropertyAssignment { .. }));
}

#[test]
fn test_set_replaces_root_on_empty_path() {
    let mut root = Value::from(json!({"a": 1}));
    set(&mut root, "", json!([1, 2])).unwrap();
    assert_eq!(root, Value::from(json!([1, 2])));
}
