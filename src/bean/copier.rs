//! Copies same-named properties from one structured value into another.

use std::sync::Arc;

use log::{debug, trace};

use super::cache::PropertyTable;
use super::naming::format_keyword;
use super::options::{eq_ignore_case, CopyOptions};
use crate::convert;
use crate::error::{BeanError, Result};
use crate::value::{Bean, Value};

/// A single copy from `source` into `target`.
///
/// Sources may be beans (readable properties) or maps. Targets may be beans
/// (writable properties, values coerced to the declared kind) or maps (keys
/// rewritten by the naming strategy).
///
/// # Example
///
/// ```
/// use beanpath::bean::{BeanCopier, CopyOptions};
/// use beanpath::value::Value;
///
/// let source = Value::from(serde_json::json!({"name": null, "age": 5}));
/// let mut target = Value::from(serde_json::json!({"name": "X", "age": 0}));
/// let options = CopyOptions::builder().ignore_null_value(true).build();
///
/// BeanCopier::new(&source, &mut target, &options).copy().unwrap();
/// assert_eq!(target["name"], "X");
/// assert_eq!(target["age"], 5);
/// ```
pub struct BeanCopier<'a> {
    source: &'a Value,
    target: &'a mut Value,
    options: &'a CopyOptions,
}

impl<'a> BeanCopier<'a> {
    pub fn new(source: &'a Value, target: &'a mut Value, options: &'a CopyOptions) -> Self {
        Self {
            source,
            target,
            options,
        }
    }

    /// Runs the copy. Properties assigned before an error stay assigned.
    pub fn copy(self) -> Result<()> {
        let options = self.options;
        let source = source_entries(self.source)?;

        match self.target {
            Value::Bean(bean) => {
                if let Some(editable) = options.editable() {
                    if !bean.bean_type().is_subtype_of(editable) {
                        return Err(BeanError::NotEditable {
                            target: bean.type_name().to_string(),
                            editable: editable.name().to_string(),
                        });
                    }
                }
                let table = bean.bean_type().properties();
                for (name, value) in &source {
                    copy_into_bean(name, value, bean, &table, options)?;
                }
                Ok(())
            }
            Value::Map(map) => {
                for (name, value) in &source {
                    if skip_source(name, value, options) {
                        continue;
                    }
                    let key = format_keyword(options.target_name(name), options.naming_strategy());
                    let key = if options.ignore_case() {
                        map.keys()
                            .find(|existing| eq_ignore_case(existing, &key))
                            .cloned()
                            .unwrap_or(key)
                    } else {
                        key
                    };
                    if options.is_excluded(&key) {
                        trace!("key '{}' is excluded", key);
                        continue;
                    }
                    trace!("copying '{}' into key '{}'", name, key);
                    map.insert(key, (*value).clone());
                }
                Ok(())
            }
            other => Err(BeanError::UnsupportedTarget(other.type_name().to_string())),
        }
    }
}

fn source_entries(source: &Value) -> Result<Vec<(&str, &Value)>> {
    match source {
        Value::Bean(bean) => {
            let table = bean.bean_type().properties();
            Ok(bean
                .iter()
                .filter(|(name, _)| {
                    table
                        .get(name, false)
                        .is_some_and(|prop| prop.accessor().is_readable())
                })
                .collect())
        }
        Value::Map(map) => Ok(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
        other => Err(BeanError::UnsupportedSource(other.type_name().to_string())),
    }
}

/// Exclusion and null checks shared by both target shapes.
fn skip_source(name: &str, value: &Value, options: &CopyOptions) -> bool {
    if options.is_excluded(name) || options.is_excluded(options.target_name(name)) {
        trace!("'{}' is excluded", name);
        return true;
    }
    if value.is_null() && options.ignore_null_value() {
        trace!("'{}' is null, skipped", name);
        return true;
    }
    false
}

fn copy_into_bean(
    name: &str,
    value: &Value,
    bean: &mut Bean,
    table: &Arc<PropertyTable>,
    options: &CopyOptions,
) -> Result<()> {
    if skip_source(name, value, options) {
        return Ok(());
    }
    let target_name = options.target_name(name);
    let Some(prop) = table.get(target_name, options.ignore_case()) else {
        trace!("{} has no property '{}'", bean.type_name(), target_name);
        return Ok(());
    };
    if options.is_excluded(prop.name()) {
        trace!("'{}' is excluded", prop.name());
        return Ok(());
    }
    if !prop.accessor().is_writable() {
        trace!("'{}' is not writable", prop.name());
        return Ok(());
    }
    if let Some(editable) = options.editable() {
        if !editable.properties().contains(prop.name()) {
            trace!("'{}' is not visible on {}", prop.name(), editable.name());
            return Ok(());
        }
    }

    match convert::convert(value, prop.kind()) {
        Ok(converted) => {
            if let Some(slot) = bean.get_mut(prop.name()) {
                *slot = converted;
            }
            Ok(())
        }
        Err(e) if options.ignore_error() => {
            debug!("skipping '{}' -> '{}': {}", name, prop.name(), e);
            Ok(())
        }
        Err(e) => Err(BeanError::PropertyAssignment {
            field: name.to_string(),
            source_type: value.type_name().to_string(),
            target_type: prop.kind().to_string(),
            reason: e.to_string(),
        }),
    }
}
