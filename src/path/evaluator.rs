//! Read access: resolving a [`BeanPath`] against a [`Value`].

use std::borrow::Cow;

use indexmap::IndexMap;
use log::trace;

use super::ast::{BeanPath, Segment, Slice};
use super::parser::unwrap_quotes;
use crate::value::{Access, Value};

pub struct Evaluator<'a> {
    root: &'a Value,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a Value) -> Self {
        Evaluator { root }
    }

    /// Resolves `path` against the root.
    ///
    /// Plain field, key and index steps borrow from the root. Slices and
    /// multi-selections build new containers, so anything below them is
    /// owned.
    pub fn evaluate(&self, path: &BeanPath) -> Option<Cow<'a, Value>> {
        let mut current: Cow<'a, Value> = Cow::Borrowed(self.root);

        for (i, segment) in path.segments().iter().enumerate() {
            let next = match &current {
                Cow::Borrowed(value) => step(*value, segment),
                Cow::Owned(value) => step(value, segment).map(|v| Cow::Owned(v.into_owned())),
            };

            match next {
                Some(value) if !value.is_null() => current = value,
                _ if i == 0 && !path.is_rooted() && self.names_root(segment) => {
                    trace!("'{}' resolved to the root by type name", segment);
                }
                _ => return None,
            }
        }

        (!current.is_null()).then_some(current)
    }

    /// A leading name may refer to the root bean itself (`user.name` on a
    /// `User`).
    fn names_root(&self, segment: &Segment) -> bool {
        segment
            .as_name()
            .is_some_and(|name| self.root.matches_type_name(name))
    }
}

impl BeanPath {
    /// Reads the value this path addresses, or `None` if it is absent.
    ///
    /// ```
    /// use beanpath::path::BeanPath;
    /// use beanpath::value::Value;
    ///
    /// let root = Value::from(serde_json::json!({"list": [10, 20, 30, 40, 50]}));
    /// let path = BeanPath::parse("list[1:4]").unwrap();
    /// let slice = path.get(&root).unwrap();
    /// assert_eq!(slice.as_list().unwrap().len(), 3);
    /// ```
    pub fn get<'v>(&self, root: &'v Value) -> Option<Cow<'v, Value>> {
        Evaluator::new(root).evaluate(self)
    }
}

/// Applies one segment to one value.
pub(crate) fn step<'v>(value: &'v Value, segment: &Segment) -> Option<Cow<'v, Value>> {
    trace!("applying [{}] to {}", segment, value.type_name());
    match (segment, value.access()) {
        (Segment::Name(name), Access::Index(items)) => {
            let index = name.trim().parse::<i64>().ok()?;
            items.at(index).map(Cow::Borrowed)
        }
        (Segment::Name(name), Access::Keys(map)) => map.key(name).map(Cow::Borrowed),
        (Segment::Name(name), Access::Fields(bean)) => bean.field(name).map(Cow::Borrowed),

        (Segment::Slice(slice), Access::Index(items)) => {
            let selected = slice_indices(slice, items.len())
                .into_iter()
                .filter_map(|i| items.at(i as i64).cloned())
                .collect();
            Some(Cow::Owned(Value::List(selected)))
        }

        (Segment::Multi(parts), Access::Index(items)) => {
            let mut selected = Vec::with_capacity(parts.len());
            for part in parts {
                let index = part.parse::<i64>().ok()?;
                if let Some(item) = items.at(index) {
                    selected.push(item.clone());
                }
            }
            Some(Cow::Owned(Value::List(selected)))
        }
        (Segment::Multi(parts), Access::Keys(map)) => {
            Some(Cow::Owned(pick(parts, |key| map.key(key))))
        }
        (Segment::Multi(parts), Access::Fields(bean)) => {
            Some(Cow::Owned(pick(parts, |name| bean.field(name))))
        }

        _ => None,
    }
}

fn pick<'v>(parts: &[String], lookup: impl Fn(&str) -> Option<&'v Value>) -> Value {
    let mut picked = IndexMap::new();
    for part in parts {
        let (key, _) = unwrap_quotes(part);
        if let Some(value) = lookup(key) {
            picked.insert(key.to_string(), value.clone());
        }
    }
    Value::Map(picked)
}

/// Positions selected by `slice` in a sequence of `len` items.
///
/// The end bound is exclusive. Negative bounds count from the end, reversed
/// bounds are swapped and a step below one is treated as one.
pub(crate) fn slice_indices(slice: &Slice, len: usize) -> Vec<usize> {
    let len = len as i64;
    let normalize = |bound: i64| if bound < 0 { (len + bound).max(0) } else { bound };

    let mut start = normalize(slice.start.unwrap_or(0));
    let mut end = normalize(slice.end.unwrap_or(len));
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    if start >= len {
        return Vec::new();
    }
    let end = end.min(len);
    let step = slice.step.filter(|&s| s >= 1).unwrap_or(1);

    (start..end).step_by(step as usize).map(|i| i as usize).collect()
}
