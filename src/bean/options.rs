//! Options controlling a property copy.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;

use super::naming::NamingStrategy;
use crate::value::BeanType;

/// Immutable copy configuration, built with [`CopyOptions::builder`].
///
/// # Example
///
/// ```
/// use beanpath::bean::CopyOptions;
///
/// let options = CopyOptions::builder()
///     .ignore_case(true)
///     .exclude("password")
///     .map_field("userName", "login")
///     .build();
/// assert!(options.is_excluded("password"));
/// assert_eq!(options.target_name("userName"), "login");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    ignore_case: bool,
    ignore_error: bool,
    ignore_null_value: bool,
    editable: Option<Arc<BeanType>>,
    excluded_fields: HashSet<String>,
    field_mapping: IndexMap<String, String>,
    naming_strategy: NamingStrategy,
}

impl CopyOptions {
    pub fn builder() -> CopyOptionsBuilder {
        CopyOptionsBuilder::default()
    }

    /// Ignores case, conversion errors and null source values.
    pub fn lenient() -> Self {
        Self::builder()
            .ignore_case(true)
            .ignore_error(true)
            .ignore_null_value(true)
            .build()
    }

    /// Match target properties case-insensitively.
    pub fn ignore_case(&self) -> bool {
        self.ignore_case
    }

    /// Skip properties that fail to convert instead of failing the copy.
    pub fn ignore_error(&self) -> bool {
        self.ignore_error
    }

    /// Leave target properties untouched when the source value is null.
    pub fn ignore_null_value(&self) -> bool {
        self.ignore_null_value
    }

    /// Only properties visible on this type are written.
    pub fn editable(&self) -> Option<&Arc<BeanType>> {
        self.editable.as_ref()
    }

    pub fn excluded_fields(&self) -> &HashSet<String> {
        &self.excluded_fields
    }

    pub fn field_mapping(&self) -> &IndexMap<String, String> {
        &self.field_mapping
    }

    pub fn naming_strategy(&self) -> NamingStrategy {
        self.naming_strategy
    }

    /// True if `name` is excluded. With `ignore_case` the comparison is
    /// case-insensitive.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_fields.contains(name)
            || (self.ignore_case
                && self
                    .excluded_fields
                    .iter()
                    .any(|excluded| eq_ignore_case(excluded, name)))
    }

    /// The target name a source property is copied to.
    ///
    /// An exact mapping entry wins; with `ignore_case` a mapping whose source
    /// differs only in case also applies.
    pub fn target_name<'a>(&'a self, source: &'a str) -> &'a str {
        if let Some(target) = self.field_mapping.get(source) {
            return target;
        }
        if self.ignore_case {
            if let Some((_, target)) = self
                .field_mapping
                .iter()
                .find(|(from, _)| eq_ignore_case(from, source))
            {
                return target;
            }
        }
        source
    }

    /// The same options with the field mapping inverted (target -> source).
    pub fn reversed(&self) -> Self {
        Self {
            field_mapping: self
                .field_mapping
                .iter()
                .map(|(from, to)| (to.clone(), from.clone()))
                .collect(),
            ..self.clone()
        }
    }
}

/// Case-insensitive name comparison shared by every copy target.
///
/// Uses Unicode lower-casing, the same rule as the property table lookup.
pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Builder for [`CopyOptions`].
#[derive(Debug, Default)]
pub struct CopyOptionsBuilder {
    options: CopyOptions,
}

impl CopyOptionsBuilder {
    pub fn ignore_case(mut self, yes: bool) -> Self {
        self.options.ignore_case = yes;
        self
    }

    pub fn ignore_error(mut self, yes: bool) -> Self {
        self.options.ignore_error = yes;
        self
    }

    pub fn ignore_null_value(mut self, yes: bool) -> Self {
        self.options.ignore_null_value = yes;
        self
    }

    pub fn editable(mut self, ty: &Arc<BeanType>) -> Self {
        self.options.editable = Some(Arc::clone(ty));
        self
    }

    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.options.excluded_fields.insert(name.into());
        self
    }

    pub fn exclude_all<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options
            .excluded_fields
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Copies source property `from` into target property `to`.
    pub fn map_field(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.options.field_mapping.insert(from.into(), to.into());
        self
    }

    pub fn naming_strategy(mut self, strategy: NamingStrategy) -> Self {
        self.options.naming_strategy = strategy;
        self
    }

    pub fn build(self) -> CopyOptions {
        self.options
    }
}
