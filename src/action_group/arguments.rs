//! Declared and resolved action-group arguments
//!
//! An action group declares its arguments with optional defaults. At
//! invocation time the caller's values override the defaults; any argument
//! left without a value fails the invocation.

use crate::error::{MissingArgumentError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// How an argument's value is substituted into attribute templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ArgumentKind {
    /// Literal text
    #[serde(rename = "string")]
    PlainString,
    /// Name of a data entity, referenced as `{{arg.field}}`
    #[default]
    #[serde(rename = "entity")]
    Entity,
    /// A runtime value wrapped in a scope marker, e.g. `$createProduct$`
    #[serde(rename = "persisted")]
    PersistedReference,
}

/// An argument as declared by an action group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredArgument {
    pub name: String,

    /// Value used when the invocation supplies none; `None` makes the argument required
    #[serde(default, alias = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, rename = "type")]
    pub kind: ArgumentKind,
}

impl DeclaredArgument {
    /// A required argument
    pub fn required(name: impl Into<String>, kind: ArgumentKind) -> Self {
        Self {
            name: name.into(),
            value: None,
            kind,
        }
    }

    /// An argument with a default value
    pub fn with_default(
        name: impl Into<String>,
        value: impl Into<String>,
        kind: ArgumentKind,
    ) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            kind,
        }
    }

    pub fn is_required(&self) -> bool {
        self.value.is_none()
    }
}

/// An argument with its concrete value for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedArgument {
    pub name: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: ArgumentKind,
}

impl ResolvedArgument {
    pub fn new(name: impl Into<String>, value: impl Into<String>, kind: ArgumentKind) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
        }
    }
}

/// Resolved arguments keyed by name, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedArguments {
    by_name: IndexMap<String, ResolvedArgument>,
}

impl ResolvedArguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an argument; a later argument with the same name replaces the earlier one
    pub fn insert(&mut self, argument: ResolvedArgument) {
        self.by_name.insert(argument.name.clone(), argument);
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedArgument> {
        self.by_name.get(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedArgument> {
        self.by_name.values()
    }

    /// The raw argument list in declaration order
    pub fn into_vec(self) -> Vec<ResolvedArgument> {
        self.by_name.into_values().collect()
    }
}

impl FromIterator<ResolvedArgument> for ResolvedArguments {
    fn from_iter<I: IntoIterator<Item = ResolvedArgument>>(iter: I) -> Self {
        let mut resolved = Self::new();
        for argument in iter {
            resolved.insert(argument);
        }
        resolved
    }
}

impl IntoIterator for ResolvedArguments {
    type Item = ResolvedArgument;
    type IntoIter = indexmap::map::IntoValues<String, ResolvedArgument>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_name.into_values()
    }
}

/// Merge invocation overrides into the declared arguments of `action_group`
///
/// Overrides win over defaults and keep the declared kind. Every declared
/// argument left without a value is reported in a single
/// [`MissingArgumentError`].
pub fn resolve_arguments(
    action_group: &str,
    declared: &[DeclaredArgument],
    overrides: &HashMap<String, String>,
) -> Result<ResolvedArguments> {
    let mut resolved = ResolvedArguments::new();
    let mut missing = Vec::new();

    for argument in declared {
        match (overrides.get(&argument.name), &argument.value) {
            (Some(value), _) | (None, Some(value)) => resolved.insert(ResolvedArgument::new(
                argument.name.clone(),
                value.clone(),
                argument.kind,
            )),
            (None, None) => missing.push(argument.name.clone()),
        }
    }

    if !missing.is_empty() {
        return Err(MissingArgumentError::new(action_group, missing));
    }

    for name in overrides.keys() {
        if resolved.get(name).is_none() {
            debug!(
                "Ignoring argument '{}' not declared by action group '{}'",
                name, action_group
            );
        }
    }

    Ok(resolved)
}
