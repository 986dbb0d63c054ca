//! Reusable, parameterized action groups
//!
//! An [`ActionGroupDefinition`] is a named sequence of action steps whose
//! attributes may reference the group's declared arguments through
//! `{{...}}` placeholders. Invoking the group resolves the arguments,
//! substitutes them into every variable-enabled attribute and namespaces the
//! step keys so the group can be used more than once in the same test.
//!
//! # Examples
//!
//! ```
//! use actiongroup::action::ActionStep;
//! use actiongroup::action_group::{ActionGroupDefinition, ArgumentKind, DeclaredArgument};
//! use std::collections::HashMap;
//!
//! let group = ActionGroupDefinition::new(
//!     "LoginActionGroup",
//!     vec![DeclaredArgument::required("username", ArgumentKind::PlainString)],
//!     vec![ActionStep::new("fillUsername", "fillField").with_attribute("value", "{{username}}")],
//! );
//!
//! let args = HashMap::from([("username".to_string(), "admin".to_string())]);
//! let steps = group.get_steps(&args, "step1").unwrap();
//!
//! assert_eq!(steps[0].step_key, "fillUsernameStep1");
//! assert_eq!(steps[0].attribute("value"), Some("admin"));
//! ```

use crate::action::{ActionStep, LinkedStepSequencer, StepSequencer};
use crate::config::ResolverConfig;
use crate::error::Result;
use crate::template::substitute_all;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, trace};

pub mod arguments;
pub mod namespace;

pub use arguments::{
    resolve_arguments, ArgumentKind, DeclaredArgument, ResolvedArgument, ResolvedArguments,
};
pub use namespace::{namespace_step, namespaced_key};

/// A named, parameterized sequence of action steps
///
/// Immutable once constructed; every invocation works on its own copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionGroupDefinition {
    name: String,
    #[serde(default)]
    arguments: Vec<DeclaredArgument>,
    #[serde(default)]
    actions: Vec<ActionStep>,
}

impl ActionGroupDefinition {
    pub fn new(
        name: impl Into<String>,
        arguments: Vec<DeclaredArgument>,
        actions: Vec<ActionStep>,
    ) -> Self {
        Self {
            name: name.into(),
            arguments,
            actions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[DeclaredArgument] {
        &self.arguments
    }

    pub fn actions(&self) -> &[ActionStep] {
        &self.actions
    }

    /// Resolve the group for one invocation and return its ordered steps
    ///
    /// Scans every attribute, not only the selector, data and `url` attributes
    /// listed by [`ResolverConfig::standard`], so attributes such as `value`
    /// are substituted too. Steps are ordered with [`LinkedStepSequencer`].
    pub fn get_steps(
        &self,
        arguments: &HashMap<String, String>,
        invocation_key: &str,
    ) -> Result<Vec<ActionStep>> {
        self.get_steps_with(
            &LinkedStepSequencer,
            &ResolverConfig::default(),
            arguments,
            invocation_key,
        )
    }

    /// Like [`get_steps`](Self::get_steps) with an explicit sequencer and configuration
    pub fn get_steps_with(
        &self,
        sequencer: &dyn StepSequencer,
        config: &ResolverConfig,
        arguments: &HashMap<String, String>,
        invocation_key: &str,
    ) -> Result<Vec<ActionStep>> {
        let resolved = self.resolved_actions(config, arguments, invocation_key)?;
        Ok(sequencer.sequence(resolved, true))
    }

    /// Resolve the group for one invocation without ordering
    ///
    /// Returns the namespaced steps keyed by their new step key, in
    /// declaration order.
    pub fn resolved_actions(
        &self,
        config: &ResolverConfig,
        arguments: &HashMap<String, String>,
        invocation_key: &str,
    ) -> Result<IndexMap<String, ActionStep>> {
        let resolved = resolve_arguments(&self.name, &self.arguments, arguments)?;
        debug!(
            "Resolving action group '{}' ({} arguments) for invocation '{}'",
            self.name,
            resolved.len(),
            invocation_key
        );

        Ok(self
            .actions
            .iter()
            .map(|action| {
                let substituted = self.substitute_attributes(action, config, &resolved);
                let step = namespace_step(&substituted, &self.name, invocation_key);
                (step.step_key.clone(), step)
            })
            .collect())
    }

    /// The original, pre-namespacing step keys in declaration order
    pub fn extract_step_keys(&self) -> Vec<String> {
        self.actions.iter().map(|a| a.step_key.clone()).collect()
    }

    fn substitute_attributes(
        &self,
        action: &ActionStep,
        config: &ResolverConfig,
        resolved: &ResolvedArguments,
    ) -> ActionStep {
        let mut substituted = action.clone();

        for (name, value) in substituted.attributes.iter_mut() {
            if !config.is_variable_attribute(name) {
                continue;
            }

            let new_value = substitute_all(value, resolved);
            if new_value != *value {
                trace!(
                    "{}.{}: '{}' -> '{}'",
                    action.step_key,
                    name,
                    value,
                    new_value
                );
                *value = new_value;
            }
        }

        substituted
    }
}
