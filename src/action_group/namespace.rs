//! Step-key namespacing for action-group invocations
//!
//! The same action group can be invoked several times from one test. Every
//! invocation suffixes its step keys (and links between them) with the
//! capitalized invocation key so the expanded steps never collide.

use crate::action::{ActionStep, ACTION_GROUP_ORIGIN_NAME, ACTION_GROUP_ORIGIN_TEST_REF};

/// Pure: `step_key` suffixed with `invocation_key`, first character uppercased
///
/// `namespaced_key("fillUsername", "step1") == "fillUsernameStep1"`.
///
/// Invocation keys that differ only in the case of their first character
/// (`login` and `Login`) produce the same suffix. Callers must not use such
/// pairs for the same action group within one test.
pub fn namespaced_key(step_key: &str, invocation_key: &str) -> String {
    let mut chars = invocation_key.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", step_key, first.to_uppercase(), chars.as_str()),
        None => step_key.to_string(),
    }
}

/// Pure: Copy `step` into the namespace of one invocation of `action_group`
///
/// The step key and any linked action are suffixed; provenance is stamped.
/// Link targets are assumed to belong to the same invocation.
pub fn namespace_step(step: &ActionStep, action_group: &str, invocation_key: &str) -> ActionStep {
    let mut namespaced = step.clone();
    namespaced.step_key = namespaced_key(&step.step_key, invocation_key);
    namespaced.linked_action = step
        .linked_action
        .as_deref()
        .map(|link| namespaced_key(link, invocation_key));

    let origin = &mut namespaced.action_origin;
    origin.clear();
    origin.insert(ACTION_GROUP_ORIGIN_NAME.into(), action_group.into());
    origin.insert(ACTION_GROUP_ORIGIN_TEST_REF.into(), invocation_key.into());

    namespaced
}
