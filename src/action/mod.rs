//! Action steps and their ordering
//!
//! An [`ActionStep`] is one primitive operation inside a test script. Action
//! groups are expanded into ordered sequences of these records; the
//! [`sequencer`] module decides the final order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub mod sequencer;

pub use sequencer::{DeclarationOrder, LinkedStepSequencer, StepSequencer};

/// Provenance key holding the name of the action group that produced a step
pub const ACTION_GROUP_ORIGIN_NAME: &str = "actionGroupName";

/// Provenance key holding the invocation key of the action-group use-site
pub const ACTION_GROUP_ORIGIN_TEST_REF: &str = "testInvocationRef";

/// Order offset placing a linked step before its target
pub const ORDER_BEFORE: i32 = 0;

/// Order offset placing a linked step after its target
pub const ORDER_AFTER: i32 = 1;

/// A single test action with its attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionStep {
    /// Identifier of the step, unique within a script
    pub step_key: String,

    /// Action type, e.g. `click` or `fillField`
    #[serde(rename = "type")]
    pub action_type: String,

    /// Attribute name to raw attribute value
    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    /// Key of the step this one is ordered against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_action: Option<String>,

    /// Placement relative to `linked_action`
    #[serde(default)]
    pub order_offset: i32,

    /// Where this step came from; empty until stamped
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub action_origin: IndexMap<String, String>,
}

impl ActionStep {
    pub fn new(step_key: impl Into<String>, action_type: impl Into<String>) -> Self {
        Self {
            step_key: step_key.into(),
            action_type: action_type.into(),
            attributes: IndexMap::new(),
            linked_action: None,
            order_offset: ORDER_BEFORE,
            action_origin: IndexMap::new(),
        }
    }

    /// Add an attribute, replacing any previous value under the same name
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Order this step before the given step
    pub fn before(mut self, step_key: impl Into<String>) -> Self {
        self.linked_action = Some(step_key.into());
        self.order_offset = ORDER_BEFORE;
        self
    }

    /// Order this step after the given step
    pub fn after(mut self, step_key: impl Into<String>) -> Self {
        self.linked_action = Some(step_key.into());
        self.order_offset = ORDER_AFTER;
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Name of the action group that produced this step, if any
    pub fn origin_action_group(&self) -> Option<&str> {
        self.action_origin
            .get(ACTION_GROUP_ORIGIN_NAME)
            .map(String::as_str)
    }

    /// Invocation key of the action-group use-site that produced this step, if any
    pub fn origin_invocation_key(&self) -> Option<&str> {
        self.action_origin
            .get(ACTION_GROUP_ORIGIN_TEST_REF)
            .map(String::as_str)
    }
}
