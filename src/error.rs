use thiserror::Error;

/// Raised when an action group is invoked without a value for one or more
/// arguments that declare no default.
///
/// Every missing name is reported at once, in declaration order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Arguments missed ({}) for actionGroup \"{action_group}\"", .missing.join(", "))]
pub struct MissingArgumentError {
    /// Name of the action group being invoked
    pub action_group: String,
    /// Names of the required arguments that received no value
    pub missing: Vec<String>,
}

impl MissingArgumentError {
    pub fn new(action_group: impl Into<String>, missing: Vec<String>) -> Self {
        Self {
            action_group: action_group.into(),
            missing,
        }
    }
}

pub type Result<T> = std::result::Result<T, MissingArgumentError>;
