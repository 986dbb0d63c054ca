//! # actiongroup
//!
//! Resolves reusable, parameterized action groups into concrete test steps.
//!
//! An action group declares arguments and a sequence of steps whose attribute
//! values may reference those arguments through `{{arg}}`, `{{arg.field}}` and
//! `{{section.element(arg.field)}}` placeholders. Invoking a group with
//! concrete values and an invocation key yields fully substituted steps with
//! step keys namespaced for that invocation.
//!
//! ## Modules
//!
//! - `action` - Action step records and step sequencing
//! - `action_group` - Action-group definitions, argument resolution, namespacing
//! - `config` - Resolver configuration (variable-enabled attributes)
//! - `error` - The missing-argument error
//! - `template` - Placeholder scanning and type-aware substitution
pub mod action;
pub mod action_group;
pub mod config;
pub mod error;
pub mod template;

pub use action::ActionStep;
pub use action_group::ActionGroupDefinition;
pub use error::MissingArgumentError;
