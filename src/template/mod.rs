//! Placeholder scanning and substitution
//!
//! Resolution of an attribute value runs in two pure stages:
//! - [`scan`] turns the raw string into structured [`Token`]s
//! - [`substitute`] rewrites the string for one token given the resolved
//!   arguments
//!
//! Neither stage performs I/O or fails; unknown references are passed through.

pub mod scanner;
pub mod substitution;

pub use scanner::{contains_tokens, scan, scan_with_spans, Token};
pub use substitution::{
    bound_name, replace_word, substitute, substitute_all, unwrap_persisted, ScopeMarker,
};
