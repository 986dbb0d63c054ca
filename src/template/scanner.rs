//! Lexical scanning of `{{...}}` placeholder tokens
//!
//! A token is either `{{mainRef}}` or `{{mainRef(arg1, 'arg2', ...)}}`. The
//! scanner only recognizes shape; whether a reference is bound to an argument
//! is decided later during substitution.
//!
//! # Examples
//!
//! ```
//! use actiongroup::template::scan;
//!
//! let tokens = scan("{{AdminProductGrid.row(product.sku, '2')}} and {{url}}");
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].main_ref, "AdminProductGrid.row");
//! assert_eq!(tokens[0].inner_args, vec!["product.sku", "'2'"]);
//! assert_eq!(tokens[1].main_ref, "url");
//! assert!(tokens[1].inner_args.is_empty());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Matches `{{main.ref}}` and `{{main.ref(inner, args)}}`
///
/// Group 1 is the main reference, group 2 the raw inner argument list.
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_.\[\]]+)\(*([A-Za-z0-9_.$',\s\[\]]+)?\)*\}\}")
        .expect("Valid regex pattern")
});

/// A placeholder reference found in an attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Dotted/bracketed path before any parameter list
    pub main_ref: String,
    /// Trimmed, non-empty parameters in order; quotes are preserved
    pub inner_args: Vec<String>,
}

impl Token {
    pub fn new(main_ref: impl Into<String>) -> Self {
        Self {
            main_ref: main_ref.into(),
            inner_args: Vec::new(),
        }
    }

    pub fn with_inner_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner_args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// Pure: Find every placeholder token in `text`, in order of appearance
///
/// Delimited text without a recognizable main reference (e.g. `{{}}` or
/// `{{ spaced }}`) is skipped.
pub fn scan(text: &str) -> Vec<Token> {
    scan_with_spans(text)
        .into_iter()
        .map(|(_, token)| token)
        .collect()
}

/// Pure: Like [`scan`], also returning the byte range each token occupies
///
/// Ranges are ordered and never overlap.
pub fn scan_with_spans(text: &str) -> Vec<(Range<usize>, Token)> {
    TOKEN_REGEX
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let token = Token {
                main_ref: cap[1].to_string(),
                inner_args: cap
                    .get(2)
                    .map(|m| split_inner_args(m.as_str()))
                    .unwrap_or_default(),
            };
            Some((whole.range(), token))
        })
        .collect()
}

/// Pure: Whether `text` contains at least one placeholder token
pub fn contains_tokens(text: &str) -> bool {
    TOKEN_REGEX.is_match(text)
}

fn split_inner_args(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect()
}
