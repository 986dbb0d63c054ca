//! Argument substitution into scanned tokens
//!
//! Each reference inside a [`Token`] binds to a resolved argument through its
//! leading path segment (`product` in `product.sku`). What happens next depends
//! on the argument's kind:
//!
//! - plain strings replace `{{name}}` literally, or the bare name
//!   (word-boundary safe) when the reference has a field path or sits in a
//!   parameter list
//! - entity references replace the bare name, word-boundary safe
//! - persisted references (values wrapped in `$` or `$$`) rewrite the
//!   reference into scoped `$value.field$` form
//!
//! References that bind to nothing are left as they are so a later stage can
//! resolve them.

use super::scanner::{scan_with_spans, Token};
use crate::action_group::{ArgumentKind, ResolvedArgument, ResolvedArguments};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// A `$`-wrapped persisted value such as `$createProduct$` or `$$createCategory.id$$`
static PERSISTED_VALUE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$[A-Za-z0-9_.\[\]() ]+\$").expect("Valid regex pattern"));

/// A persisted value nested one level deeper, wrapped in `$$`
static DOUBLE_SCOPED_VALUE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\$[A-Za-z0-9_.\[\]',]+\$\$").expect("Valid regex pattern"));

const SCOPE_CHAR: char = '$';

/// Wrapping of a persisted reference
///
/// `Single` (`$x$`) resolves against the current test's persisted data;
/// `Double` (`$$x$$`) resolves one nesting level out, e.g. data persisted by a
/// hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMarker {
    Single,
    Double,
}

impl ScopeMarker {
    /// Pure: Detect the marker a value is wrapped in, or `None` if the value is
    /// not a persisted reference
    pub fn detect(value: &str) -> Option<Self> {
        if !PERSISTED_VALUE_REGEX.is_match(value) {
            return None;
        }
        if DOUBLE_SCOPED_VALUE_REGEX.is_match(value) {
            Some(Self::Double)
        } else {
            Some(Self::Single)
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "$",
            Self::Double => "$$",
        }
    }

    /// Wrap `inner` in this marker
    pub fn wrap(self, inner: &str) -> String {
        let marker = self.as_str();
        format!("{marker}{inner}{marker}")
    }
}

/// Strip the scope marker from a persisted value: `$$hook.id$$` -> `hook.id`
pub fn unwrap_persisted(value: &str) -> &str {
    value.trim_matches(SCOPE_CHAR)
}

/// Where a reference sits inside its token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// `{{ref}}` or `{{ref(...)}}`
    Main,
    /// An entry of the parenthesized parameter list
    Inner,
}

/// Pure: Argument name bound by a reference
///
/// The segment before the first `.`; without a `.`, the whole reference with
/// surrounding single quotes removed.
pub fn bound_name(reference: &str) -> &str {
    match reference.split_once('.') {
        Some((head, _)) => head,
        None => reference.trim_matches('\''),
    }
}

/// Pure: Substitute the main reference and then every inner parameter of
/// `token` into `text`
///
/// A reference repeated within the token, or whose bound name was already
/// replaced as a whole word, is applied once.
pub fn substitute(text: &str, resolved: &ResolvedArguments, token: &Token) -> String {
    trace!("Substituting token {:?}", token);

    let mut references = vec![(token.main_ref.as_str(), Position::Main)];
    for arg in &token.inner_args {
        references.push((arg.as_str(), Position::Inner));
    }

    let mut applied: Vec<&str> = Vec::new();
    let mut whole_word_names: Vec<&str> = Vec::new();
    let mut result = text.to_string();

    for (reference, position) in references {
        let name = bound_name(reference);
        if applied.contains(&reference) || whole_word_names.contains(&name) {
            continue;
        }
        let Some(argument) = resolved.get(name) else {
            continue;
        };

        if replaces_whole_words(argument, reference, name, position) {
            whole_word_names.push(name);
        }
        applied.push(reference);
        result = replace_reference(&result, argument, reference, name, position);
    }
    result
}

/// Pure: Scan `text` and substitute every token found, in order of appearance
///
/// Each token is rewritten within its own span, so text outside the tokens and
/// the other tokens are never touched.
pub fn substitute_all(text: &str, resolved: &ResolvedArguments) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last = 0;

    for (span, token) in scan_with_spans(text) {
        result.push_str(&text[last..span.start]);
        result.push_str(&substitute(&text[span.clone()], resolved, &token));
        last = span.end;
    }

    result.push_str(&text[last..]);
    result
}

fn replace_reference(
    text: &str,
    argument: &ResolvedArgument,
    reference: &str,
    name: &str,
    position: Position,
) -> String {
    match argument.kind {
        ArgumentKind::PlainString => {
            replace_plain(text, reference, name, &argument.value, position)
        }
        ArgumentKind::Entity | ArgumentKind::PersistedReference => {
            match ScopeMarker::detect(&argument.value) {
                Some(marker) => {
                    rewrite_persisted(text, reference, name, &argument.value, marker, position)
                }
                None => replace_word(text, name, &argument.value),
            }
        }
    }
}

/// Whether the rewrite for `reference` replaces every whole-word `name`
fn replaces_whole_words(
    argument: &ResolvedArgument,
    reference: &str,
    name: &str,
    position: Position,
) -> bool {
    match argument.kind {
        ArgumentKind::PlainString => !(position == Position::Main && reference == name),
        ArgumentKind::Entity | ArgumentKind::PersistedReference => {
            position == Position::Main || ScopeMarker::detect(&argument.value).is_none()
        }
    }
}

fn replace_plain(
    text: &str,
    reference: &str,
    name: &str,
    value: &str,
    position: Position,
) -> String {
    match position {
        Position::Main if reference == name => text.replace(&format!("{{{{{name}}}}}"), value),
        _ => replace_word(text, name, value),
    }
}

/// Rewrite a persisted reference into scoped form
///
/// Inner parameters turn `arg.field` into `<marker>value.field<marker>`.
/// A main reference flips every `{{`/`}}` in the text to the marker and then
/// swaps the argument name (word-boundary safe) for the unwrapped value.
fn rewrite_persisted(
    text: &str,
    reference: &str,
    name: &str,
    value: &str,
    marker: ScopeMarker,
    position: Position,
) -> String {
    let unwrapped = unwrap_persisted(value);

    match position {
        Position::Inner => {
            let trimmed = reference.trim_matches('\'');
            let scoped = match trimmed.strip_prefix(name) {
                Some(rest) => format!("{unwrapped}{rest}"),
                None => trimmed.to_string(),
            };
            replace_parameter(text, reference, &marker.wrap(&scoped))
        }
        Position::Main => {
            let flipped = text
                .replace("}}", marker.as_str())
                .replace("{{", marker.as_str());
            replace_word(&flipped, name, unwrapped)
        }
    }
}

/// Pure: Replace `name` wherever it stands as a whole word
///
/// A match must not be preceded by an identifier character, and must not be
/// followed by an identifier character or `(` (so `category` never matches
/// inside `categoryTreeButton` or `category(`).
pub fn replace_word(text: &str, name: &str, value: &str) -> String {
    replace_delimited(text, name, value, |prev, next| {
        !is_identifier_char(prev) && !is_identifier_char(next) && next != Some('(')
    })
}

/// Replace `reference` only where it is a whole entry of a parameter list
fn replace_parameter(text: &str, reference: &str, value: &str) -> String {
    replace_delimited(text, reference, value, |prev, next| {
        is_parameter_edge(prev, '(') && is_parameter_edge(next, ')')
    })
}

fn replace_delimited(
    text: &str,
    needle: &str,
    value: &str,
    accept: impl Fn(Option<char>, Option<char>) -> bool,
) -> String {
    if needle.is_empty() {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut last = 0;

    for (start, matched) in text.match_indices(needle) {
        let end = start + matched.len();
        let prev = text[..start].chars().next_back();
        let next = text[end..].chars().next();

        if !accept(prev, next) {
            continue;
        }

        result.push_str(&text[last..start]);
        result.push_str(value);
        last = end;
    }

    result.push_str(&text[last..]);
    result
}

fn is_parameter_edge(c: Option<char>, paren: char) -> bool {
    match c {
        Some(ch) => ch == paren || ch == ',' || ch.is_whitespace(),
        None => true,
    }
}

/// Check if a character is a valid identifier character (letter, digit, or underscore)
fn is_identifier_char(c: Option<char>) -> bool {
    match c {
        Some(ch) => ch.is_ascii_alphanumeric() || ch == '_',
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[(&str, &str, ArgumentKind)]) -> ResolvedArguments {
        list.iter()
            .map(|(name, value, kind)| ResolvedArgument::new(*name, *value, *kind))
            .collect()
    }

    #[test]
    fn test_bound_name() {
        assert_eq!(bound_name("product.sku"), "product");
        assert_eq!(bound_name("product"), "product");
        assert_eq!(bound_name("'quoted'"), "quoted");
        assert_eq!(bound_name("items[0].name"), "items[0]");
    }

    #[test]
    fn test_scope_marker_detection() {
        assert_eq!(
            ScopeMarker::detect("$createProduct$"),
            Some(ScopeMarker::Single)
        );
        assert_eq!(
            ScopeMarker::detect("$createProduct.sku$"),
            Some(ScopeMarker::Single)
        );
        assert_eq!(
            ScopeMarker::detect("$$createCategory$$"),
            Some(ScopeMarker::Double)
        );
        assert_eq!(ScopeMarker::detect("simpleProduct"), None);
        assert_eq!(ScopeMarker::detect("$"), None);
        assert_eq!(ScopeMarker::Double.wrap("a.b"), "$$a.b$$");
    }

    #[test]
    fn test_plain_string_main_reference() {
        let resolved = args(&[("username", "admin", ArgumentKind::PlainString)]);
        let token = Token::new("username");
        assert_eq!(substitute("{{username}}", &resolved, &token), "admin");
        assert_eq!(
            substitute("user: {{username}}!", &resolved, &token),
            "user: admin!"
        );
    }

    #[test]
    fn test_plain_string_word_boundary() {
        let resolved = args(&[("category", "Books", ArgumentKind::PlainString)]);
        let text = "{{category.name}} categoryTreeButton";
        let token = Token::new("category.name");
        assert_eq!(
            substitute(text, &resolved, &token),
            "{{Books.name}} categoryTreeButton"
        );
    }

    #[test]
    fn test_plain_string_inner_argument() {
        let resolved = args(&[("row", "3", ArgumentKind::PlainString)]);
        let token = Token::new("Grid.cell").with_inner_args(["row", "rowCount"]);
        assert_eq!(
            substitute("{{Grid.cell(row, rowCount)}}", &resolved, &token),
            "{{Grid.cell(3, rowCount)}}"
        );
    }

    #[test]
    fn test_entity_replaces_bare_name() {
        let resolved = args(&[("product", "SimpleProduct", ArgumentKind::Entity)]);
        let token = Token::new("product.name");
        assert_eq!(
            substitute("{{product.name}}", &resolved, &token),
            "{{SimpleProduct.name}}"
        );
    }

    #[test]
    fn test_entity_does_not_touch_calls_or_longer_names() {
        let resolved = args(&[("grid", "ProductGrid", ArgumentKind::Entity)]);
        assert_eq!(
            replace_word("grid grid( gridRow _grid grid.x", "grid", "ProductGrid"),
            "ProductGrid grid( gridRow _grid ProductGrid.x"
        );
        let token = Token::new("grid.row");
        assert_eq!(
            substitute("{{grid.row}}", &resolved, &token),
            "{{ProductGrid.row}}"
        );
    }

    #[test]
    fn test_persisted_main_reference_single_scope() {
        let resolved = args(&[(
            "product",
            "$createProduct$",
            ArgumentKind::PersistedReference,
        )]);
        let token = Token::new("product.sku");
        assert_eq!(
            substitute("{{product.sku}}", &resolved, &token),
            "$createProduct.sku$"
        );
    }

    #[test]
    fn test_persisted_main_reference_double_scope() {
        let resolved = args(&[("category", "$$createCategory$$", ArgumentKind::Entity)]);
        let token = Token::new("category.id");
        assert_eq!(
            substitute("{{category.id}}", &resolved, &token),
            "$$createCategory.id$$"
        );
    }

    #[test]
    fn test_persisted_inner_argument() {
        let resolved = args(&[("product", "$createProduct$", ArgumentKind::Entity)]);
        let token = Token::new("Grid.row").with_inner_args(["product.sku"]);
        assert_eq!(
            substitute("{{Grid.row(product.sku)}}", &resolved, &token),
            "{{Grid.row($createProduct.sku$)}}"
        );
    }

    #[test]
    fn test_persisted_inner_argument_double_scope() {
        let resolved = args(&[("product", "$$createProduct$$", ArgumentKind::Entity)]);
        let token = Token::new("Grid.row").with_inner_args(["product.sku", "'2'"]);
        assert_eq!(
            substitute("{{Grid.row(product.sku, '2')}}", &resolved, &token),
            "{{Grid.row($$createProduct.sku$$, '2')}}"
        );
    }

    #[test]
    fn test_persisted_kind_with_plain_value_falls_back_to_word_replacement() {
        let resolved = args(&[("product", "SimpleProduct", ArgumentKind::PersistedReference)]);
        let token = Token::new("product.sku");
        assert_eq!(
            substitute("{{product.sku}}", &resolved, &token),
            "{{SimpleProduct.sku}}"
        );
    }

    #[test]
    fn test_unbound_reference_passes_through() {
        let resolved = args(&[("username", "admin", ArgumentKind::PlainString)]);
        let token = Token::new("AdminSection.button").with_inner_args(["other.field"]);
        let text = "{{AdminSection.button(other.field)}}";
        assert_eq!(substitute(text, &resolved, &token), text);
    }

    #[test]
    fn test_substitute_all_handles_every_token() {
        let resolved = args(&[
            ("product", "$createProduct$", ArgumentKind::Entity),
            ("qty", "2", ArgumentKind::PlainString),
        ]);
        assert_eq!(
            substitute_all("{{Cart.row(product.name)}} x {{qty}}", &resolved),
            "{{Cart.row($createProduct.name$)}} x 2"
        );
    }

    #[test]
    fn test_substitute_all_keeps_shared_persisted_reference_single_scoped() {
        let resolved = args(&[("product", "$product$", ArgumentKind::PersistedReference)]);
        assert_eq!(
            substitute_all("{{A.row(product.sku)}} {{B.row(product.sku)}}", &resolved),
            "{{A.row($product.sku$)}} {{B.row($product.sku$)}}"
        );
    }

    #[test]
    fn test_substitute_all_does_not_resubstitute_values_containing_the_name() {
        let resolved = args(&[("product", "Blue product", ArgumentKind::PlainString)]);
        assert_eq!(
            substitute_all("{{Grid.row(product)}} {{Grid.col(product)}}", &resolved),
            "{{Grid.row(Blue product)}} {{Grid.col(Blue product)}}"
        );
    }

    #[test]
    fn test_substitute_all_leaves_text_outside_tokens_alone() {
        let resolved = args(&[("category", "Books", ArgumentKind::Entity)]);
        assert_eq!(
            substitute_all("category {{category.name}} /category/", &resolved),
            "category {{Books.name}} /category/"
        );
    }

    #[test]
    fn test_repeated_reference_within_one_token_applies_once() {
        let resolved = args(&[
            ("product", "$product$", ArgumentKind::Entity),
            ("label", "label text", ArgumentKind::PlainString),
        ]);
        assert_eq!(
            substitute_all("{{Grid.cell(product.sku, product.sku)}}", &resolved),
            "{{Grid.cell($product.sku$, $product.sku$)}}"
        );
        assert_eq!(
            substitute_all("{{Grid.cell(label, label)}}", &resolved),
            "{{Grid.cell(label text, label text)}}"
        );
    }

    #[test]
    fn test_persisted_inner_arguments_bare_and_dotted() {
        let resolved = args(&[("product", "$createProduct$", ArgumentKind::Entity)]);
        assert_eq!(
            substitute_all("{{Grid.cell(product, product.sku)}}", &resolved),
            "{{Grid.cell($createProduct$, $createProduct.sku$)}}"
        );
    }

    #[test]
    fn test_persisted_inner_argument_rewrites_only_the_leading_segment() {
        let resolved = args(&[("product", "$createProduct$", ArgumentKind::Entity)]);
        assert_eq!(
            substitute_all(
                "{{Grid.row(product.productId, otherproduct.sku)}}",
                &resolved
            ),
            "{{Grid.row($createProduct.productId$, otherproduct.sku)}}"
        );
    }
}
