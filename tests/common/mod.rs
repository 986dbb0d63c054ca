//! Common test fixtures for action-group integration tests

use actiongroup::action::ActionStep;
use actiongroup::action_group::{ActionGroupDefinition, ArgumentKind, DeclaredArgument};
use std::collections::HashMap;

/// Build an invocation argument map from name/value pairs
pub fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// `LoginActionGroup`: one required plain-string argument and one step
pub fn login_group() -> ActionGroupDefinition {
    ActionGroupDefinition::new(
        "LoginActionGroup",
        vec![DeclaredArgument::required("username", ArgumentKind::PlainString)],
        vec![ActionStep::new("fillUsername", "fillField")
            .with_attribute("value", "{{username}}")],
    )
}

/// A category-assignment group mixing entity, persisted and plain arguments
pub fn assign_category_group() -> ActionGroupDefinition {
    ActionGroupDefinition::new(
        "AssignCategoryToProduct",
        vec![
            DeclaredArgument::required("category", ArgumentKind::Entity),
            DeclaredArgument::required("product", ArgumentKind::PersistedReference),
            DeclaredArgument::with_default("position", "1", ArgumentKind::PlainString),
        ],
        vec![
            ActionStep::new("openProductEdit", "amOnPage")
                .with_attribute("url", "/admin/catalog/edit/id/{{product.id}}/"),
            ActionStep::new("expandCategories", "click")
                .with_attribute("selector", "{{AdminProductForm.categoryTreeButton}}"),
            ActionStep::new("searchCategory", "fillField")
                .with_attribute("selector", "{{AdminProductForm.searchCategory}}")
                .with_attribute("userInput", "{{category.name}}"),
            ActionStep::new("selectCategory", "click")
                .with_attribute(
                    "selector",
                    "{{AdminProductForm.categoryOption(category.name, position)}}",
                )
                .after("searchCategory"),
            ActionStep::new("saveProduct", "click")
                .with_attribute("selector", "{{AdminProductForm.save}}"),
        ],
    )
}
