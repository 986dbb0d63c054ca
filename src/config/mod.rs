use serde::{Deserialize, Serialize};

pub mod loader;

pub use loader::{load_config, ENV_VARIABLE_ATTRIBUTES};

/// Attributes holding selectors that may reference arguments
pub const SELECTOR_ENABLED_ATTRIBUTES: &[&str] = &[
    "selector",
    "dependentSelector",
    "selector1",
    "selector2",
    "function",
    "filterSelector",
    "optionSelector",
    "command",
    "html",
    "locale",
];

/// Attributes holding test data that may reference arguments
pub const DATA_ENABLED_ATTRIBUTES: &[&str] = &[
    "userInput",
    "parameterArray",
    "expected",
    "actual",
    "expectedResult",
    "actualResult",
    "x",
    "y",
];

/// The page URL attribute of navigation actions
pub const URL_ATTRIBUTE: &str = "url";

/// Settings for action-group resolution
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Attribute names scanned for `{{...}}` placeholders; empty scans every attribute
    pub variable_attributes: Vec<String>,
}

impl ResolverConfig {
    /// Scan only the selector-enabled, data-enabled and URL attributes
    pub fn standard() -> Self {
        let variable_attributes = SELECTOR_ENABLED_ATTRIBUTES
            .iter()
            .chain(DATA_ENABLED_ATTRIBUTES)
            .chain(std::iter::once(&URL_ATTRIBUTE))
            .map(|name| name.to_string())
            .collect();

        Self {
            variable_attributes,
        }
    }

    pub fn with_variable_attributes<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variable_attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether values of attribute `name` are scanned for placeholders
    pub fn is_variable_attribute(&self, name: &str) -> bool {
        self.variable_attributes.is_empty() || self.variable_attributes.iter().any(|a| a == name)
    }

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Override the attribute list from a comma-separated environment value
    pub fn merge_env_value(&mut self, value: Option<&str>) {
        if let Some(value) = value {
            self.variable_attributes = value
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }
    }
}
