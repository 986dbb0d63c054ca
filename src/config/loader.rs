use super::ResolverConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Environment variable overriding `variable_attributes` (comma-separated)
pub const ENV_VARIABLE_ATTRIBUTES: &str = "ACTIONGROUP_VARIABLE_ATTRIBUTES";

impl ResolverConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read resolver config: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse resolver config: {}", path.display()))
    }
}

/// Load the resolver configuration for the CLI
///
/// Starts from the file at `path` when given, otherwise from defaults, then
/// applies [`ENV_VARIABLE_ATTRIBUTES`].
pub fn load_config(path: Option<&Path>) -> Result<ResolverConfig> {
    let mut config = match path {
        Some(path) => ResolverConfig::load(path)?,
        None => ResolverConfig::default(),
    };

    let env_value = std::env::var(ENV_VARIABLE_ATTRIBUTES).ok();
    if env_value.is_some() {
        tracing::debug!("Applying {} from environment", ENV_VARIABLE_ATTRIBUTES);
    }
    config.merge_env_value(env_value.as_deref());

    Ok(config)
}
