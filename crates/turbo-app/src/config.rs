//! App configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// What to do when a module's action replaces one already registered.
///
/// The later module always wins; the policy only controls reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionOverridePolicy {
    /// Replace silently.
    #[default]
    Replace,
    /// Replace and emit a warning.
    Warn,
}

/// Configuration for an [`App`](crate::App).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// App name, used in log events.
    #[serde(default = "default_name")]
    pub name: String,

    /// Reporting policy for overwritten actions.
    #[serde(default)]
    pub action_override: ActionOverridePolicy,
}

fn default_name() -> String {
    "TurboApp".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            action_override: ActionOverridePolicy::default(),
        }
    }
}

impl AppConfig {
    /// Create a new configuration with the given app name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the action override policy.
    pub fn with_action_override(mut self, policy: ActionOverridePolicy) -> Self {
        self.action_override = policy;
        self
    }

    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            Self::from_toml_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Parse config from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse config from JSON.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.name, "TurboApp");
        assert_eq!(config.action_override, ActionOverridePolicy::Replace);
    }

    #[test]
    fn test_app_config_builder() {
        let config = AppConfig::new("storefront").with_action_override(ActionOverridePolicy::Warn);

        assert_eq!(config.name, "storefront");
        assert_eq!(config.action_override, ActionOverridePolicy::Warn);
    }

    #[test]
    fn test_from_toml_str() {
        let config = AppConfig::from_toml_str(
            r#"
            name = "admin"
            action_override = "warn"
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "admin");
        assert_eq!(config.action_override, ActionOverridePolicy::Warn);
    }

    #[test]
    fn test_from_toml_str_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_from_json_str() {
        let config = AppConfig::from_json_str(r#"{"name": "api"}"#).unwrap();

        assert_eq!(config.name, "api");
        assert_eq!(config.action_override, ActionOverridePolicy::Replace);
    }

    #[test]
    fn test_invalid_policy_rejected() {
        assert!(AppConfig::from_toml_str(r#"action_override = "reject""#).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load("/nonexistent/turbo-app.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("turbo-app-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"name": "from-file", "action_override": "warn"}"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.name, "from-file");
        assert_eq!(config.action_override, ActionOverridePolicy::Warn);
    }
}
