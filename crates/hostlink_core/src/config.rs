//! Bridge configuration (hostlink.toml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BridgeError, Result};
use crate::lifecycle::PausePolicy;

/// Top-level bridge configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub entry: EntryConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the native entry point lives and how it is launched
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EntryConfig {
    /// Library (module) holding the entry symbol
    #[serde(default = "default_module")]
    pub module: String,
    /// Entry symbol name
    #[serde(default = "default_symbol")]
    pub symbol: String,
    /// Name of the thread the entry point runs on
    #[serde(default = "default_thread_name")]
    pub thread_name: String,
}

fn default_module() -> String {
    "libentry.so".to_string()
}

fn default_symbol() -> String {
    "main".to_string()
}

fn default_thread_name() -> String {
    "hostlink-entry".to_string()
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            module: default_module(),
            symbol: default_symbol(),
            thread_name: default_thread_name(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LifecycleConfig {
    /// Handling of a pause that arrives before the first resume
    #[serde(default)]
    pub pause_policy: PausePolicy,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl BridgeConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file, or from `hostlink.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("hostlink.toml")
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path).map_err(|source| BridgeError::ConfigIo {
            path: config_path.clone(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = BridgeConfig::from_toml_str("").unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.entry.module, "libentry.so");
        assert_eq!(config.entry.symbol, "main");
        assert_eq!(config.lifecycle.pause_policy, PausePolicy::Suppress);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_overrides() {
        let config = BridgeConfig::from_toml_str(
            r#"
            [entry]
            module = "libgame.so"
            symbol = "SDL_main"

            [lifecycle]
            pause_policy = "defer"
            "#,
        )
        .unwrap();

        assert_eq!(config.entry.module, "libgame.so");
        assert_eq!(config.entry.symbol, "SDL_main");
        assert_eq!(config.entry.thread_name, "hostlink-entry");
        assert_eq!(config.lifecycle.pause_policy, PausePolicy::Defer);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let err = BridgeConfig::from_toml_str("[lifecycle]\npause_policy = \"queue\"\n").unwrap_err();
        assert!(matches!(err, BridgeError::ConfigParse(_)));
    }

    #[test]
    fn test_toml_output_parses_back() {
        let mut config = BridgeConfig::default();
        config.lifecycle.pause_policy = PausePolicy::Defer;
        let text = config.to_toml().unwrap();
        assert!(text.contains("pause_policy = \"defer\""));
        assert_eq!(BridgeConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let err = BridgeConfig::load(Path::new("/nonexistent/hostlink.toml")).unwrap_err();
        assert!(matches!(err, BridgeError::ConfigIo { .. }));
    }
}
