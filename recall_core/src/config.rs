//! Configuration file support for Recall.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/recall/config.toml` and
//! supplies standing defaults for the import/export paths; command-line
//! flags take precedence over config values.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,
}

/// Standing deck file defaults
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct FilesConfig {
    /// Deck file imported before the first prompt
    #[serde(default)]
    pub import_from: Option<PathBuf>,

    /// Deck file exported to when the session ends
    #[serde(default)]
    pub export_to: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("recall").join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.files.import_from.is_none());
        assert!(config.files.export_to.is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config {
            files: FilesConfig {
                import_from: Some(PathBuf::from("decks/main.json")),
                export_to: Some(PathBuf::from("decks/main.json")),
            },
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.files.import_from, parsed.files.import_from);
        assert_eq!(config.files.export_to, parsed.files.export_to);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[files]
export_to = "session.json"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.files.import_from.is_none());
        assert_eq!(
            config.files.export_to,
            Some(PathBuf::from("session.json"))
        );
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[files]\nimport_from = \"cards.json\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.files.import_from, Some(PathBuf::from("cards.json")));
    }
}
