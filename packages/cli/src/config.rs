use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "sonasite.config.json";

/// Sonasite configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Language for new sites when none is given
    #[serde(default = "default_language")]
    pub language: String,

    /// JSON file holding contacts and invoices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_store: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Undo levels kept per session (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_language() -> String {
    "Español".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_history_limit() -> usize {
    100
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Absolute path of the record store file, if configured
    pub fn record_store_path(&self, cwd: &Path) -> Option<PathBuf> {
        self.record_store.as_ref().map(|path| cwd.join(path))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            record_store: None,
            log_level: default_log_level(),
            history_limit: default_history_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "language": "English",
            "recordStore": "data/records.json",
            "logLevel": "debug",
            "historyLimit": 20
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.language, "English");
        assert_eq!(config.record_store, Some("data/records.json".to_string()));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.history_limit, 20);
        assert_eq!(
            config.record_store_path(Path::new("/srv")),
            Some(PathBuf::from("/srv/data/records.json"))
        );
    }

    #[test]
    fn test_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.language, "Español");
        assert!(config.record_store.is_none());
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.history_limit, 100);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.history_limit, 100);
    }
}
