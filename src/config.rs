use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional config file values; CLI flags take precedence
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Agent base endpoint, e.g. `ws://127.0.0.1:8642`
    pub endpoint: Option<String>,

    /// Buffer capacity in entries
    pub buffer_size: Option<usize>,

    /// Delimiter between a record's timestamp and content
    pub delimiter: Option<char>,
}

impl FileConfig {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: FileConfig = toml::from_str(
            r#"
            endpoint = "ws://agent.local:8642"
            buffer_size = 200
            delimiter = "|"
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("ws://agent.local:8642"));
        assert_eq!(config.buffer_size, Some(200));
        assert_eq!(config.delimiter, Some('|'));
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.endpoint.is_none());
        assert!(config.buffer_size.is_none());
        assert!(config.delimiter.is_none());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<FileConfig>("retries = 3").is_err());
    }
}
