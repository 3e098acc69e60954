use crate::core::discovery::{BRIDGE_HOST, BRIDGE_PORTS, DEFAULT_TIMEOUT_SECS};
use crate::domain::model::DEFAULT_TERMINAL_TIMEOUT_SECS;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_list, validate_non_empty_string, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Client-side settings, loadable from a TOML file. A fixed `port`
/// bypasses discovery; otherwise `ports` is the probe list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSettings {
    pub host: String,
    pub port: Option<u16>,
    pub ports: Vec<u16>,
    pub prompt_timeout_secs: u64,
    pub terminal_timeout_secs: u64,
    pub slack_channel: Option<String>,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            host: BRIDGE_HOST.to_string(),
            port: None,
            ports: BRIDGE_PORTS.to_vec(),
            prompt_timeout_secs: DEFAULT_TIMEOUT_SECS,
            terminal_timeout_secs: DEFAULT_TERMINAL_TIMEOUT_SECS,
            slack_channel: None,
        }
    }
}

impl BridgeSettings {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&content)?;
        Ok(settings)
    }
}

impl Validate for BridgeSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        if self.port.is_none() {
            validate_non_empty_list("ports", &self.ports)?;
        }
        validate_positive_number("prompt_timeout_secs", self.prompt_timeout_secs, 1)?;
        validate_positive_number("terminal_timeout_secs", self.terminal_timeout_secs, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_bridge_constants() {
        let settings = BridgeSettings::default();
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.ports, vec![3131, 3132, 3133, 3134]);
        assert_eq!(settings.prompt_timeout_secs, 300);
        assert!(settings.port.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let settings: BridgeSettings = toml::from_str(
            r#"
            host = "localhost"
            port = 3132
            slack_channel = "C0XXXXXXX"
            "#,
        )
        .unwrap();

        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, Some(3132));
        assert_eq!(settings.slack_channel.as_deref(), Some("C0XXXXXXX"));
        // Untouched fields keep their defaults.
        assert_eq!(settings.terminal_timeout_secs, 120);
    }

    #[test]
    fn test_validate_rejects_empty_probe_list() {
        let settings = BridgeSettings {
            ports: vec![],
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        // A fixed port makes the probe list irrelevant.
        let settings = BridgeSettings {
            ports: vec![],
            port: Some(3131),
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let settings = BridgeSettings {
            prompt_timeout_secs: 0,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
