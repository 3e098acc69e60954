use crate::utils::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The sidecar's own settings file at
/// `~/Documents/AgentBridgeConfig/settings.json`. The extension reads the
/// Slack bot token from here (or from its editor setting); agent scripts
/// can provision it with [`SidecarSettings::save`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SidecarSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_bot_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_channel: Option<String>,
}

impl SidecarSettings {
    pub fn default_path() -> Result<PathBuf> {
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .ok_or_else(|| BridgeError::ConfigError {
                message: "Cannot locate home directory (HOME/USERPROFILE unset)".to_string(),
            })?;
        Ok(PathBuf::from(home)
            .join("Documents")
            .join("AgentBridgeConfig")
            .join("settings.json"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
