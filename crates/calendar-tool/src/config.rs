//! TOML configuration for the `gcal-tool` binary.

use anyhow::Context;
use plugin_types::Credentials;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::calendar_client::GoogleConnector;
use crate::credentials::SERVICE_ACCOUNT_FIELD;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the Google service account key JSON file
    pub credentials_path: PathBuf,

    /// Override for the Calendar API root (e.g. a local proxy)
    #[serde(default)]
    pub api_root_url: Option<String>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Config with only a credentials file set
    pub fn from_credentials_path(credentials_path: PathBuf) -> Self {
        Config {
            credentials_path,
            api_root_url: None,
        }
    }

    pub fn example() -> Self {
        Config {
            credentials_path: PathBuf::from("./service-account.json"),
            api_root_url: None,
        }
    }

    /// Read the key file into the credential map the tool expects
    pub fn read_credentials(&self) -> anyhow::Result<Credentials> {
        let raw = std::fs::read_to_string(&self.credentials_path).with_context(|| {
            format!(
                "Failed to read service account key {}",
                self.credentials_path.display()
            )
        })?;
        Ok(Credentials::new().with(SERVICE_ACCOUNT_FIELD, raw))
    }

    pub fn connector(&self) -> GoogleConnector {
        GoogleConnector::new(self.api_root_url.clone())
    }
}
