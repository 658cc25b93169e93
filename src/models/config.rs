// SSID Shuffle - Application Configuration
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Application configuration model.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::error::{Error, Result};
use super::network::SecurityType;
use super::CONFIG_DIR_NAME;

/// Application configuration, read from an optional TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the `networksetup` binary.
    #[serde(default = "default_networksetup_path")]
    pub networksetup_path: PathBuf,

    /// Path to the `osascript` binary used for the CoreWLAN bridge.
    #[serde(default = "default_osascript_path")]
    pub osascript_path: PathBuf,

    /// Path to the `sw_vers` binary.
    #[serde(default = "default_sw_vers_path")]
    pub sw_vers_path: PathBuf,

    /// Security type used when re-adding a network whose type is unknown.
    #[serde(default = "default_security", deserialize_with = "deserialize_security")]
    pub default_security: SecurityType,

    /// Last macOS major version where the CoreWLAN reorder takes effect.
    #[serde(default = "default_last_atomic_major")]
    pub last_atomic_major: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            networksetup_path: default_networksetup_path(),
            osascript_path: default_osascript_path(),
            sw_vers_path: default_sw_vers_path(),
            default_security: default_security(),
            last_atomic_major: default_last_atomic_major(),
        }
    }
}

fn default_networksetup_path() -> PathBuf {
    PathBuf::from("/usr/sbin/networksetup")
}

fn default_osascript_path() -> PathBuf {
    PathBuf::from("/usr/bin/osascript")
}

fn default_sw_vers_path() -> PathBuf {
    PathBuf::from("/usr/bin/sw_vers")
}

fn default_security() -> SecurityType {
    SecurityType::Wpa2
}

fn default_last_atomic_major() -> u64 {
    12
}

/// Accept `networksetup` names such as "WPA2" or "WPA2E", in any case.
fn deserialize_security<'de, D>(deserializer: D) -> std::result::Result<SecurityType, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    SecurityType::from_networksetup(&name)
        .ok_or_else(|| de::Error::custom(format!("unknown security type {:?}", name)))
}

impl AppConfig {
    /// Default configuration file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join("config.toml"))
    }

    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::ConfigReadFailed(format!("{}: {}", path.display(), e)))?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one the default location is
    /// used when present, otherwise defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            info!("Loading configuration from {}", path.display());
            return Self::load_from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                info!("Loading configuration from {}", path.display());
                Self::load_from_file(&path)
            }
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.default_security.is_known() {
            return Err(Error::ConfigParseFailed(
                "default_security must name a concrete security type".to_string(),
            ));
        }
        Ok(())
    }
}
