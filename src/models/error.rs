// SSID Shuffle - Error Types
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Shared error types for SSID Shuffle.

use thiserror::Error;

/// Result type alias for SSID Shuffle operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for SSID Shuffle operations.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================
    // Validation Errors
    // ========================================
    #[error("Wireless interface not found: {0}")]
    InterfaceNotFound(String),

    #[error("SSIDs not configured on the interface: {}", quote_all(.0))]
    RejectedMissingSsids(Vec<String>),

    #[error("Wireless interface {0:?} does not have any configured SSIDs")]
    NoPreferredNetworks(String),

    #[error("Invalid SSID: {0}")]
    InvalidSsid(String),

    #[error("Invalid interface name: {0}")]
    InvalidInterfaceName(String),

    // ========================================
    // Commit Errors
    // ========================================
    #[error("Not authorized to change the wireless configuration; run with 'sudo'")]
    Unauthorized,

    #[error("Atomic reorder failed: {0}")]
    AtomicCommitFailed(String),

    #[error(
        "Preferred networks were cleared but only {applied_count} could be re-added; never re-added: {}",
        quote_all(.failed)
    )]
    PartialDestructiveFailure {
        applied_count: usize,
        failed: Vec<String>,
    },

    #[error("Action failed: {action} - {reason}")]
    ActionFailed { action: String, reason: String },

    #[error("Power cycle failed: {}", power_cycle_detail(.disable, .enable))]
    PowerCycleFailed {
        disable: Option<String>,
        enable: Option<String>,
    },

    // ========================================
    // Platform Errors
    // ========================================
    #[error("networksetup error: {0}")]
    NetworkSetup(String),

    #[error("CoreWLAN bridge error: {0}")]
    CoreWlan(String),

    #[error("Failed to determine OS version: {0}")]
    OsVersion(String),

    // ========================================
    // Configuration Errors
    // ========================================
    #[error("Failed to read configuration: {0}")]
    ConfigReadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseFailed(String),

    // ========================================
    // System Errors
    // ========================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn quote_all(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("{:?}", n))
        .collect::<Vec<_>>()
        .join(", ")
}

fn power_cycle_detail(disable: &Option<String>, enable: &Option<String>) -> String {
    match (disable, enable) {
        (Some(d), Some(e)) => format!("disable: {}; enable: {}", d, e),
        (Some(d), None) => format!("disable: {}", d),
        (None, Some(e)) => format!("enable: {}", e),
        (None, None) => "unknown".to_string(),
    }
}

impl Error {
    /// Create a new action failed error.
    pub fn action_failed(action: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ActionFailed {
            action: action.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error was raised before anything was changed.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InterfaceNotFound(_)
                | Self::RejectedMissingSsids(_)
                | Self::NoPreferredNetworks(_)
                | Self::InvalidSsid(_)
                | Self::InvalidInterfaceName(_)
        )
    }

    /// Process exit code reported for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::RejectedMissingSsids(_) => 2,
            Self::PartialDestructiveFailure { .. } => 3,
            Self::AtomicCommitFailed(_) => 4,
            Self::PowerCycleFailed { .. } => 5,
            Self::NoPreferredNetworks(_) => 44,
            Self::InterfaceNotFound(_) => 69,
            Self::Unauthorized => 77,
            _ => 1,
        }
    }
}

// Convert from toml parse errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}

// Convert from serde_json errors (CoreWLAN bridge output)
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::CoreWlan(err.to_string())
    }
}
