// SSID Shuffle - Validation Utilities
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Input validation for command-line values.

use super::error::{Error, Result};

/// Maximum SSID length in bytes (IEEE 802.11).
pub const MAX_SSID_BYTES: usize = 32;

/// Maximum BSD interface name length (IFNAMSIZ - 1).
pub const MAX_INTERFACE_NAME: usize = 15;

/// Validate an SSID name.
pub fn validate_ssid(s: &str) -> Result<String> {
    if s.is_empty() {
        return Err(Error::InvalidSsid("SSID cannot be empty".to_string()));
    }
    if s.len() > MAX_SSID_BYTES {
        return Err(Error::InvalidSsid(format!(
            "SSID must be {} bytes or less: {:?}",
            MAX_SSID_BYTES, s
        )));
    }
    if s.chars().any(|c| c.is_control()) {
        return Err(Error::InvalidSsid(format!(
            "SSID contains control characters: {:?}",
            s
        )));
    }
    Ok(s.to_string())
}

/// Validate a list of SSIDs, preserving order.
pub fn validate_ssids(ssids: &[String]) -> Result<Vec<String>> {
    ssids.iter().map(|s| validate_ssid(s)).collect()
}

/// Validate a BSD interface name (e.g. "en0").
pub fn validate_interface_name(s: &str) -> Result<String> {
    if s.is_empty() || s.len() > MAX_INTERFACE_NAME {
        return Err(Error::InvalidInterfaceName(format!(
            "Interface name must be 1-{} characters: {:?}",
            MAX_INTERFACE_NAME, s
        )));
    }
    if !s.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::InvalidInterfaceName(format!(
            "Invalid characters in interface name: {:?}",
            s
        )));
    }
    if !s.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(Error::InvalidInterfaceName(format!(
            "Interface name must start with a letter: {:?}",
            s
        )));
    }
    Ok(s.to_string())
}
