// SSID Shuffle - Preferred Network Types
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Preferred-network list and wireless interface types.
//!
//! A [`PreferredNetworkList`] is the ranked list of SSIDs a wireless
//! interface will try to join: index 0 has the highest priority. SSIDs are
//! unique within a list.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// A wireless interface identified by its BSD name (e.g. "en0").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceHandle(String);

impl InterfaceHandle {
    /// Create a handle from an interface name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Interface name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Security type of a stored wireless network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SecurityType {
    /// No security.
    Open,
    /// WEP (static or dynamic).
    Wep,
    /// WPA Personal.
    Wpa,
    /// WPA2 Personal (including WPA/WPA2 mixed).
    Wpa2,
    /// WPA Enterprise.
    WpaEnterprise,
    /// WPA2 Enterprise (including WPA/WPA2 mixed).
    Wpa2Enterprise,
    /// WPA3 Personal (including WPA2/WPA3 transition).
    Wpa3,
    /// WPA3 Enterprise.
    Wpa3Enterprise,
    /// Not reported by the platform.
    #[default]
    Unknown,
}

impl SecurityType {
    /// Map a CoreWLAN `CWSecurity` value.
    pub fn from_corewlan(value: i64) -> Self {
        match value {
            0 => Self::Open,
            1 | 6 => Self::Wep,
            2 => Self::Wpa,
            3 | 4 | 5 => Self::Wpa2,
            7 => Self::WpaEnterprise,
            8 | 9 | 10 => Self::Wpa2Enterprise,
            11 | 13 => Self::Wpa3,
            12 => Self::Wpa3Enterprise,
            _ => Self::Unknown,
        }
    }

    /// Parse a `networksetup` security type name.
    pub fn from_networksetup(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OPEN" => Some(Self::Open),
            "WEP" => Some(Self::Wep),
            "WPA" => Some(Self::Wpa),
            "WPA2" => Some(Self::Wpa2),
            "WPAE" => Some(Self::WpaEnterprise),
            "WPA2E" => Some(Self::Wpa2Enterprise),
            "WPA3" => Some(Self::Wpa3),
            "WPA3E" => Some(Self::Wpa3Enterprise),
            _ => None,
        }
    }

    /// Name understood by `networksetup -addpreferredwirelessnetworkatindex`.
    pub fn networksetup_name(&self) -> Option<&'static str> {
        match self {
            Self::Open => Some("OPEN"),
            Self::Wep => Some("WEP"),
            Self::Wpa => Some("WPA"),
            Self::Wpa2 => Some("WPA2"),
            Self::WpaEnterprise => Some("WPAE"),
            Self::Wpa2Enterprise => Some("WPA2E"),
            Self::Wpa3 => Some("WPA3"),
            Self::Wpa3Enterprise => Some("WPA3E"),
            Self::Unknown => None,
        }
    }

    /// Check if the platform reported a security type.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// One entry of a preferred-network list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredNetwork {
    /// Network name.
    pub ssid: String,
    /// Stored security type, needed to re-add the network.
    #[serde(default)]
    pub security: SecurityType,
}

impl PreferredNetwork {
    /// Create an entry with an unknown security type.
    pub fn new(ssid: impl Into<String>) -> Self {
        Self {
            ssid: ssid.into(),
            security: SecurityType::Unknown,
        }
    }

    /// Create an entry with a known security type.
    pub fn with_security(ssid: impl Into<String>, security: SecurityType) -> Self {
        Self {
            ssid: ssid.into(),
            security,
        }
    }
}

/// Ordered preferred-network list of one interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredNetworkList {
    interface: InterfaceHandle,
    networks: Vec<PreferredNetwork>,
}

impl PreferredNetworkList {
    /// Build a list, dropping repeated SSIDs after their first occurrence.
    pub fn new(interface: InterfaceHandle, networks: Vec<PreferredNetwork>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(networks.len());

        for network in networks {
            if seen.insert(network.ssid.clone()) {
                unique.push(network);
            } else {
                warn!(
                    "Duplicate SSID {:?} in preferred networks of {}, keeping first entry",
                    network.ssid, interface
                );
            }
        }

        Self {
            interface,
            networks: unique,
        }
    }

    /// Build a list from bare SSID names.
    pub fn from_ssids<I, S>(interface: InterfaceHandle, ssids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            interface,
            ssids.into_iter().map(PreferredNetwork::new).collect(),
        )
    }

    /// Interface this list belongs to.
    pub fn interface(&self) -> &InterfaceHandle {
        &self.interface
    }

    /// Entries in priority order.
    pub fn networks(&self) -> &[PreferredNetwork] {
        &self.networks
    }

    /// SSIDs in priority order.
    pub fn ssids(&self) -> Vec<&str> {
        self.networks.iter().map(|n| n.ssid.as_str()).collect()
    }

    /// Priority index of an SSID.
    pub fn position(&self, ssid: &str) -> Option<usize> {
        self.networks.iter().position(|n| n.ssid == ssid)
    }

    /// Check if an SSID is configured.
    pub fn contains(&self, ssid: &str) -> bool {
        self.position(ssid).is_some()
    }

    /// Look up an entry by SSID.
    pub fn get(&self, ssid: &str) -> Option<&PreferredNetwork> {
        self.networks.iter().find(|n| n.ssid == ssid)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// Check if both lists hold the same SSIDs in the same order.
    pub fn same_order(&self, other: &PreferredNetworkList) -> bool {
        self.ssids() == other.ssids()
    }
}
