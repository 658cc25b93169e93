// SSID Shuffle - macOS Gateway
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Production gateway combining `networksetup` and the CoreWLAN bridge.

use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::corewlan::CoreWlanBridge;
use super::networksetup::NetworkSetup;
use super::WirelessGateway;
use crate::models::{
    AppConfig, Error, InterfaceHandle, PreferredNetwork, PreferredNetworkList, Result, SecurityType,
};

/// Gateway to the macOS wireless configuration.
#[derive(Debug, Clone)]
pub struct MacGateway {
    networksetup: NetworkSetup,
    corewlan: CoreWlanBridge,
    default_security: SecurityType,
}

impl MacGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            networksetup: NetworkSetup::new(&config.networksetup_path),
            corewlan: CoreWlanBridge::new(&config.osascript_path),
            default_security: config.default_security,
        }
    }

    /// Security types reported by CoreWLAN, keyed by SSID.
    ///
    /// Best effort: an empty map is returned when the bridge fails.
    fn security_types(&self, interface: &InterfaceHandle) -> HashMap<String, SecurityType> {
        match self.corewlan.preferred_networks(interface) {
            Ok(networks) => networks.into_iter().map(|n| (n.ssid, n.security)).collect(),
            Err(e) => {
                debug!("Could not read security types from CoreWLAN: {}", e);
                HashMap::new()
            }
        }
    }
}

impl WirelessGateway for MacGateway {
    fn current_order(&self, interface: &InterfaceHandle) -> Result<PreferredNetworkList> {
        let ssids = self.networksetup.preferred_networks(interface)?;
        let security = if ssids.is_empty() {
            HashMap::new()
        } else {
            self.security_types(interface)
        };

        let networks = ssids
            .into_iter()
            .map(|ssid| {
                let security = security.get(&ssid).copied().unwrap_or_default();
                PreferredNetwork::with_security(ssid, security)
            })
            .collect();

        Ok(PreferredNetworkList::new(interface.clone(), networks))
    }

    fn apply_order_atomic(&self, interface: &InterfaceHandle, order: &PreferredNetworkList) -> Result<()> {
        info!("Committing {} preferred networks on {} via CoreWLAN", order.len(), interface);
        self.corewlan.commit_order(interface, order)
    }

    fn remove_all(&self, interface: &InterfaceHandle) -> Result<()> {
        info!("Removing all preferred networks on {}", interface);
        self.networksetup.remove_all(interface)
    }

    fn add_at_index(&self, interface: &InterfaceHandle, network: &PreferredNetwork, index: usize) -> Result<()> {
        let security = match network.security.networksetup_name() {
            Some(name) => name,
            None => {
                warn!(
                    "Security type of {:?} unknown, re-adding as {:?}",
                    network.ssid, self.default_security
                );
                self.default_security.networksetup_name().ok_or_else(|| {
                    Error::Internal("default security type has no networksetup name".to_string())
                })?
            }
        };

        debug!("Adding {:?} at index {} ({})", network.ssid, index, security);
        self.networksetup
            .add_at_index(interface, &network.ssid, index, security)
    }

    fn set_power(&self, interface: &InterfaceHandle, on: bool) -> Result<()> {
        info!("Turning {} {}", interface, if on { "on" } else { "off" });
        self.networksetup.set_airport_power(interface, on)
    }
}
