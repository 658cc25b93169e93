// SSID Shuffle - Wireless Configuration Gateway
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Access to the persisted wireless configuration.
//!
//! The [`WirelessGateway`] trait is the only way the commit engine and the
//! power-cycle controller touch the operating system. The production
//! implementation is [`MacGateway`], composed of:
//! - `networksetup`: list, remove-all, add-at-index and power control
//! - CoreWLAN bridge: single-call reorder and security-type lookup

pub mod corewlan;
#[cfg(test)]
pub mod memory;
pub mod macos;
pub mod networksetup;

pub use macos::MacGateway;

use crate::models::{InterfaceHandle, PreferredNetwork, PreferredNetworkList, Result};

/// Read and write access to an interface's preferred-network list.
///
/// Mutating methods require elevated privilege and report
/// [`Error::Unauthorized`](crate::models::Error::Unauthorized) when the
/// platform refuses the change.
pub trait WirelessGateway {
    /// Current preferred-network order.
    ///
    /// Fails with `InterfaceNotFound` when the interface does not exist or
    /// is not a wireless interface.
    fn current_order(&self, interface: &InterfaceHandle) -> Result<PreferredNetworkList>;

    /// Replace the whole order in one platform call.
    fn apply_order_atomic(&self, interface: &InterfaceHandle, order: &PreferredNetworkList) -> Result<()>;

    /// Remove every preferred network from the interface.
    fn remove_all(&self, interface: &InterfaceHandle) -> Result<()>;

    /// Add one preferred network at `index`.
    fn add_at_index(&self, interface: &InterfaceHandle, network: &PreferredNetwork, index: usize) -> Result<()>;

    /// Turn the interface's radio on or off.
    fn set_power(&self, interface: &InterfaceHandle, on: bool) -> Result<()>;
}
