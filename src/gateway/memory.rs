// SSID Shuffle - In-Memory Gateway
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! In-memory gateway with failure injection, for tests.

use std::cell::RefCell;
use std::collections::HashSet;

use super::WirelessGateway;
use crate::models::{Error, InterfaceHandle, PreferredNetwork, PreferredNetworkList, Result};

/// Simulated preferred-network store for one interface.
#[derive(Debug)]
pub struct MemoryGateway {
    interface: InterfaceHandle,
    stored: RefCell<Vec<PreferredNetwork>>,
    calls: RefCell<Vec<String>>,
    add_calls: RefCell<usize>,
    /// Every add from this 1-based call number onward fails.
    pub fail_adds_from: Option<usize>,
    /// Adds of these SSIDs fail.
    pub fail_ssids: HashSet<String>,
    /// Mutations fail with `Unauthorized`.
    pub deny_mutation: bool,
    /// The atomic commit reports success without changing anything.
    pub atomic_no_effect: bool,
    /// The atomic commit fails with this message.
    pub atomic_error: Option<String>,
    pub fail_power_off: bool,
    pub fail_power_on: bool,
}

impl MemoryGateway {
    pub fn new(interface: &str, ssids: &[&str]) -> Self {
        Self {
            interface: InterfaceHandle::new(interface),
            stored: RefCell::new(ssids.iter().map(|s| PreferredNetwork::new(*s)).collect()),
            calls: RefCell::new(Vec::new()),
            add_calls: RefCell::new(0),
            fail_adds_from: None,
            fail_ssids: HashSet::new(),
            deny_mutation: false,
            atomic_no_effect: false,
            atomic_error: None,
            fail_power_off: false,
            fail_power_on: false,
        }
    }

    /// SSIDs currently stored.
    pub fn stored(&self) -> Vec<String> {
        self.stored.borrow().iter().map(|n| n.ssid.clone()).collect()
    }

    /// Calls made so far, e.g. `"remove_all"` or `"add Pismo@0"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Check if any mutating call was made.
    pub fn mutated(&self) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|c| c != "current_order")
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn check_interface(&self, interface: &InterfaceHandle) -> Result<()> {
        if interface == &self.interface {
            Ok(())
        } else {
            Err(Error::InterfaceNotFound(interface.to_string()))
        }
    }
}

impl WirelessGateway for MemoryGateway {
    fn current_order(&self, interface: &InterfaceHandle) -> Result<PreferredNetworkList> {
        self.record("current_order".to_string());
        self.check_interface(interface)?;
        Ok(PreferredNetworkList::new(
            interface.clone(),
            self.stored.borrow().clone(),
        ))
    }

    fn apply_order_atomic(&self, interface: &InterfaceHandle, order: &PreferredNetworkList) -> Result<()> {
        self.record("apply_order_atomic".to_string());
        self.check_interface(interface)?;
        if self.deny_mutation {
            return Err(Error::Unauthorized);
        }
        if let Some(message) = &self.atomic_error {
            return Err(Error::AtomicCommitFailed(message.clone()));
        }
        if !self.atomic_no_effect {
            *self.stored.borrow_mut() = order.networks().to_vec();
        }
        Ok(())
    }

    fn remove_all(&self, interface: &InterfaceHandle) -> Result<()> {
        self.record("remove_all".to_string());
        self.check_interface(interface)?;
        if self.deny_mutation {
            return Err(Error::Unauthorized);
        }
        self.stored.borrow_mut().clear();
        Ok(())
    }

    fn add_at_index(&self, interface: &InterfaceHandle, network: &PreferredNetwork, index: usize) -> Result<()> {
        self.record(format!("add {}@{}", network.ssid, index));
        self.check_interface(interface)?;

        let call_number = {
            let mut count = self.add_calls.borrow_mut();
            *count += 1;
            *count
        };

        if self.deny_mutation {
            return Err(Error::Unauthorized);
        }
        if self.fail_adds_from.is_some_and(|n| call_number >= n) {
            return Err(Error::NetworkSetup(format!(
                "Could not find network {} in keychain",
                network.ssid
            )));
        }
        if self.fail_ssids.contains(&network.ssid) {
            return Err(Error::NetworkSetup(format!(
                "Could not find network {} in keychain",
                network.ssid
            )));
        }

        let mut stored = self.stored.borrow_mut();
        let index = index.min(stored.len());
        stored.insert(index, network.clone());
        Ok(())
    }

    fn set_power(&self, interface: &InterfaceHandle, on: bool) -> Result<()> {
        self.record(format!("power {}", if on { "on" } else { "off" }));
        self.check_interface(interface)?;
        if (on && self.fail_power_on) || (!on && self.fail_power_off) {
            return Err(Error::NetworkSetup("** Error: power change failed".to_string()));
        }
        Ok(())
    }
}
