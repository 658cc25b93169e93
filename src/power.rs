// SSID Shuffle - Power Cycle
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Turns a wireless interface off and on again.

use std::thread;
use std::time::Duration;
use tracing::{error, info};

use crate::gateway::WirelessGateway;
use crate::models::{Error, InterfaceHandle, Result};

/// Time the interface stays off.
pub const SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Power-cycle controller.
pub struct PowerCycle<'a, G: WirelessGateway + ?Sized> {
    gateway: &'a G,
    settle: Duration,
}

impl<'a, G: WirelessGateway + ?Sized> PowerCycle<'a, G> {
    pub fn new(gateway: &'a G, settle: Duration) -> Self {
        Self { gateway, settle }
    }

    /// Disable the interface, wait, then enable it.
    ///
    /// Both steps always run and the wait is never skipped. Failures are
    /// reported together and not retried.
    pub fn run(&self, interface: &InterfaceHandle) -> Result<()> {
        info!("Power cycling {}", interface);

        let disable = self.gateway.set_power(interface, false).err();
        if let Some(e) = &disable {
            error!("Failed to turn {} off: {}", interface, e);
        }

        thread::sleep(self.settle);

        let enable = self.gateway.set_power(interface, true).err();
        if let Some(e) = &enable {
            error!("Failed to turn {} on: {}", interface, e);
        }

        if disable.is_none() && enable.is_none() {
            info!("{} power cycled", interface);
            return Ok(());
        }

        Err(Error::PowerCycleFailed {
            disable: disable.map(|e| e.to_string()),
            enable: enable.map(|e| e.to_string()),
        })
    }
}
