// SSID Shuffle - CoreWLAN Bridge
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Access to CoreWLAN through `osascript -l JavaScript`.
//!
//! CoreWLAN is an Objective-C framework with no stable C ABI, so the
//! bridge script in `corewlan_bridge.js` is run by `osascript` and answers
//! with a single JSON object.

use serde::Deserialize;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

use crate::models::{Error, InterfaceHandle, PreferredNetwork, PreferredNetworkList, Result, SecurityType};

const BRIDGE_SCRIPT: &str = include_str!("corewlan_bridge.js");

/// Raw reply from the bridge script.
#[derive(Debug, Deserialize)]
struct BridgeReply {
    ok: bool,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    networks: Vec<BridgeNetwork>,
}

#[derive(Debug, Deserialize)]
struct BridgeNetwork {
    ssid: String,
    #[serde(default)]
    security: Option<i64>,
}

/// Parse a bridge reply into preferred networks.
fn parse_list_reply(interface: &InterfaceHandle, stdout: &str) -> Result<Vec<PreferredNetwork>> {
    let reply: BridgeReply = serde_json::from_str(stdout.trim())?;
    check_reply(interface, &reply)?;

    Ok(reply
        .networks
        .into_iter()
        .map(|n| {
            let security = n
                .security
                .map(SecurityType::from_corewlan)
                .unwrap_or_default();
            PreferredNetwork::with_security(n.ssid, security)
        })
        .collect())
}

/// Parse a bridge reply to a commit.
fn parse_commit_reply(interface: &InterfaceHandle, stdout: &str) -> Result<()> {
    let reply: BridgeReply = serde_json::from_str(stdout.trim())?;
    check_reply(interface, &reply)
}

fn check_reply(interface: &InterfaceHandle, reply: &BridgeReply) -> Result<()> {
    if reply.ok {
        return Ok(());
    }

    let message = reply.message.clone().unwrap_or_default();
    Err(match reply.code.as_deref() {
        Some("not_found") => Error::InterfaceNotFound(interface.to_string()),
        Some("not_permitted") => Error::Unauthorized,
        Some("commit_failed") => Error::AtomicCommitFailed(message),
        Some("missing") => Error::Internal(format!("CoreWLAN profile lookup failed: {}", message)),
        _ => Error::CoreWlan(message),
    })
}

/// Runner for the CoreWLAN bridge.
#[derive(Debug, Clone)]
pub struct CoreWlanBridge {
    osascript: PathBuf,
}

impl CoreWlanBridge {
    pub fn new(osascript: impl Into<PathBuf>) -> Self {
        Self {
            osascript: osascript.into(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        debug!("Running CoreWLAN bridge {:?}", args);

        let output = Command::new(&self.osascript)
            .args(["-l", "JavaScript", "-e", BRIDGE_SCRIPT])
            .args(args)
            .output()
            .map_err(|e| Error::CoreWlan(format!("failed to run {}: {}", self.osascript.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::CoreWlan(format!(
                "osascript exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Preferred networks with their security types.
    pub fn preferred_networks(&self, interface: &InterfaceHandle) -> Result<Vec<PreferredNetwork>> {
        let stdout = self.run(&["list", interface.name()])?;
        parse_list_reply(interface, &stdout)
    }

    /// Replace the preferred order with one configuration commit.
    pub fn commit_order(&self, interface: &InterfaceHandle, order: &PreferredNetworkList) -> Result<()> {
        let mut args = vec!["commit", interface.name()];
        args.extend(order.ssids());
        let stdout = self.run(&args)?;
        parse_commit_reply(interface, &stdout)
    }
}
