// SSID Shuffle - networksetup Backend
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Wrapper around `/usr/sbin/networksetup`.
//!
//! `networksetup` often prints errors on stdout and still exits 0, so a call
//! only counts as successful when the exit status is 0 and the last output
//! line carries the command's success marker.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, warn};

use crate::models::{Error, InterfaceHandle, Result};

static HARDWARE_PORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^Hardware Port:[ \t]*(.+?)[ \t]*\r?\nDevice:[ \t]*(\S+)")
        .expect("hardware port pattern is valid")
});

const PREFERRED_HEADER: &str = "Preferred networks on";

/// Captured output of one `networksetup` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSetupOutput {
    /// Exit status, if the process exited normally.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl NetworkSetupOutput {
    /// Text describing a failure: stdout first, then stderr.
    pub fn failure_text(&self) -> String {
        let stdout = self.stdout.trim();
        let stderr = self.stderr.trim();
        if !stdout.is_empty() {
            stdout.to_string()
        } else if !stderr.is_empty() {
            stderr.to_string()
        } else {
            match self.status {
                Some(code) => format!("exited with status {}", code),
                None => "terminated by signal".to_string(),
            }
        }
    }

    /// Check that the call succeeded and printed `marker` on its last line.
    pub fn ensure_marker(&self, marker: &str) -> std::result::Result<(), String> {
        if self.status == Some(0) {
            let last = self.stdout.lines().rev().find(|l| !l.trim().is_empty());
            if last.is_some_and(|l| l.trim_start().starts_with(marker)) {
                return Ok(());
            }
        }
        Err(self.failure_text())
    }

    /// Check that the call succeeded without printing an error.
    pub fn ensure_quiet(&self) -> std::result::Result<(), String> {
        let combined = format!("{}\n{}", self.stdout, self.stderr);
        if self.status == Some(0) && !looks_like_error(&combined) {
            return Ok(());
        }
        Err(self.failure_text())
    }
}

/// A hardware port from `-listallhardwareports`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwarePort {
    /// Port name, e.g. "Wi-Fi".
    pub name: String,
    /// BSD device name, e.g. "en0".
    pub device: String,
}

impl HardwarePort {
    /// Check if this port is a wireless port.
    pub fn is_wifi(&self) -> bool {
        self.name == "Wi-Fi" || self.name == "AirPort"
    }
}

fn looks_like_error(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("error") || lower.contains("not a wi-fi interface")
}

/// Map failure text from `networksetup` to an error.
pub fn classify_failure(interface: &InterfaceHandle, text: &str) -> Error {
    let lower = text.to_lowercase();
    if lower.contains("not a wi-fi interface")
        || lower.contains("error obtaining wireless information")
        || lower.contains("unable to find item")
    {
        Error::InterfaceNotFound(interface.to_string())
    } else if lower.contains("-3930")
        || lower.contains("not permitted")
        || lower.contains("must be root")
        || lower.contains("administrator")
    {
        Error::Unauthorized
    } else {
        Error::NetworkSetup(text.to_string())
    }
}

/// Parse `-listpreferredwirelessnetworks` output into SSIDs.
///
/// Returns `None` when the output is not a preferred-network listing.
pub fn parse_preferred_networks(output: &str) -> Option<Vec<String>> {
    let mut lines = output.lines().skip_while(|l| l.trim().is_empty());
    let header = lines.next()?;

    if header.trim_start().starts_with("No preferred networks") {
        return Some(Vec::new());
    }
    if !header.trim_start().starts_with(PREFERRED_HEADER) {
        return None;
    }

    Some(
        lines
            .filter_map(|line| line.strip_prefix('\t'))
            .map(|ssid| ssid.trim_end_matches('\r').to_string())
            .filter(|ssid| !ssid.is_empty())
            .collect(),
    )
}

/// Interpret the output of `-listpreferredwirelessnetworks`.
///
/// Only output that is not a listing is checked for failure markers, since
/// SSIDs may contain any text.
pub fn preferred_from_output(interface: &InterfaceHandle, out: &NetworkSetupOutput) -> Result<Vec<String>> {
    if out.status == Some(0) {
        if let Some(ssids) = parse_preferred_networks(&out.stdout) {
            return Ok(ssids);
        }
    }

    let text = out.failure_text();
    match classify_failure(interface, &text) {
        Error::NetworkSetup(_) if out.status == Some(0) => {
            warn!("Unexpected networksetup output: {}", out.stdout.trim());
            Err(Error::NetworkSetup(format!("unexpected output: {}", text)))
        }
        err => Err(err),
    }
}

/// Parse `-listallhardwareports` output.
pub fn parse_hardware_ports(output: &str) -> Vec<HardwarePort> {
    HARDWARE_PORT_RE
        .captures_iter(output)
        .map(|c| HardwarePort {
            name: c[1].to_string(),
            device: c[2].to_string(),
        })
        .collect()
}

/// Runner for `networksetup` commands.
#[derive(Debug, Clone)]
pub struct NetworkSetup {
    path: PathBuf,
}

impl NetworkSetup {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn run(&self, args: &[&str]) -> Result<NetworkSetupOutput> {
        debug!("Running {} {:?}", self.path.display(), args);

        let output = Command::new(&self.path)
            .args(args)
            .output()
            .map_err(|e| Error::NetworkSetup(format!("failed to run {}: {}", self.path.display(), e)))?;

        Ok(NetworkSetupOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Preferred SSIDs of an interface, in priority order.
    pub fn preferred_networks(&self, interface: &InterfaceHandle) -> Result<Vec<String>> {
        let out = self.run(&["-listpreferredwirelessnetworks", interface.name()])?;
        preferred_from_output(interface, &out)
    }

    /// Remove every preferred network from an interface.
    pub fn remove_all(&self, interface: &InterfaceHandle) -> Result<()> {
        // The remove-all message does not include the SSID, so match the prefix only.
        self.run(&["-removeallpreferredwirelessnetworks", interface.name()])?
            .ensure_marker("Removed ")
            .map_err(|text| classify_failure(interface, &text))
    }

    /// Add a preferred network at a priority index.
    pub fn add_at_index(
        &self,
        interface: &InterfaceHandle,
        ssid: &str,
        index: usize,
        security: &str,
    ) -> Result<()> {
        let index = index.to_string();
        self.run(&[
            "-addpreferredwirelessnetworkatindex",
            interface.name(),
            ssid,
            &index,
            security,
        ])?
        .ensure_marker(&format!("Added {}", ssid))
        .map_err(|text| classify_failure(interface, &text))
    }

    /// Turn the Wi-Fi radio of an interface on or off.
    pub fn set_airport_power(&self, interface: &InterfaceHandle, on: bool) -> Result<()> {
        let state = if on { "on" } else { "off" };
        self.run(&["-setairportpower", interface.name(), state])?
            .ensure_quiet()
            .map_err(|text| classify_failure(interface, &text))
    }

    /// All hardware ports.
    pub fn hardware_ports(&self) -> Result<Vec<HardwarePort>> {
        let out = self.run(&["-listallhardwareports"])?;
        if out.status != Some(0) {
            return Err(Error::NetworkSetup(out.failure_text()));
        }
        Ok(parse_hardware_ports(&out.stdout))
    }
}
