// SSID Shuffle - Platform Probe
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Detects what the running system supports: OS version, atomic reorder
//! support, privilege and Wi-Fi interfaces.

use once_cell::sync::Lazy;
use regex::Regex;
use semver::Version;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info, warn};

use crate::gateway::networksetup::NetworkSetup;
use crate::models::{AppConfig, Error, InterfaceHandle, Result};

static PRODUCT_VERSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)(?:\.(\d+))?(?:\.(\d+))?").expect("product version pattern is valid")
});

const ID_PATH: &str = "/usr/bin/id";

/// Capabilities of the running system, probed once per run.
#[derive(Debug, Clone)]
pub struct PlatformCapabilities {
    /// macOS product version.
    pub os_version: Version,
    /// Whether the CoreWLAN reorder takes effect on this release.
    pub atomic_reorder: bool,
    /// Whether the process runs as root.
    pub privileged: bool,
    /// BSD names of all Wi-Fi devices.
    pub wifi_interfaces: Vec<String>,
    /// First Wi-Fi device.
    pub default_interface: Option<InterfaceHandle>,
}

impl PlatformCapabilities {
    /// One-line description for logging.
    pub fn summary(&self) -> String {
        format!(
            "macOS {}, atomic reorder {}, privileged {}, Wi-Fi interfaces {:?}",
            self.os_version,
            if self.atomic_reorder { "available" } else { "unavailable" },
            self.privileged,
            self.wifi_interfaces
        )
    }

    /// Pick the interface for this run.
    ///
    /// An explicit name must be a known Wi-Fi device. When the device list
    /// could not be read the explicit name is trusted.
    pub fn resolve_interface(&self, explicit: Option<&str>) -> Result<InterfaceHandle> {
        match explicit {
            Some(name) => {
                if self.wifi_interfaces.is_empty() || self.wifi_interfaces.iter().any(|w| w == name) {
                    return Ok(InterfaceHandle::new(name));
                }
                Err(Error::InterfaceNotFound(match &self.default_interface {
                    Some(default) => format!("{}; perhaps you meant {:?}?", name, default.name()),
                    None => name.to_string(),
                }))
            }
            None => self
                .default_interface
                .clone()
                .ok_or_else(|| Error::InterfaceNotFound("no Wi-Fi interface present".to_string())),
        }
    }
}

/// Parse `sw_vers -productVersion` output ("13", "13.4" or "13.4.1").
pub fn parse_product_version(output: &str) -> Result<Version> {
    let caps = PRODUCT_VERSION_RE
        .captures(output)
        .ok_or_else(|| Error::OsVersion(format!("unrecognized product version {:?}", output.trim())))?;

    let part = |i: usize| -> Result<u64> {
        caps.get(i)
            .map(|m| m.as_str().parse::<u64>())
            .transpose()
            .map(|v| v.unwrap_or(0))
            .map_err(|e| Error::OsVersion(e.to_string()))
    };

    Ok(Version::new(part(1)?, part(2)?, part(3)?))
}

/// Parse `id -u` output.
pub fn parse_uid(output: &str) -> Result<u32> {
    output
        .trim()
        .parse()
        .map_err(|_| Error::Internal(format!("unexpected 'id -u' output {:?}", output.trim())))
}

/// Check if the CoreWLAN reorder takes effect on `version`.
pub fn atomic_reorder_supported(version: &Version, last_atomic_major: u64) -> bool {
    version.major <= last_atomic_major
}

fn run_stdout(program: &Path, args: &[&str]) -> Result<String> {
    debug!("Running {} {:?}", program.display(), args);
    let output = Command::new(program).args(args).output()?;
    if !output.status.success() {
        return Err(Error::Internal(format!(
            "{} exited with {}",
            program.display(),
            output.status
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn os_version(config: &AppConfig) -> Result<Version> {
    let stdout = run_stdout(&config.sw_vers_path, &["-productVersion"])
        .map_err(|e| Error::OsVersion(e.to_string()))?;
    parse_product_version(&stdout)
}

fn is_privileged() -> bool {
    match run_stdout(Path::new(ID_PATH), &["-u"]).and_then(|out| parse_uid(&out)) {
        Ok(uid) => uid == 0,
        Err(e) => {
            warn!("Could not determine user id, assuming unprivileged: {}", e);
            false
        }
    }
}

/// Probe the running system.
pub fn probe(config: &AppConfig) -> Result<PlatformCapabilities> {
    let os_version = os_version(config)?;
    let atomic_reorder = atomic_reorder_supported(&os_version, config.last_atomic_major);
    let privileged = is_privileged();

    let wifi_interfaces: Vec<String> = match NetworkSetup::new(&config.networksetup_path).hardware_ports() {
        Ok(ports) => ports
            .into_iter()
            .filter(|p| p.is_wifi())
            .map(|p| p.device)
            .collect(),
        Err(e) => {
            warn!("Could not list hardware ports: {}", e);
            Vec::new()
        }
    };
    let default_interface = wifi_interfaces.first().map(InterfaceHandle::new);

    let caps = PlatformCapabilities {
        os_version,
        atomic_reorder,
        privileged,
        wifi_interfaces,
        default_interface,
    };
    info!("{}", caps.summary());
    Ok(caps)
}
