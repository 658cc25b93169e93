// SSID Shuffle - Command Line
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Command-line surface.

use clap::{ArgAction, ArgGroup, Parser};
use std::path::PathBuf;

use crate::application::Plan;
use crate::models::ReorderRequest;

#[derive(Debug, Parser)]
#[command(name = "ssidshuffle")]
#[command(about = "Reorder the preferred Wi-Fi networks of a macOS wireless interface", long_about = None)]
#[command(version, disable_version_flag = true)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .multiple(true)
        .args(["ssids", "list_current", "power_cycle"])
))]
pub struct Cli {
    /// Show the current and new order without changing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// List the current preferred networks
    #[arg(short = 'l', long, conflicts_with_all = ["ssids", "power_cycle"])]
    pub list_current: bool,

    /// SSIDs to move to the top, in order; a single SSID is promoted to first place
    #[arg(short = 's', long, num_args = 1.., value_name = "SSID")]
    pub ssids: Vec<String>,

    /// Wireless interface (default: first Wi-Fi device)
    #[arg(short = 'i', long, value_name = "IF")]
    pub interface: Option<String>,

    /// Turn the interface off and on again
    #[arg(long)]
    pub power_cycle: bool,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Configuration file
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Rebuild the list with networksetup even where an atomic reorder is available
    #[arg(long, hide = true, requires = "ssids")]
    pub networksetup: bool,

    /// Print version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    /// Steps requested on the command line, reordering by the already
    /// validated `ssids`.
    pub fn plan(&self, ssids: Vec<String>) -> Plan {
        Plan {
            list_current: self.list_current,
            request: if ssids.is_empty() {
                None
            } else {
                Some(ReorderRequest::from_ssids(ssids))
            },
            power_cycle: self.power_cycle,
        }
    }
}
