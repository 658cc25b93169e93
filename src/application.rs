// SSID Shuffle - Application
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! The reorder pipeline: fetch the current order, resolve the new one,
//! commit it and optionally power cycle the interface.

use serde::Serialize;
use std::io::Write;
use std::time::Duration;
use tracing::{info, warn};

use crate::commit::{CommitExecutor, CommitStrategy};
use crate::gateway::WirelessGateway;
use crate::models::{
    CommitOutcome, CommitReport, Error, InterfaceHandle, PreferredNetworkList, ReorderRequest, Result,
};
use crate::power::PowerCycle;
use crate::resolver;

/// What one run should do, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub list_current: bool,
    pub request: Option<ReorderRequest>,
    pub power_cycle: bool,
}

/// Settings fixed for one run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub dry_run: bool,
    pub json: bool,
    pub strategy: CommitStrategy,
    pub privileged: bool,
    pub settle: Duration,
}

#[derive(Serialize)]
struct DryRunReport<'a> {
    interface: &'a str,
    dry_run: bool,
    previous: Vec<&'a str>,
    requested: Vec<&'a str>,
}

#[derive(Serialize)]
struct PowerCycleReport<'a> {
    interface: &'a str,
    dry_run: bool,
    power_cycled: bool,
}

/// Runs the pipeline against one interface.
pub struct Application<'a, G: WirelessGateway + ?Sized> {
    gateway: &'a G,
    interface: InterfaceHandle,
    options: RunOptions,
}

impl<'a, G: WirelessGateway + ?Sized> Application<'a, G> {
    pub fn new(gateway: &'a G, interface: InterfaceHandle, options: RunOptions) -> Self {
        Self {
            gateway,
            interface,
            options,
        }
    }

    /// Run every step of `plan`: list, then reorder, then power cycle.
    pub fn run(&self, plan: &Plan, out: &mut impl Write) -> Result<()> {
        if plan.list_current {
            self.list_current(out)?;
        }
        if let Some(request) = &plan.request {
            self.reorder(request, out)?;
        }
        if plan.power_cycle {
            self.power_cycle(out)?;
        }
        Ok(())
    }

    fn fetch_current(&self) -> Result<PreferredNetworkList> {
        let current = self.gateway.current_order(&self.interface)?;
        if current.is_empty() {
            return Err(Error::NoPreferredNetworks(self.interface.to_string()));
        }
        Ok(current)
    }

    /// Print the current preferred order.
    pub fn list_current(&self, out: &mut impl Write) -> Result<PreferredNetworkList> {
        let current = self.fetch_current()?;

        if self.options.json {
            writeln!(out, "{}", to_json(&current)?)?;
        } else {
            writeln!(out, "Preferred networks on {}:", self.interface)?;
            write_order(out, &current)?;
        }
        Ok(current)
    }

    /// Resolve `request` against the current order and commit it.
    ///
    /// In dry-run mode the old and new orders are printed and nothing is
    /// changed.
    pub fn reorder(&self, request: &ReorderRequest, out: &mut impl Write) -> Result<PreferredNetworkList> {
        let current = self.fetch_current()?;
        let target = resolver::resolve(&current, request)?;

        if self.options.dry_run {
            self.print_dry_run(&current, &target, out)?;
            return Ok(target);
        }

        let executor = CommitExecutor::new(self.gateway, self.options.strategy, self.options.privileged);
        let mut report = CommitReport::new(
            self.interface.name(),
            executor.strategy().name(),
            &current,
            &target,
        );

        let outcome = executor.commit(&current, &target).map_err(|e| {
            if matches!(e, Error::AtomicCommitFailed(_)) {
                warn!("Rerun with --networksetup to rebuild the list one network at a time");
            }
            e
        })?;
        report.finalize(&outcome);
        info!("{}", report.message);

        if self.options.json {
            writeln!(out, "{}", to_json(&report)?)?;
        } else {
            self.print_outcome(&outcome, out)?;
        }

        outcome.into_result()
    }

    /// Power cycle the interface, or only say so in dry-run mode.
    pub fn power_cycle(&self, out: &mut impl Write) -> Result<()> {
        if !self.options.dry_run {
            PowerCycle::new(self.gateway, self.options.settle).run(&self.interface)?;
        }

        if self.options.json {
            let report = PowerCycleReport {
                interface: self.interface.name(),
                dry_run: self.options.dry_run,
                power_cycled: !self.options.dry_run,
            };
            writeln!(out, "{}", to_json(&report)?)?;
        } else if self.options.dry_run {
            writeln!(out, "Would power cycle {}", self.interface)?;
        } else {
            writeln!(out, "Power cycled {}", self.interface)?;
        }
        Ok(())
    }

    fn print_dry_run(
        &self,
        current: &PreferredNetworkList,
        target: &PreferredNetworkList,
        out: &mut impl Write,
    ) -> Result<()> {
        if self.options.json {
            let report = DryRunReport {
                interface: self.interface.name(),
                dry_run: true,
                previous: current.ssids(),
                requested: target.ssids(),
            };
            writeln!(out, "{}", to_json(&report)?)?;
            return Ok(());
        }

        writeln!(out, "Current order on {}:", self.interface)?;
        write_order(out, current)?;
        writeln!(out, "New order on {}:", self.interface)?;
        write_order(out, target)?;
        writeln!(out, "Dry run, nothing was changed.")?;
        Ok(())
    }

    fn print_outcome(&self, outcome: &CommitOutcome, out: &mut impl Write) -> Result<()> {
        match outcome {
            CommitOutcome::Success { order } => {
                writeln!(out, "Preferred networks on {} are now:", self.interface)?;
                write_order(out, order)?;
                if self.options.strategy == CommitStrategy::Destructive {
                    writeln!(out, "Note: re-added networks have auto-join enabled.")?;
                }
            }
            CommitOutcome::PartialFailure {
                applied, remaining, ..
            } => {
                writeln!(out, "Re-added to {}:", self.interface)?;
                for (i, ssid) in applied.iter().enumerate() {
                    writeln!(out, "  {}. {}", i + 1, ssid)?;
                }
                writeln!(out, "NOT re-added, reconnect to these manually:")?;
                for failed in remaining {
                    writeln!(out, "  {} ({})", failed.ssid, failed.reason)?;
                }
            }
            // Reported by the caller from the returned error.
            CommitOutcome::Rejected { .. } | CommitOutcome::Unauthorized => {}
        }
        Ok(())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::Internal(format!("JSON output failed: {}", e)))
}

fn write_order(out: &mut impl Write, list: &PreferredNetworkList) -> Result<()> {
    for (i, ssid) in list.ssids().iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, ssid)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::MemoryGateway;

    const SSIDS: [&str; 5] = ["Dartanian", "Pismo", "Mercury", "Mac Man", "Columbus"];

    fn options() -> RunOptions {
        RunOptions {
            dry_run: false,
            json: false,
            strategy: CommitStrategy::Atomic,
            privileged: true,
            settle: Duration::ZERO,
        }
    }

    fn promote(ssid: &str) -> ReorderRequest {
        ReorderRequest::from_ssids(vec![ssid.to_string()])
    }

    fn app<'a>(gateway: &'a MemoryGateway, options: RunOptions) -> Application<'a, MemoryGateway> {
        Application::new(gateway, InterfaceHandle::new("en0"), options)
    }

    #[test]
    fn test_list_current() {
        let gateway = MemoryGateway::new("en0", &SSIDS);
        let mut out = Vec::new();

        let list = app(&gateway, options()).list_current(&mut out).unwrap();

        assert_eq!(list.len(), 5);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Preferred networks on en0:\n  1. Dartanian\n"));
        assert!(text.contains("  4. Mac Man\n"));
    }

    #[test]
    fn test_list_current_empty() {
        let gateway = MemoryGateway::new("en0", &[]);
        let err = app(&gateway, options()).list_current(&mut Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 44);
    }

    #[test]
    fn test_dry_run_never_mutates() {
        let gateway = MemoryGateway::new("en0", &SSIDS);
        let mut opts = options();
        opts.dry_run = true;
        let plan = Plan {
            list_current: false,
            request: Some(promote("Mac Man")),
            power_cycle: true,
        };
        let mut out = Vec::new();

        app(&gateway, opts).run(&plan, &mut out).unwrap();

        assert!(!gateway.mutated());
        assert_eq!(gateway.stored(), SSIDS.to_vec());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("New order on en0:\n  1. Mac Man\n  2. Dartanian\n"));
        assert!(text.contains("Would power cycle en0"));
    }

    #[test]
    fn test_dry_run_json() {
        let gateway = MemoryGateway::new("en0", &SSIDS);
        let mut opts = options();
        opts.dry_run = true;
        opts.json = true;
        let mut out = Vec::new();

        app(&gateway, opts).reorder(&promote("Columbus"), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["dry_run"], true);
        assert_eq!(value["requested"][0], "Columbus");
        assert_eq!(value["previous"][0], "Dartanian");
    }

    #[test]
    fn test_dry_run_power_cycle_json() {
        let gateway = MemoryGateway::new("en0", &SSIDS);
        let mut opts = options();
        opts.dry_run = true;
        opts.json = true;
        let mut out = Vec::new();

        app(&gateway, opts).power_cycle(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["interface"], "en0");
        assert_eq!(value["dry_run"], true);
        assert_eq!(value["power_cycled"], false);
        assert!(!gateway.mutated());
    }

    #[test]
    fn test_power_cycle_json() {
        let gateway = MemoryGateway::new("en0", &SSIDS);
        let mut opts = options();
        opts.json = true;
        let mut out = Vec::new();

        app(&gateway, opts).power_cycle(&mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["power_cycled"], true);
        assert_eq!(gateway.calls(), vec!["power off", "power on"]);
    }

    #[test]
    fn test_reorder_commits() {
        let gateway = MemoryGateway::new("en0", &SSIDS);
        let mut out = Vec::new();

        let order = app(&gateway, options())
            .reorder(&promote("Mac Man"), &mut out)
            .unwrap();

        assert_eq!(order.ssids(), vec!["Mac Man", "Dartanian", "Pismo", "Mercury", "Columbus"]);
        assert_eq!(gateway.stored(), order.ssids());
    }

    #[test]
    fn test_reorder_rejects_unknown_ssid() {
        let gateway = MemoryGateway::new("en0", &SSIDS);

        let err = app(&gateway, options())
            .reorder(&promote("Kaleidoscope"), &mut Vec::new())
            .unwrap_err();

        assert!(matches!(err, Error::RejectedMissingSsids(ref m) if m == &vec!["Kaleidoscope".to_string()]));
        assert!(!gateway.mutated());
    }

    #[test]
    fn test_reorder_unprivileged() {
        let gateway = MemoryGateway::new("en0", &SSIDS);
        let mut opts = options();
        opts.privileged = false;

        let err = app(&gateway, opts)
            .reorder(&promote("Pismo"), &mut Vec::new())
            .unwrap_err();

        assert_eq!(err.exit_code(), 77);
        assert!(!gateway.mutated());
    }

    #[test]
    fn test_partial_failure_json_report() {
        let mut gateway = MemoryGateway::new("en0", &SSIDS);
        gateway.fail_ssids.insert("Pismo".to_string());
        let mut opts = options();
        opts.strategy = CommitStrategy::Destructive;
        opts.json = true;
        let mut out = Vec::new();

        let err = app(&gateway, opts)
            .reorder(&promote("Columbus"), &mut out)
            .unwrap_err();

        assert_eq!(err.exit_code(), 3);
        let report: CommitReport = serde_json::from_slice(&out).unwrap();
        assert_eq!(report.strategy, "destructive");
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].ssid, "Pismo");
    }

    #[test]
    fn test_run_order_list_reorder_power() {
        let gateway = MemoryGateway::new("en0", &SSIDS);
        let plan = Plan {
            list_current: true,
            request: Some(promote("Mercury")),
            power_cycle: true,
        };

        app(&gateway, options()).run(&plan, &mut Vec::new()).unwrap();

        let calls = gateway.calls();
        let atomic = calls.iter().position(|c| c == "apply_order_atomic").unwrap();
        let power_off = calls.iter().position(|c| c == "power off").unwrap();
        assert_eq!(calls[0], "current_order");
        assert!(atomic < power_off);
        assert_eq!(calls.last().map(String::as_str), Some("power on"));
    }
}
