// SSID Shuffle - Main Entry Point
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # SSID Shuffle
//!
//! Reorders the preferred Wi-Fi networks of a macOS wireless interface.
//!
//! This is the main entry point for the command-line tool.

use clap::Parser;
use std::io;
use std::process::ExitCode;

mod application;
mod cli;
mod commit;
mod gateway;
mod models;
mod platform;
mod power;
mod resolver;

use application::{Application, RunOptions};
use cli::Cli;
use commit::CommitStrategy;
use gateway::MacGateway;
use models::validation::{validate_interface_name, validate_ssids};
use models::{AppConfig, Result, APP_NAME};

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_logging(debug_mode: bool) {
    let log_level = if debug_mode {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // stdout is reserved for listings and reports
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_level.into()),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    let ssids = validate_ssids(&cli.ssids)?;
    if let Some(name) = &cli.interface {
        validate_interface_name(name)?;
    }

    let caps = platform::probe(&config)?;
    let interface = caps.resolve_interface(cli.interface.as_deref())?;

    let strategy = CommitStrategy::select(caps.atomic_reorder, cli.networksetup);
    tracing::debug!("Using {} strategy on {}", strategy, interface);

    let plan = cli.plan(ssids);

    let options = RunOptions {
        dry_run: cli.dry_run,
        json: cli.json,
        strategy,
        privileged: caps.privileged,
        settle: power::SETTLE_DELAY,
    };

    let gateway = MacGateway::new(&config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    Application::new(&gateway, interface, options).run(&plan, &mut out)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.debug);
    tracing::debug!("Starting {} v{}", APP_NAME, VERSION);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.exit_code();
            if e.is_validation_error() {
                tracing::debug!("Rejected before any change was made");
            }
            tracing::debug!("Exiting with code {}", code);
            eprintln!("{}: {}", APP_NAME, e);
            ExitCode::from(code)
        }
    }
}
