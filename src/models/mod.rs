// SSID Shuffle - Shared Models
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Shared Models
//!
//! Types shared by the resolver, the commit engine and the platform
//! gateways:
//!
//! - **Network**: Preferred-network list, entries and interface handle
//! - **Request**: Requested SSID ordering
//! - **Result**: Commit outcomes and reports
//! - **Config**: Tool paths and defaults
//! - **Error**: Shared error types
//!
//! ## Design Principles
//!
//! 1. **Validate first**: Requests are checked against the current order
//!    before anything is changed
//! 2. **No silent loss**: Every entry that could not be restored is reported
//! 3. **Serializable**: Lists and reports serialize to JSON

pub mod config;
pub mod error;
pub mod network;
pub mod request;
pub mod result;
pub mod validation;

// Re-export main types for convenience
pub use config::AppConfig;
pub use error::{Error, Result};
pub use network::{InterfaceHandle, PreferredNetwork, PreferredNetworkList, SecurityType};
pub use request::ReorderRequest;
pub use result::{CommitOutcome, CommitReport, CommitState, FailedNetwork};

/// Program name used in messages.
pub const APP_NAME: &str = "ssidshuffle";

/// Configuration directory name (under the user config dir).
pub const CONFIG_DIR_NAME: &str = "ssidshuffle";
