// SSID Shuffle - Reorder Requests
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! User-requested SSID orderings.

use serde::{Deserialize, Serialize};

/// A requested change to the preferred-network order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReorderRequest {
    /// Move one SSID to the top, keeping the others in their current order.
    Promote { ssid: String },
    /// Place the named SSIDs first, in this order; unnamed SSIDs follow.
    Order { ssids: Vec<String> },
}

impl ReorderRequest {
    /// Build a request from the SSIDs given on the command line.
    ///
    /// A single SSID is a promotion; anything else is an ordering.
    pub fn from_ssids(mut ssids: Vec<String>) -> Self {
        if ssids.len() == 1 {
            Self::Promote {
                ssid: ssids.remove(0),
            }
        } else {
            Self::Order { ssids }
        }
    }

    /// SSIDs named by the request, in requested order.
    pub fn named(&self) -> Vec<&str> {
        match self {
            Self::Promote { ssid } => vec![ssid.as_str()],
            Self::Order { ssids } => ssids.iter().map(String::as_str).collect(),
        }
    }

    /// Check if the request names nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Promote { .. } => false,
            Self::Order { ssids } => ssids.is_empty(),
        }
    }
}
