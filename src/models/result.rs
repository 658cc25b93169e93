// SSID Shuffle - Commit Results
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Result types for committing a new preferred-network order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{Error, Result};
use super::network::PreferredNetworkList;

/// Commit state machine positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitState {
    /// Nothing has been changed yet.
    Pending,
    /// The preferred list has been emptied (destructive strategy only).
    Cleared,
    /// Entries are being re-added (destructive strategy only).
    Rebuilding,
    /// The new order is in place.
    Committed,
    /// The commit stopped with an error.
    Failed,
}

impl CommitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Cleared => "cleared",
            Self::Rebuilding => "rebuilding",
            Self::Committed => "committed",
            Self::Failed => "failed",
        }
    }
}

/// A network that could not be re-added after the list was cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedNetwork {
    /// Network name.
    pub ssid: String,
    /// Why the add failed.
    pub reason: String,
}

/// Tagged outcome of a commit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommitOutcome {
    /// The whole new order is in place.
    Success { order: PreferredNetworkList },
    /// The list was cleared and only some entries came back.
    PartialFailure {
        /// SSIDs re-added, in their new order.
        applied: Vec<String>,
        /// SSIDs never re-added.
        remaining: Vec<FailedNetwork>,
        /// First failure reason.
        cause: String,
    },
    /// The order named SSIDs that are not configured. Nothing was changed.
    Rejected { missing: Vec<String> },
    /// The caller lacks the privilege to change the configuration.
    Unauthorized,
}

impl CommitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Final state-machine position for this outcome.
    pub fn state(&self) -> CommitState {
        match self {
            Self::Success { .. } => CommitState::Committed,
            Self::PartialFailure { .. } => CommitState::Failed,
            Self::Rejected { .. } | Self::Unauthorized => CommitState::Pending,
        }
    }

    /// Convert into the committed order or the matching error.
    pub fn into_result(self) -> Result<PreferredNetworkList> {
        match self {
            Self::Success { order } => Ok(order),
            Self::PartialFailure {
                applied, remaining, ..
            } => Err(Error::PartialDestructiveFailure {
                applied_count: applied.len(),
                failed: remaining.into_iter().map(|f| f.ssid).collect(),
            }),
            Self::Rejected { missing } => Err(Error::RejectedMissingSsids(missing)),
            Self::Unauthorized => Err(Error::Unauthorized),
        }
    }
}

/// Record of one reorder run, printed with `--json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitReport {
    /// Interface name.
    pub interface: String,
    /// Strategy used ("atomic" or "destructive").
    pub strategy: String,
    /// Final state.
    pub state: CommitState,
    /// Order before the commit.
    pub previous: Vec<String>,
    /// Order the commit aimed for.
    pub requested: Vec<String>,
    /// SSIDs missing after the commit (destructive failures only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<FailedNetwork>,
    /// Summary message.
    pub message: String,
    /// Commit start timestamp.
    pub started_at: DateTime<Utc>,
    /// Commit end timestamp.
    pub completed_at: DateTime<Utc>,
    /// Duration in milliseconds.
    pub duration_ms: u64,
}

impl CommitReport {
    /// Start a report for a commit.
    pub fn new(
        interface: impl Into<String>,
        strategy: impl Into<String>,
        previous: &PreferredNetworkList,
        requested: &PreferredNetworkList,
    ) -> Self {
        let now = Utc::now();
        Self {
            interface: interface.into(),
            strategy: strategy.into(),
            state: CommitState::Pending,
            previous: previous.ssids().into_iter().map(String::from).collect(),
            requested: requested.ssids().into_iter().map(String::from).collect(),
            failed: Vec::new(),
            message: String::new(),
            started_at: now,
            completed_at: now,
            duration_ms: 0,
        }
    }

    /// Finalize the report from the commit outcome.
    pub fn finalize(&mut self, outcome: &CommitOutcome) {
        self.completed_at = Utc::now();
        self.duration_ms = (self.completed_at - self.started_at)
            .num_milliseconds()
            .max(0) as u64;
        self.state = outcome.state();

        self.message = match outcome {
            CommitOutcome::Success { order } => {
                format!("{} preferred network(s) reordered", order.len())
            }
            CommitOutcome::PartialFailure {
                applied, remaining, ..
            } => {
                self.failed = remaining.clone();
                format!(
                    "{} of {} preferred network(s) re-added, {} lost",
                    applied.len(),
                    applied.len() + remaining.len(),
                    remaining.len()
                )
            }
            CommitOutcome::Rejected { missing } => {
                format!("Rejected: {} SSID(s) not configured", missing.len())
            }
            CommitOutcome::Unauthorized => "Not authorized".to_string(),
        };
    }
}
