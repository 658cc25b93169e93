// SSID Shuffle - Commit Engine
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Applies a resolved preferred-network order through a [`WirelessGateway`].
//!
//! Two strategies exist:
//!
//! - **Atomic**: the whole list is replaced with one platform call. Either
//!   everything changes or nothing does.
//! - **Destructive**: the list is cleared and every entry is re-added in the
//!   new order. A failure after clearing leaves the interface with fewer
//!   networks than before and is reported as a partial failure.

use std::collections::HashSet;
use std::fmt;
use tracing::{debug, error, info, warn};

use crate::gateway::WirelessGateway;
use crate::models::{CommitOutcome, CommitState, Error, FailedNetwork, PreferredNetworkList, Result};

const UNCHANGED_AFTER_COMMIT: &str = "platform reported success but the preferred order is unchanged";

/// How a new order is written to the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStrategy {
    /// Replace the whole list in one call.
    Atomic,
    /// Remove every entry, then re-add them in order.
    Destructive,
}

impl CommitStrategy {
    /// Pick the strategy for this run.
    pub fn select(atomic_supported: bool, force_destructive: bool) -> Self {
        if atomic_supported && !force_destructive {
            Self::Atomic
        } else {
            Self::Destructive
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Atomic => "atomic",
            Self::Destructive => "destructive",
        }
    }
}

impl fmt::Display for CommitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Executes one commit with a fixed strategy.
pub struct CommitExecutor<'a, G: WirelessGateway + ?Sized> {
    gateway: &'a G,
    strategy: CommitStrategy,
    privileged: bool,
}

impl<'a, G: WirelessGateway + ?Sized> CommitExecutor<'a, G> {
    pub fn new(gateway: &'a G, strategy: CommitStrategy, privileged: bool) -> Self {
        Self {
            gateway,
            strategy,
            privileged,
        }
    }

    pub fn strategy(&self) -> CommitStrategy {
        self.strategy
    }

    /// Replace `current` with `target`.
    ///
    /// `target` must hold exactly the SSIDs of `current`. SSIDs that are not
    /// configured yield [`CommitOutcome::Rejected`] and nothing is changed.
    /// Errors are returned for failures that leave the configuration as it
    /// was; a destructive run that loses entries returns
    /// [`CommitOutcome::PartialFailure`].
    pub fn commit(&self, current: &PreferredNetworkList, target: &PreferredNetworkList) -> Result<CommitOutcome> {
        if let Some(outcome) = check_permutation(current, target)? {
            return Ok(outcome);
        }

        if target.same_order(current) {
            info!("Preferred networks on {} are already in the requested order", current.interface());
            return Ok(CommitOutcome::Success {
                order: current.clone(),
            });
        }

        if !self.privileged {
            warn!("Not running with the privilege needed to change {}", current.interface());
            return Ok(CommitOutcome::Unauthorized);
        }

        info!(
            "Committing {} preferred networks on {} ({} strategy)",
            target.len(),
            target.interface(),
            self.strategy
        );

        match self.strategy {
            CommitStrategy::Atomic => self.commit_atomic(target),
            CommitStrategy::Destructive => self.commit_destructive(target),
        }
    }

    fn commit_atomic(&self, target: &PreferredNetworkList) -> Result<CommitOutcome> {
        let interface = target.interface();
        let mut state = CommitState::Pending;

        match self.gateway.apply_order_atomic(interface, target) {
            Ok(()) => {}
            Err(Error::Unauthorized) => {
                warn!("Atomic commit on {} was not permitted", interface);
                return Ok(CommitOutcome::Unauthorized);
            }
            Err(e) => {
                transition(&mut state, CommitState::Failed, interface.name());
                return Err(match e {
                    Error::AtomicCommitFailed(message) => Error::AtomicCommitFailed(message),
                    other => Error::AtomicCommitFailed(other.to_string()),
                });
            }
        }

        let stored = self.gateway.current_order(interface)?;
        if !stored.same_order(target) {
            transition(&mut state, CommitState::Failed, interface.name());
            error!(
                "Order on {} after atomic commit is {:?}, expected {:?}",
                interface,
                stored.ssids(),
                target.ssids()
            );
            return Err(Error::AtomicCommitFailed(UNCHANGED_AFTER_COMMIT.to_string()));
        }

        transition(&mut state, CommitState::Committed, interface.name());
        Ok(CommitOutcome::Success { order: stored })
    }

    fn commit_destructive(&self, target: &PreferredNetworkList) -> Result<CommitOutcome> {
        let interface = target.interface();
        let mut state = CommitState::Pending;

        warn!("Networks re-added with networksetup will have auto-join enabled");

        match self.gateway.remove_all(interface) {
            Ok(()) => transition(&mut state, CommitState::Cleared, interface.name()),
            Err(Error::Unauthorized) => {
                warn!("Removing preferred networks on {} was not permitted", interface);
                return Ok(CommitOutcome::Unauthorized);
            }
            Err(e) => {
                transition(&mut state, CommitState::Failed, interface.name());
                return Err(Error::action_failed("remove preferred networks", e.to_string()));
            }
        }

        transition(&mut state, CommitState::Rebuilding, interface.name());

        let mut applied = Vec::with_capacity(target.len());
        let mut remaining = Vec::new();

        // Keep going after a failure so as few networks as possible are lost.
        for network in target.networks() {
            let index = applied.len();
            match self.gateway.add_at_index(interface, network, index) {
                Ok(()) => {
                    debug!("Re-added {:?} at index {}", network.ssid, index);
                    applied.push(network.ssid.clone());
                }
                Err(e) => {
                    error!("Failed to re-add {:?} on {}: {}", network.ssid, interface, e);
                    remaining.push(FailedNetwork {
                        ssid: network.ssid.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if remaining.is_empty() {
            transition(&mut state, CommitState::Committed, interface.name());
            return Ok(CommitOutcome::Success {
                order: target.clone(),
            });
        }

        transition(&mut state, CommitState::Failed, interface.name());
        error!(
            "Preferred networks on {} were cleared and {} of {} could not be re-added: {:?}",
            interface,
            remaining.len(),
            target.len(),
            remaining.iter().map(|f| f.ssid.as_str()).collect::<Vec<_>>()
        );

        let cause = remaining[0].reason.clone();
        Ok(CommitOutcome::PartialFailure {
            applied,
            remaining,
            cause,
        })
    }
}

/// Check that `target` names exactly the SSIDs of `current`.
fn check_permutation(current: &PreferredNetworkList, target: &PreferredNetworkList) -> Result<Option<CommitOutcome>> {
    let unknown: Vec<String> = target
        .ssids()
        .into_iter()
        .filter(|ssid| !current.contains(ssid))
        .map(String::from)
        .collect();

    if !unknown.is_empty() {
        return Ok(Some(CommitOutcome::Rejected { missing: unknown }));
    }

    let named: HashSet<&str> = target.ssids().into_iter().collect();
    let dropped: Vec<&str> = current
        .ssids()
        .into_iter()
        .filter(|ssid| !named.contains(ssid))
        .collect();

    if !dropped.is_empty() {
        return Err(Error::Internal(format!(
            "new order would drop configured networks: {:?}",
            dropped
        )));
    }

    Ok(None)
}

fn transition(state: &mut CommitState, next: CommitState, interface: &str) {
    debug!("Commit on {}: {} -> {}", interface, state.as_str(), next.as_str());
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::memory::MemoryGateway;
    use crate::models::InterfaceHandle;

    const SSIDS: [&str; 5] = ["Dartanian", "Pismo", "Mercury", "Mac Man", "Columbus"];

    fn list(ssids: &[&str]) -> PreferredNetworkList {
        PreferredNetworkList::from_ssids(InterfaceHandle::new("en0"), ssids.iter().copied())
    }

    fn reversed() -> PreferredNetworkList {
        let mut ssids = SSIDS.to_vec();
        ssids.reverse();
        list(&ssids)
    }

    #[test]
    fn test_select_strategy() {
        assert_eq!(CommitStrategy::select(true, false), CommitStrategy::Atomic);
        assert_eq!(CommitStrategy::select(true, true), CommitStrategy::Destructive);
        assert_eq!(CommitStrategy::select(false, false), CommitStrategy::Destructive);
        assert_eq!(CommitStrategy::Atomic.to_string(), "atomic");
    }

    #[test]
    fn test_atomic_success_stores_target() {
        let gateway = MemoryGateway::new("en0", &SSIDS);
        let executor = CommitExecutor::new(&gateway, CommitStrategy::Atomic, true);

        let outcome = executor.commit(&list(&SSIDS), &reversed()).unwrap();

        assert!(outcome.is_success());
        assert_eq!(gateway.stored(), vec!["Columbus", "Mac Man", "Mercury", "Pismo", "Dartanian"]);
        assert!(!gateway.calls().iter().any(|c| c == "remove_all"));
    }

    #[test]
    fn test_atomic_without_effect_fails() {
        let mut gateway = MemoryGateway::new("en0", &SSIDS);
        gateway.atomic_no_effect = true;
        let executor = CommitExecutor::new(&gateway, CommitStrategy::Atomic, true);

        let result = executor.commit(&list(&SSIDS), &reversed());

        assert!(matches!(result, Err(Error::AtomicCommitFailed(ref m)) if m == UNCHANGED_AFTER_COMMIT));
        assert_eq!(gateway.stored(), SSIDS.to_vec());
    }

    #[test]
    fn test_atomic_error_leaves_order_untouched() {
        let mut gateway = MemoryGateway::new("en0", &SSIDS);
        gateway.atomic_error = Some("busy".into());
        let executor = CommitExecutor::new(&gateway, CommitStrategy::Atomic, true);

        assert!(matches!(
            executor.commit(&list(&SSIDS), &reversed()),
            Err(Error::AtomicCommitFailed(ref m)) if m == "busy"
        ));
        assert_eq!(gateway.stored(), SSIDS.to_vec());
    }

    #[test]
    fn test_atomic_denied_is_unauthorized() {
        let mut gateway = MemoryGateway::new("en0", &SSIDS);
        gateway.deny_mutation = true;
        let executor = CommitExecutor::new(&gateway, CommitStrategy::Atomic, true);

        let outcome = executor.commit(&list(&SSIDS), &reversed()).unwrap();
        assert_eq!(outcome, CommitOutcome::Unauthorized);
        assert_eq!(gateway.stored(), SSIDS.to_vec());
    }

    #[test]
    fn test_unprivileged_never_mutates() {
        for strategy in [CommitStrategy::Atomic, CommitStrategy::Destructive] {
            let gateway = MemoryGateway::new("en0", &SSIDS);
            let executor = CommitExecutor::new(&gateway, strategy, false);

            let outcome = executor.commit(&list(&SSIDS), &reversed()).unwrap();

            assert_eq!(outcome, CommitOutcome::Unauthorized);
            assert!(!gateway.mutated());
        }
    }

    #[test]
    fn test_destructive_success_readds_in_order() {
        let gateway = MemoryGateway::new("en0", &SSIDS);
        let executor = CommitExecutor::new(&gateway, CommitStrategy::Destructive, true);

        let outcome = executor.commit(&list(&SSIDS), &reversed()).unwrap();

        assert!(outcome.is_success());
        assert_eq!(gateway.stored(), vec!["Columbus", "Mac Man", "Mercury", "Pismo", "Dartanian"]);

        let calls = gateway.calls();
        assert_eq!(calls[0], "remove_all");
        assert_eq!(calls[1], "add Columbus@0");
        assert_eq!(calls[5], "add Dartanian@4");
    }

    #[test]
    fn test_destructive_failure_from_nth_add() {
        for n in 1..=SSIDS.len() {
            let mut gateway = MemoryGateway::new("en0", &SSIDS);
            gateway.fail_adds_from = Some(n);
            let executor = CommitExecutor::new(&gateway, CommitStrategy::Destructive, true);
            let target = reversed();

            let outcome = executor.commit(&list(&SSIDS), &target).unwrap();

            let expected_applied: Vec<String> = target.ssids()[..n - 1].iter().map(|s| s.to_string()).collect();
            let expected_failed: Vec<String> = target.ssids()[n - 1..].iter().map(|s| s.to_string()).collect();

            match outcome {
                CommitOutcome::PartialFailure {
                    applied, remaining, ..
                } => {
                    assert_eq!(applied.len(), n - 1);
                    assert_eq!(applied, expected_applied);
                    assert_eq!(
                        remaining.into_iter().map(|f| f.ssid).collect::<Vec<_>>(),
                        expected_failed
                    );
                }
                other => panic!("unexpected outcome for n={}: {:?}", n, other),
            }
            assert_eq!(gateway.stored(), expected_applied);
        }
    }

    #[test]
    fn test_destructive_continues_after_single_failure() {
        let mut gateway = MemoryGateway::new("en0", &SSIDS);
        gateway.fail_ssids.insert("Mercury".to_string());
        let executor = CommitExecutor::new(&gateway, CommitStrategy::Destructive, true);

        let outcome = executor.commit(&list(&SSIDS), &reversed()).unwrap();

        match outcome {
            CommitOutcome::PartialFailure {
                applied,
                remaining,
                cause,
            } => {
                assert_eq!(applied, vec!["Columbus", "Mac Man", "Pismo", "Dartanian"]);
                assert_eq!(remaining.len(), 1);
                assert_eq!(remaining[0].ssid, "Mercury");
                assert!(cause.contains("keychain"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        // Indices stay contiguous after the failed entry.
        assert!(gateway.calls().contains(&"add Pismo@2".to_string()));
        assert_eq!(gateway.stored(), vec!["Columbus", "Mac Man", "Pismo", "Dartanian"]);
    }

    #[test]
    fn test_destructive_denied_before_clearing() {
        let mut gateway = MemoryGateway::new("en0", &SSIDS);
        gateway.deny_mutation = true;
        let executor = CommitExecutor::new(&gateway, CommitStrategy::Destructive, true);

        let outcome = executor.commit(&list(&SSIDS), &reversed()).unwrap();

        assert_eq!(outcome, CommitOutcome::Unauthorized);
        assert_eq!(gateway.stored(), SSIDS.to_vec());
        assert!(!gateway.calls().iter().any(|c| c.starts_with("add ")));
    }

    #[test]
    fn test_unknown_ssid_rejected_without_mutation() {
        let gateway = MemoryGateway::new("en0", &SSIDS);
        let executor = CommitExecutor::new(&gateway, CommitStrategy::Destructive, true);
        let target = list(&["Kaleidoscope", "Dartanian", "Pismo", "Mercury", "Mac Man", "Columbus"]);

        let outcome = executor.commit(&list(&SSIDS), &target).unwrap();

        assert_eq!(
            outcome,
            CommitOutcome::Rejected {
                missing: vec!["Kaleidoscope".to_string()]
            }
        );
        assert!(!gateway.mutated());
    }

    #[test]
    fn test_dropping_networks_is_an_error() {
        let gateway = MemoryGateway::new("en0", &SSIDS);
        let executor = CommitExecutor::new(&gateway, CommitStrategy::Destructive, true);

        let result = executor.commit(&list(&SSIDS), &list(&["Pismo", "Dartanian"]));

        assert!(matches!(result, Err(Error::Internal(_))));
        assert!(!gateway.mutated());
    }

    #[test]
    fn test_unchanged_order_is_noop() {
        let gateway = MemoryGateway::new("en0", &SSIDS);
        let executor = CommitExecutor::new(&gateway, CommitStrategy::Destructive, false);

        let outcome = executor.commit(&list(&SSIDS), &list(&SSIDS)).unwrap();

        assert!(outcome.is_success());
        assert!(!gateway.mutated());
    }
}
