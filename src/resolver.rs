// SSID Shuffle - Order Resolver
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Computes a new preferred-network order from the current order and a
//! [`ReorderRequest`].
//!
//! Named SSIDs move to the front in requested order; every other SSID keeps
//! its current relative order behind them. The resolver never drops an SSID
//! and never adds one that is not already configured.

use std::collections::HashSet;

use crate::models::{Error, PreferredNetworkList, ReorderRequest, Result};

/// Resolve the target order for `request`.
///
/// Fails with [`Error::RejectedMissingSsids`] listing every named SSID that
/// is not in `current`, in request order. Repeated names count once, at
/// their first position.
pub fn resolve(current: &PreferredNetworkList, request: &ReorderRequest) -> Result<PreferredNetworkList> {
    let named = dedup(request.named());

    let missing = missing_ssids(current, &named);
    if !missing.is_empty() {
        return Err(Error::RejectedMissingSsids(missing));
    }

    if named.is_empty() {
        return Ok(current.clone());
    }

    let placed: HashSet<&str> = named.iter().copied().collect();
    let mut order = Vec::with_capacity(current.len());

    for ssid in &named {
        if let Some(network) = current.get(ssid) {
            order.push(network.clone());
        }
    }

    order.extend(
        current
            .networks()
            .iter()
            .filter(|n| !placed.contains(n.ssid.as_str()))
            .cloned(),
    );

    Ok(PreferredNetworkList::new(current.interface().clone(), order))
}

/// Named SSIDs that are not configured in `current`, without repeats.
pub fn missing_ssids(current: &PreferredNetworkList, named: &[&str]) -> Vec<String> {
    dedup(named.to_vec())
        .into_iter()
        .filter(|ssid| !current.contains(ssid))
        .map(String::from)
        .collect()
}

fn dedup(names: Vec<&str>) -> Vec<&str> {
    let mut seen = HashSet::new();
    names.into_iter().filter(|n| seen.insert(*n)).collect()
}
