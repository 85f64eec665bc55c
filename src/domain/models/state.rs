//! Persisted sync state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Map of alert key to last-observed alert state (`true` = open).
///
/// Loaded at the start of a sync pass, mutated per processed alert, written
/// back at the end. Comparing the persisted state with the live alert state
/// decides which side is authoritative for each alert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncState {
    entries: BTreeMap<String, bool>,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, alert_key: &str) -> Option<bool> {
        self.entries.get(alert_key).copied()
    }

    pub fn set(&mut self, alert_key: String, open: bool) {
        self.entries.insert(alert_key, open);
    }

    pub fn remove(&mut self, alert_key: &str) {
        self.entries.remove(alert_key);
    }

    /// Drop entries for alerts that no longer exist on either side.
    pub fn retain_keys<F>(&mut self, mut known: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.entries.retain(|k, _| known(k));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
