use std::collections::BTreeSet;

use crate::config::settings::{Preferences, AUTO_SELECT_LOW_RISK};
use crate::models::scan::{RiskLevel, ScanResult};

/// Selection applied right after a scan completes: low-risk, safe-to-delete
/// items when the preference allows it, otherwise nothing.
pub fn initial_selection(result: &ScanResult, preferences: &Preferences) -> BTreeSet<String> {
    if !preferences.bool(AUTO_SELECT_LOW_RISK) {
        return BTreeSet::new();
    }
    result
        .items
        .iter()
        .filter(|item| item.safe_to_delete && item.risk_level == RiskLevel::Low)
        .map(|item| item.path.clone())
        .collect()
}

/// Manual "select all": every safe-to-delete item regardless of risk level.
/// Deliberately broader than the automatic policy.
pub fn select_all(result: &ScanResult) -> BTreeSet<String> {
    result
        .items
        .iter()
        .filter(|item| item.safe_to_delete)
        .map(|item| item.path.clone())
        .collect()
}

/// Paths queued for cleanup; always a subset of the current scan result's
/// item keys. Unsafe items can only enter through an explicit toggle.
#[derive(Debug, Clone, Default)]
pub struct SelectedItems {
    paths: BTreeSet<String>,
}

impl SelectedItems {
    pub fn replace(&mut self, paths: BTreeSet<String>) {
        self.paths = paths;
    }

    /// Toggling twice restores the prior membership.
    pub fn toggle(&mut self, path: &str) {
        if !self.paths.remove(path) {
            self.paths.insert(path.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &BTreeSet<String> {
        &self.paths
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.paths.iter().cloned().collect()
    }
}
