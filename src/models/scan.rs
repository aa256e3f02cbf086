use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// One junk candidate as classified by the engine. Immutable once scanned;
/// owned exclusively by the `ScanResult` that contains it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileItem {
    pub path: String,
    pub size_bytes: u64,
    pub category: String,
    #[serde(default)]
    pub last_modified: f64,
    pub risk_level: RiskLevel,
    pub safe_to_delete: bool,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub total_items: u64,
    pub total_size_bytes: u64,
    pub items: Vec<FileItem>,
    #[serde(default)]
    pub categories: BTreeMap<String, u64>,
    #[serde(default)]
    pub scan_duration_seconds: f64,
    #[serde(default)]
    pub timestamp: String,
}

impl ScanResult {
    pub fn contains(&self, path: &str) -> bool {
        self.items.iter().any(|item| item.path == path)
    }

    pub fn item(&self, path: &str) -> Option<&FileItem> {
        self.items.iter().find(|item| item.path == path)
    }

    pub fn items_size_sum(&self) -> u64 {
        self.items.iter().map(|item| item.size_bytes).sum()
    }

    /// Holds at creation time; cleanup reconciliation may break it afterwards
    /// because the worker's reported freed bytes is authoritative.
    pub fn totals_consistent(&self) -> bool {
        self.total_size_bytes == self.items_size_sum()
    }

    /// Remove every item whose path is in `paths`, returning how many were
    /// actually removed. Totals are adjusted by the caller.
    pub fn remove_paths(&mut self, paths: &BTreeSet<String>) -> u64 {
        let before = self.items.len();
        self.items.retain(|item| !paths.contains(&item.path));
        (before - self.items.len()) as u64
    }
}

/// The engine's cleanup reply. `freed_bytes` is what the worker claims it
/// actually freed, not a recomputation from item sizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupResult {
    pub success: bool,
    #[serde(default)]
    pub freed_bytes: u64,
    #[serde(default)]
    pub items_deleted: u64,
    #[serde(default)]
    pub items_failed: u64,
    #[serde(default)]
    pub errors: Vec<String>,
}
