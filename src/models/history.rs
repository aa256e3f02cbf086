use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cleanup performed during this session, not yet visible in the
/// persisted store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub items_cleaned: u64,
    pub space_freed: u64,
}

/// Scan row as persisted by the worker's database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    #[serde(default)]
    pub id: i64,
    pub timestamp: String,
    #[serde(default)]
    pub scan_type: String,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_size_bytes: u64,
    #[serde(default)]
    pub duration_seconds: f64,
    #[serde(default)]
    pub status: String,
}

/// Cleanup row as persisted by the worker's database. Session entries are
/// mapped into this shape (with synthetic negative ids) for merged display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub scan_id: Option<i64>,
    pub timestamp: String,
    #[serde(default)]
    pub items_deleted: u64,
    #[serde(default)]
    pub items_failed: u64,
    #[serde(default)]
    pub bytes_freed: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedHistory {
    #[serde(default)]
    pub scans: Vec<ScanRecord>,
    #[serde(default)]
    pub cleanups: Vec<CleanupRecord>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CleanupStats {
    #[serde(default)]
    pub total_scans: u64,
    #[serde(default)]
    pub total_cleanups: u64,
    #[serde(default)]
    pub total_bytes_freed: u64,
    #[serde(default)]
    pub total_items_cleaned: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DiskUsage {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub used: u64,
    #[serde(default)]
    pub free: u64,
}

/// What the history screen renders: persisted scans, the merged cleanup
/// list, and aggregates that already include the current session.
#[derive(Debug, Clone, Default)]
pub struct HistoryView {
    pub scans: Vec<ScanRecord>,
    pub cleanups: Vec<CleanupRecord>,
    pub total_scans: u64,
    pub total_cleanups: u64,
    pub total_bytes_freed: u64,
    pub total_items_cleaned: u64,
}
