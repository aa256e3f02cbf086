use chrono::{DateTime, NaiveDateTime, Utc};

use crate::models::history::{CleanupRecord, CleanupStats, HistoryEntry};

pub const MAX_SESSION_ENTRIES: usize = 50;

/// Cleanups performed this session, newest first, bounded to
/// [`MAX_SESSION_ENTRIES`]. Never written back to the persisted store.
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_SESSION_ENTRIES);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn total_space_freed(&self) -> u64 {
        self.entries.iter().map(|entry| entry.space_freed).sum()
    }

    pub fn total_items_cleaned(&self) -> u64 {
        self.entries.iter().map(|entry| entry.items_cleaned).sum()
    }
}

/// One display-ordered cleanup list: session entries (as records with
/// synthetic negative ids) plus persisted records, newest first. The sort is
/// stable, so equal timestamps keep their input order.
pub fn merged_cleanups(session: &[HistoryEntry], persisted: &[CleanupRecord]) -> Vec<CleanupRecord> {
    let mut merged: Vec<CleanupRecord> = session
        .iter()
        .enumerate()
        .map(|(index, entry)| CleanupRecord {
            id: -(index as i64) - 1,
            scan_id: None,
            timestamp: entry.timestamp.to_rfc3339(),
            items_deleted: entry.items_cleaned,
            items_failed: 0,
            bytes_freed: entry.space_freed,
        })
        .chain(persisted.iter().cloned())
        .collect();
    merged.sort_by_key(|record| std::cmp::Reverse(parse_timestamp(&record.timestamp)));
    merged
}

/// Aggregate totals for display: the persisted store's counters plus the
/// session entries it has not seen yet.
pub fn combined_totals(stats: &CleanupStats, session: &SessionHistory) -> (u64, u64) {
    (
        stats.total_bytes_freed + session.total_space_freed(),
        stats.total_items_cleaned + session.total_items_cleaned(),
    )
}

/// Persisted rows carry either RFC 3339 or the store's naive
/// `YYYY-MM-DD HH:MM:SS` form. Unparsable strings sort last.
fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|naive| naive.and_utc())
        })
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
