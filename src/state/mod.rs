pub mod cleanup;
pub mod history;
pub mod scan;
pub mod selection;
pub mod update;

use chrono::Utc;

use crate::config::settings::{Preferences, CONFIRM_BEFORE_DELETE};
use crate::core::events::UpdateEvent;
use crate::models::history::HistoryEntry;
use crate::models::scan::{CleanupResult, ScanResult};

use self::cleanup::{CleanupError, CleanupGate, CleanupMachine, CleanupPhase};
use self::history::SessionHistory;
use self::scan::{ScanMachine, ScanToken};
use self::selection::SelectedItems;
use self::update::UpdateMachine;

/// Paths excluded from scanning, mirrored from the persisted store.
/// Uniqueness is enforced here, before anything reaches the worker.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    paths: Vec<String>,
}

impl ExclusionSet {
    pub fn load(&mut self, paths: Vec<String>) {
        self.paths = paths;
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|existing| existing == path)
    }

    /// Tentatively append; false when the path is already present.
    pub fn add(&mut self, path: &str) -> bool {
        if self.contains(path) {
            return false;
        }
        self.paths.push(path.to_string());
        true
    }

    /// Tentatively remove; false when the path was not present.
    pub fn remove(&mut self, path: &str) -> bool {
        let before = self.paths.len();
        self.paths.retain(|existing| existing != path);
        before != self.paths.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }
}

/// The single owned application state. All mutation happens through the
/// transition methods below; callers hold the container, not pieces of it.
#[derive(Debug, Default)]
pub struct AppState {
    pub scan: ScanMachine,
    pub cleanup: CleanupMachine,
    pub update: UpdateMachine,
    pub scan_result: Option<ScanResult>,
    pub cleanup_result: Option<CleanupResult>,
    pub selected: SelectedItems,
    pub preferences: Preferences,
    pub exclusions: ExclusionSet,
    pub session_history: SessionHistory,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- scan transitions ----

    /// Start a scan: progress resets, the previous scan and cleanup results
    /// are discarded, the selection is cleared.
    pub fn start_scan(&mut self) -> ScanToken {
        self.scan_result = None;
        self.cleanup_result = None;
        self.selected.clear();
        self.cleanup.reset();
        self.scan.start()
    }

    pub fn scan_progress(&mut self, percent: u8, status: impl Into<String>) {
        self.scan.progress(percent, status);
    }

    /// Store a finished scan and apply the automatic selection policy.
    /// Returns false (and changes nothing) when the token is stale: a
    /// cancelled or superseded scan's late result is fully discarded.
    pub fn complete_scan(&mut self, token: ScanToken, result: ScanResult) -> bool {
        if !self.scan.complete(token) {
            return false;
        }
        self.selected
            .replace(selection::initial_selection(&result, &self.preferences));
        self.scan_result = Some(result);
        true
    }

    pub fn fail_scan(&mut self, token: ScanToken, message: &str) -> bool {
        self.scan.fail(token, message)
    }

    pub fn cancel_scan(&mut self) {
        self.scan.cancel();
    }

    // ---- selection transitions ----

    /// Toggle one item in or out of the selection. Paths not present in the
    /// current scan result are ignored, keeping the subset invariant.
    pub fn toggle_item(&mut self, path: &str) {
        let known = self
            .scan_result
            .as_ref()
            .is_some_and(|result| result.contains(path));
        if known {
            self.selected.toggle(path);
        }
    }

    pub fn select_all(&mut self) {
        if let Some(result) = &self.scan_result {
            self.selected.replace(selection::select_all(result));
        }
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    // ---- cleanup transitions ----

    /// Validate preconditions and either start cleaning or park behind the
    /// confirmation gate, depending on `confirmBeforeDelete`.
    pub fn begin_cleanup(&mut self) -> Result<CleanupGate, CleanupError> {
        if self.cleanup.phase() == CleanupPhase::Cleaning {
            return Err(CleanupError::AlreadyRunning);
        }
        let result = self.scan_result.as_ref().ok_or(CleanupError::NoScanResult)?;
        if self.selected.is_empty() {
            return Err(CleanupError::EmptySelection);
        }
        if !self.selected.paths().iter().all(|path| result.contains(path)) {
            return Err(CleanupError::StaleSelection);
        }
        if self.preferences.bool(CONFIRM_BEFORE_DELETE) {
            self.cleanup.request_confirmation();
            Ok(CleanupGate::NeedsConfirmation)
        } else {
            self.cleanup.start();
            Ok(CleanupGate::Started)
        }
    }

    pub fn confirm_cleanup(&mut self) -> Result<(), CleanupError> {
        if self.cleanup.phase() != CleanupPhase::Confirming {
            return Err(CleanupError::NotConfirming);
        }
        self.cleanup.start();
        Ok(())
    }

    /// Dismiss the confirmation gate without cleaning.
    pub fn dismiss_cleanup(&mut self) {
        if self.cleanup.phase() == CleanupPhase::Confirming {
            self.cleanup.reset();
        }
    }

    /// Reconcile a worker cleanup reply. On success the selected items leave
    /// the scan result, totals shrink (the worker's freed-byte count is
    /// authoritative, floored at zero), the selection clears, and one
    /// history entry is recorded. A reply with `success == false` lands in
    /// the error phase with the selection preserved for retry.
    pub fn complete_cleanup(&mut self, result: CleanupResult) {
        if !result.success {
            self.cleanup.fail("worker reported an unsuccessful cleanup");
            self.cleanup_result = Some(result);
            return;
        }

        let selected = self.selected.paths().clone();
        let removed = match self.scan_result.as_mut() {
            Some(scan) => {
                let removed = scan.remove_paths(&selected);
                scan.total_items = scan.total_items.saturating_sub(removed);
                scan.total_size_bytes = scan.total_size_bytes.saturating_sub(result.freed_bytes);
                removed
            }
            None => 0,
        };

        self.session_history.record(HistoryEntry {
            timestamp: Utc::now(),
            items_cleaned: removed,
            space_freed: result.freed_bytes,
        });
        self.selected.clear();
        self.cleanup_result = Some(result);
        self.cleanup.finish();
    }

    /// Worker call failed: keep the selection so the user can retry, record
    /// nothing in history.
    pub fn fail_cleanup(&mut self, message: &str) {
        self.cleanup.fail(message);
    }

    // ---- update transitions ----

    pub fn apply_update_event(&mut self, event: &UpdateEvent) {
        self.update.apply(event);
    }
}
