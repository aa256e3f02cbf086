use serde_json::Value;

use crate::config::settings::{Deployment, WorkerSpec, QUICK_SCAN_BY_DEFAULT};
use crate::core::dispatcher::Dispatcher;
use crate::core::events::{Subscription, UpdateBus, UpdateEvent, UpdateEventReceiver};
use crate::core::invoker::WorkerError;
use crate::models::history::{DiskUsage, HistoryView};
use crate::models::update::UpdateCheck;
use crate::state::cleanup::{CleanupError, CleanupGate};
use crate::state::history::{combined_totals, merged_cleanups};
use crate::state::update::UpdateSource;
use crate::state::AppState;

/// The control plane: owns the dispatcher, the application state, and the
/// update event fan-out. Every intent the presentation layer can express
/// enters through a method here; only one transition runs at a time.
pub struct App {
    dispatcher: Dispatcher,
    state: AppState,
    bus: UpdateBus,
    deployment: Deployment,
    updater: Option<Box<dyn UpdateSource>>,
}

impl App {
    pub fn new(spec: WorkerSpec) -> Self {
        Self {
            deployment: spec.deployment(),
            dispatcher: Dispatcher::new(spec),
            state: AppState::new(),
            bus: UpdateBus::new(),
            updater: None,
        }
    }

    /// Attach the update-distribution collaborator. Without one, update
    /// checks report unavailable.
    pub fn with_updater(mut self, updater: Box<dyn UpdateSource>) -> Self {
        self.updater = Some(updater);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Startup load: preferences and exclusions, once. Failures fall back to
    /// defaults/empty and never block startup.
    pub async fn initialize(&mut self) {
        let loaded = self.dispatcher.preferences().await;
        self.state.preferences.merge(loaded);
        let exclusions = self.dispatcher.exclusions().await;
        self.state.exclusions.load(exclusions);
    }

    // ---- scan ----

    /// Run a scan using the `quickScanByDefault` preference.
    pub async fn run_scan(&mut self) -> Result<(), WorkerError> {
        let quick = self.state.preferences.bool(QUICK_SCAN_BY_DEFAULT);
        self.run_scan_with(quick).await
    }

    pub async fn run_scan_with(&mut self, quick: bool) -> Result<(), WorkerError> {
        let token = self.state.start_scan();
        match self.dispatcher.run_scan(quick).await {
            Ok(result) => {
                if self.state.complete_scan(token, result) {
                    tracing::info!("scan complete");
                } else {
                    // Cancelled or superseded while the worker ran; the late
                    // result is discarded rather than merged.
                    tracing::debug!("discarding stale scan result");
                }
                Ok(())
            }
            Err(error) => {
                if self.state.fail_scan(token, &error.to_string()) {
                    tracing::error!(%error, "scan failed");
                }
                Err(error)
            }
        }
    }

    /// Detach the state machine from the pending invocation. The worker
    /// process, once started, is left to finish on its own.
    pub fn cancel_scan(&mut self) {
        self.state.cancel_scan();
    }

    // ---- cleanup ----

    /// Ask to clean the current selection. Either starts immediately (and
    /// completes before returning) or reports that the confirmation gate is
    /// waiting for [`App::confirm_cleanup`].
    pub async fn request_cleanup(&mut self) -> Result<CleanupGate, CleanupError> {
        match self.state.begin_cleanup()? {
            CleanupGate::NeedsConfirmation => Ok(CleanupGate::NeedsConfirmation),
            CleanupGate::Started => {
                self.perform_cleanup().await?;
                Ok(CleanupGate::Started)
            }
        }
    }

    pub async fn confirm_cleanup(&mut self) -> Result<(), CleanupError> {
        self.state.confirm_cleanup()?;
        self.perform_cleanup().await
    }

    pub fn dismiss_cleanup(&mut self) {
        self.state.dismiss_cleanup();
    }

    async fn perform_cleanup(&mut self) -> Result<(), CleanupError> {
        let paths = self.state.selected.to_vec();
        match self.dispatcher.execute_cleanup(&paths).await {
            Ok(result) => {
                tracing::info!(freed_bytes = result.freed_bytes, "cleanup finished");
                self.state.complete_cleanup(result);
                Ok(())
            }
            Err(error) => {
                tracing::error!(%error, "cleanup failed");
                self.state.fail_cleanup(&error.to_string());
                Err(CleanupError::Worker(error))
            }
        }
    }

    // ---- preferences & exclusions ----

    /// Optimistic write: the local value changes immediately and reverts if
    /// the worker rejects the write. Returns whether the write stuck.
    pub async fn set_preference(&mut self, key: &str, value: Value) -> bool {
        let previous = self.state.preferences.set(key, value.clone());
        let ack = self.dispatcher.set_preference(key, &value).await;
        if !ack.success {
            self.state.preferences.restore(key, previous);
            tracing::warn!(key, "preference write rejected, reverted");
            return false;
        }
        true
    }

    /// Optimistic add with client-side uniqueness. Returns whether the
    /// exclusion is present afterwards because of this call.
    pub async fn add_exclusion(&mut self, path: &str) -> bool {
        if !self.state.exclusions.add(path) {
            return false;
        }
        let ack = self.dispatcher.add_exclusion(path).await;
        if !ack.success {
            self.state.exclusions.remove(path);
            tracing::warn!(path, "exclusion add rejected, reverted");
            return false;
        }
        true
    }

    pub async fn remove_exclusion(&mut self, path: &str) -> bool {
        if !self.state.exclusions.remove(path) {
            return false;
        }
        let ack = self.dispatcher.remove_exclusion(path).await;
        if !ack.success {
            self.state.exclusions.add(path);
            tracing::warn!(path, "exclusion removal rejected, reverted");
            return false;
        }
        true
    }

    // ---- informational ----

    pub async fn disk_usage(&self) -> DiskUsage {
        self.dispatcher.disk_usage().await
    }

    /// Fetch persisted history and stats, then merge in the session's own
    /// cleanups for one display-ordered view.
    pub async fn history_view(&self) -> HistoryView {
        let persisted = self.dispatcher.history().await;
        let stats = self.dispatcher.stats().await;
        let cleanups = merged_cleanups(self.state.session_history.entries(), &persisted.cleanups);
        let (total_bytes_freed, total_items_cleaned) =
            combined_totals(&stats, &self.state.session_history);
        HistoryView {
            scans: persisted.scans,
            cleanups,
            total_scans: stats.total_scans,
            total_cleanups: stats.total_cleanups,
            total_bytes_freed,
            total_items_cleaned,
        }
    }

    // ---- updates ----

    pub fn subscribe_updates(&mut self) -> (Subscription, UpdateEventReceiver) {
        self.bus.subscribe()
    }

    pub fn unsubscribe_updates(&mut self, subscription: Subscription) {
        self.bus.unsubscribe(subscription);
    }

    /// Entry point for events pushed by the update collaborator: one
    /// machine transition, then fan-out to subscribers.
    pub fn handle_update_event(&mut self, event: UpdateEvent) {
        self.state.apply_update_event(&event);
        self.bus.publish(&event);
    }

    /// In a development deployment this is a deliberate no-op that reports
    /// unavailable without contacting any collaborator.
    pub fn check_for_updates(&mut self) -> UpdateCheck {
        if self.deployment == Deployment::Development {
            return UpdateCheck {
                available: false,
                message: Some("Updates disabled in development mode".to_string()),
            };
        }
        match self.updater.as_mut() {
            Some(updater) => {
                updater.check();
                UpdateCheck {
                    available: self.state.update.update_known(),
                    message: None,
                }
            }
            None => UpdateCheck {
                available: false,
                message: Some("No update channel configured".to_string()),
            },
        }
    }

    /// Fire-and-forget install; only valid once a download is ready. The
    /// collaborator is expected to terminate and restart the process.
    pub fn install_update(&mut self) -> bool {
        if !self.state.update.install_ready() {
            return false;
        }
        match self.updater.as_mut() {
            Some(updater) => {
                updater.quit_and_install();
                true
            }
            None => false,
        }
    }
}
