use thiserror::Error;

use crate::core::invoker::WorkerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupPhase {
    Idle,
    /// UI-only gate, entered only when `confirmBeforeDelete` is set.
    Confirming,
    Cleaning,
    Done,
    Error,
}

#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("no scan result to clean against")]
    NoScanResult,
    #[error("nothing is selected")]
    EmptySelection,
    #[error("selection no longer matches the scan result")]
    StaleSelection,
    #[error("cleanup is not awaiting confirmation")]
    NotConfirming,
    #[error("a cleanup is already running")]
    AlreadyRunning,
    #[error(transparent)]
    Worker(#[from] WorkerError),
}

/// Whether a requested cleanup started immediately or is parked behind the
/// confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupGate {
    NeedsConfirmation,
    Started,
}

#[derive(Debug)]
pub struct CleanupMachine {
    phase: CleanupPhase,
    error: Option<String>,
}

impl Default for CleanupMachine {
    fn default() -> Self {
        Self {
            phase: CleanupPhase::Idle,
            error: None,
        }
    }
}

impl CleanupMachine {
    pub fn phase(&self) -> CleanupPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn reset(&mut self) {
        self.phase = CleanupPhase::Idle;
        self.error = None;
    }

    pub fn request_confirmation(&mut self) {
        self.phase = CleanupPhase::Confirming;
    }

    pub fn start(&mut self) {
        self.phase = CleanupPhase::Cleaning;
        self.error = None;
    }

    pub fn finish(&mut self) {
        self.phase = CleanupPhase::Done;
    }

    pub fn fail(&mut self, message: &str) {
        self.phase = CleanupPhase::Error;
        self.error = Some(message.to_string());
    }
}
