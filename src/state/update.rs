use crate::core::events::UpdateEvent;
use crate::models::update::{UpdateInfo, UpdateProgress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePhase {
    Idle,
    Checking,
    Available,
    Downloading,
    Ready,
    Error,
}

/// The update-distribution collaborator. `check` begins a check whose answer
/// arrives later as pushed events; `quit_and_install` is fire-and-forget and
/// is expected to terminate and restart the host process.
pub trait UpdateSource: Send {
    fn check(&mut self);
    fn quit_and_install(&mut self);
}

/// Update lifecycle, driven exclusively by events pushed from the
/// collaborator. One event causes at most one transition.
#[derive(Debug)]
pub struct UpdateMachine {
    phase: UpdatePhase,
    info: Option<UpdateInfo>,
    progress: Option<UpdateProgress>,
    error: Option<String>,
}

impl Default for UpdateMachine {
    fn default() -> Self {
        Self {
            phase: UpdatePhase::Idle,
            info: None,
            progress: None,
            error: None,
        }
    }
}

impl UpdateMachine {
    pub fn phase(&self) -> UpdatePhase {
        self.phase
    }

    pub fn info(&self) -> Option<&UpdateInfo> {
        self.info.as_ref()
    }

    pub fn progress(&self) -> Option<&UpdateProgress> {
        self.progress.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// An update is known and either announced, downloading, or downloaded.
    pub fn update_known(&self) -> bool {
        matches!(
            self.phase,
            UpdatePhase::Available | UpdatePhase::Downloading | UpdatePhase::Ready
        )
    }

    /// Install may only be triggered once a download is ready.
    pub fn install_ready(&self) -> bool {
        self.phase == UpdatePhase::Ready
    }

    pub fn apply(&mut self, event: &UpdateEvent) {
        match event {
            UpdateEvent::Checking => {
                self.phase = UpdatePhase::Checking;
                self.error = None;
            }
            UpdateEvent::Available(info) => {
                self.phase = UpdatePhase::Available;
                self.info = Some(info.clone());
            }
            UpdateEvent::NotAvailable => {
                self.phase = UpdatePhase::Idle;
                self.info = None;
                self.progress = None;
            }
            UpdateEvent::Progress(progress) => {
                self.phase = UpdatePhase::Downloading;
                self.progress = Some(*progress);
            }
            UpdateEvent::Downloaded { version } => {
                self.phase = UpdatePhase::Ready;
                self.info = Some(UpdateInfo {
                    version: version.clone(),
                    release_notes: self.info.take().and_then(|info| info.release_notes),
                });
            }
            UpdateEvent::Error(message) => {
                self.phase = UpdatePhase::Error;
                self.error = Some(message.clone());
            }
        }
    }
}
