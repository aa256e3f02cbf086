use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateInfo {
    pub version: String,
    #[serde(rename = "releaseNotes", default)]
    pub release_notes: Option<String>,
}

/// Download progress as reported by the update collaborator. Observational
/// only; nothing here is computed locally.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgress {
    pub percent: f64,
    pub bytes_per_second: u64,
    pub transferred: u64,
    pub total: u64,
}

#[derive(Debug, Clone)]
pub struct UpdateCheck {
    pub available: bool,
    pub message: Option<String>,
}
