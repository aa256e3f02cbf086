use std::path::PathBuf;

use serde_json::{Map, Value};

pub const QUICK_SCAN_BY_DEFAULT: &str = "quickScanByDefault";
pub const AUTO_SELECT_LOW_RISK: &str = "autoSelectLowRisk";
pub const CONFIRM_BEFORE_DELETE: &str = "confirmBeforeDelete";
pub const ENABLE_NOTIFICATIONS: &str = "enableNotifications";
pub const DARK_MODE: &str = "darkMode";
pub const SCAN_ON_STARTUP: &str = "scanOnStartup";
pub const KEEP_LOGS: &str = "keepLogs";

const DEFAULTS: &[(&str, bool)] = &[
    (QUICK_SCAN_BY_DEFAULT, true),
    (AUTO_SELECT_LOW_RISK, true),
    (CONFIRM_BEFORE_DELETE, true),
    (ENABLE_NOTIFICATIONS, true),
    (DARK_MODE, false),
    (SCAN_ON_STARTUP, false),
    (KEEP_LOGS, true),
];

/// User preferences: an open key/value mapping with a fixed set of
/// recognized keys. Loaded once at startup; each write is optimistic and
/// reverted if the worker rejects it.
#[derive(Debug, Clone)]
pub struct Preferences {
    values: Map<String, Value>,
}

impl Default for Preferences {
    fn default() -> Self {
        let mut values = Map::new();
        for (key, value) in DEFAULTS {
            values.insert((*key).to_string(), Value::Bool(*value));
        }
        Self { values }
    }
}

impl Preferences {
    /// Overlay values loaded from the worker. Unrecognized keys are kept so
    /// the store can round-trip settings this build does not know about.
    pub fn merge(&mut self, loaded: Map<String, Value>) {
        for (key, value) in loaded {
            self.values.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Boolean view of a preference, falling back to the recognized default
    /// (or false) when the stored value is missing or not a boolean.
    pub fn bool(&self, key: &str) -> bool {
        match self.values.get(key).and_then(Value::as_bool) {
            Some(value) => value,
            None => DEFAULTS
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, default)| *default)
                .unwrap_or(false),
        }
    }

    /// Apply a tentative write, returning the previous value for rollback.
    pub fn set(&mut self, key: &str, value: Value) -> Option<Value> {
        self.values.insert(key.to_string(), value)
    }

    /// Undo a tentative write made by [`Preferences::set`].
    pub fn restore(&mut self, key: &str, previous: Option<Value>) {
        match previous {
            Some(value) => {
                self.values.insert(key.to_string(), value);
            }
            None => {
                self.values.remove(key);
            }
        }
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    Packaged,
    Development,
}

/// How to launch the cleanup engine. A packaged build runs the bundled
/// native binary; a development build runs an interpreter against the engine
/// script. The dispatcher never sees the difference.
#[derive(Debug, Clone)]
pub enum WorkerSpec {
    Packaged { binary: PathBuf },
    Development { interpreter: PathBuf, script: PathBuf },
}

impl WorkerSpec {
    pub fn deployment(&self) -> Deployment {
        match self {
            WorkerSpec::Packaged { .. } => Deployment::Packaged,
            WorkerSpec::Development { .. } => Deployment::Development,
        }
    }
}
