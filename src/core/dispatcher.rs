use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::settings::WorkerSpec;
use crate::models::history::{CleanupStats, DiskUsage, PersistedHistory};
use crate::models::scan::{CleanupResult, ScanResult};

use super::invoker::{WorkerError, WorkerInvoker};

/// Worker acknowledgement for mutating store operations.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
}

/// The closed table of operations the worker supports. Mutating intents
/// (scan, cleanup) propagate worker failures; informational intents resolve
/// to a documented fallback so a broken store degrades the experience
/// instead of blocking it.
pub struct Dispatcher {
    invoker: WorkerInvoker,
}

impl Dispatcher {
    pub fn new(spec: WorkerSpec) -> Self {
        Self {
            invoker: WorkerInvoker::new(spec),
        }
    }

    pub async fn run_scan(&self, quick: bool) -> Result<ScanResult, WorkerError> {
        let mut args = string_args(&["--scan", "--output", "json"]);
        if quick {
            args.push("--quick".to_string());
        }
        let value = self.invoker.invoke(&args).await?;
        decode(value)
    }

    pub async fn execute_cleanup(&self, paths: &[String]) -> Result<CleanupResult, WorkerError> {
        let args = vec![
            "--clean".to_string(),
            "--items".to_string(),
            serde_json::json!(paths).to_string(),
            "--output".to_string(),
            "json".to_string(),
        ];
        let value = self.invoker.invoke(&args).await?;
        decode(value)
    }

    pub async fn disk_usage(&self) -> DiskUsage {
        self.fetch_or(&["--disk-usage", "--output", "json"], DiskUsage::default())
            .await
    }

    pub async fn history(&self) -> PersistedHistory {
        self.fetch_or(&["--history", "--output", "json"], PersistedHistory::default())
            .await
    }

    pub async fn stats(&self) -> CleanupStats {
        self.fetch_or(&["--stats", "--output", "json"], CleanupStats::default())
            .await
    }

    pub async fn preferences(&self) -> Map<String, Value> {
        self.fetch_or(&["--get-prefs", "--output", "json"], Map::new())
            .await
    }

    pub async fn set_preference(&self, key: &str, value: &Value) -> Ack {
        // Booleans travel bare; anything else as its JSON encoding, which is
        // what the worker's value parser expects.
        let encoded = match value {
            Value::Bool(flag) => flag.to_string(),
            other => other.to_string(),
        };
        let args = vec![
            "--set-pref".to_string(),
            key.to_string(),
            encoded,
            "--output".to_string(),
            "json".to_string(),
        ];
        self.ack_or_failure(&args).await
    }

    pub async fn exclusions(&self) -> Vec<String> {
        #[derive(Default, Deserialize)]
        struct ExclusionList {
            #[serde(default)]
            exclusions: Vec<String>,
        }
        let list: ExclusionList = self
            .fetch_or(&["--get-exclusions", "--output", "json"], ExclusionList::default())
            .await;
        list.exclusions
    }

    pub async fn add_exclusion(&self, path: &str) -> Ack {
        let args = string_args(&["--add-exclusion", path, "--output", "json"]);
        self.ack_or_failure(&args).await
    }

    pub async fn remove_exclusion(&self, path: &str) -> Ack {
        let args = string_args(&["--remove-exclusion", path, "--output", "json"]);
        self.ack_or_failure(&args).await
    }

    /// Informational call: any failure resolves to `fallback`.
    async fn fetch_or<T: DeserializeOwned>(&self, args: &[&str], fallback: T) -> T {
        match self.invoker.invoke(&string_args(args)).await {
            Ok(value) => serde_json::from_value(value).unwrap_or_else(|error| {
                tracing::warn!(%error, ?args, "worker reply had unexpected shape, using fallback");
                fallback
            }),
            Err(error) => {
                tracing::warn!(%error, ?args, "worker call failed, using fallback");
                fallback
            }
        }
    }

    /// Store mutation: any failure resolves to an unsuccessful ack, which
    /// the caller turns into a rollback.
    async fn ack_or_failure(&self, args: &[String]) -> Ack {
        match self.invoker.invoke(args).await {
            Ok(value) => serde_json::from_value(value).unwrap_or_default(),
            Err(error) => {
                tracing::warn!(%error, "worker rejected store mutation");
                Ack { success: false }
            }
        }
    }
}

fn string_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| (*arg).to_string()).collect()
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, WorkerError> {
    let raw = value.to_string();
    serde_json::from_value(value).map_err(|_| WorkerError::Parse { raw })
}
