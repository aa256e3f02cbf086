use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;

use crate::config::settings::WorkerSpec;

#[derive(Debug, Error)]
pub enum WorkerError {
    /// The worker process could not be started at all (binary missing,
    /// permission denied) or its streams could not be drained.
    #[error("could not start worker process: {0}")]
    Launch(std::io::Error),

    /// The worker exited non-zero. Carries whatever it wrote to stderr.
    #[error("worker exited with status {code:?}: {stderr}")]
    Process { code: Option<i32>, stderr: String },

    /// The worker exited cleanly but its stdout was not valid JSON (or did
    /// not match the expected shape). Carries the raw output.
    #[error("worker produced invalid output")]
    Parse { raw: String },
}

/// Launches the external cleanup engine. Exactly one process per call; no
/// pooling or reuse. The returned future always resolves, surfacing process
/// failures through the same channel as success.
pub struct WorkerInvoker {
    spec: WorkerSpec,
}

impl WorkerInvoker {
    pub fn new(spec: WorkerSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &WorkerSpec {
        &self.spec
    }

    /// Run the worker with `args`, buffer stdout until exit, and parse the
    /// buffer as a single JSON document.
    pub async fn invoke(&self, args: &[String]) -> Result<serde_json::Value, WorkerError> {
        let mut command = match &self.spec {
            WorkerSpec::Packaged { binary } => Command::new(binary),
            WorkerSpec::Development {
                interpreter,
                script,
            } => {
                let mut command = Command::new(interpreter);
                command.arg(script);
                command
            }
        };
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::debug!(?args, "spawning worker");
        let child = command.spawn().map_err(WorkerError::Launch)?;

        // Drains both pipes and reaps the child before the handle is
        // released, on every exit path.
        let output = child.wait_with_output().await.map_err(WorkerError::Launch)?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            serde_json::from_str(&stdout).map_err(|_| WorkerError::Parse {
                raw: stdout.into_owned(),
            })
        } else {
            Err(WorkerError::Process {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}
