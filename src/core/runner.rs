use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{ChangesError, Result};
use super::pipeline::Step;

/// How a finished step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepStatus {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl StepStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes pipeline steps; swapped for a recorder in tests
#[async_trait::async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a step to completion
    async fn run(&self, step: &Step) -> Result<StepStatus>;
}

/// Spawns real processes inside a working directory
pub struct SystemRunner {
    work_dir: PathBuf,
}

impl SystemRunner {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }
}

#[async_trait::async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, step: &Step) -> Result<StepStatus> {
        debug!("Running: {}", step);

        let mut command = Command::new(&step.program);
        command
            .args(&step.args)
            .current_dir(&self.work_dir)
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit());

        match &step.stdout {
            Some(path) => {
                let file = std::fs::File::create(self.work_dir.join(path))?;
                command.stdout(Stdio::from(file));
            }
            None => {
                command.stdout(Stdio::inherit());
            }
        }

        let status = command
            .status()
            .await
            .map_err(|source| ChangesError::Spawn {
                program: step.program.clone(),
                source,
            })?;

        Ok(StepStatus {
            code: status.code(),
        })
    }
}
