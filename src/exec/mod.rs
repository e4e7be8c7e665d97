//! External action execution
//!
//! Actions are opaque shell commands. Only the exit status matters; output is
//! left attached to the parent's stdio.

use std::process::Command;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to spawn command: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("command exited with status {0}")]
    Failed(String),
}

/// Runs a threshold's action and reports success or failure.
///
/// Abstracted behind a trait so the monitor can be tested without spawning
/// real processes.
pub trait ActionRunner: Send + Sync {
    fn run(&self, command: &str) -> Result<(), ExecError>;
}

/// Runs actions through `sh -c`, synchronously.
pub struct ShellRunner;

impl ActionRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<(), ExecError> {
        let status = Command::new("sh").arg("-c").arg(command).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(ExecError::Failed(status.to_string()))
        }
    }
}
