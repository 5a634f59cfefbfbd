//! Subprocess adapters.

use std::io;
use std::process::Command;
use std::sync::{Arc, Mutex};

use tracing::{debug, instrument};

use sceleton_core::{
    application::{
        ApplicationError,
        ports::{CommandLine, CommandRunner},
    },
    error::{SceletonError, SceletonResult},
};

/// Runs programs with `std::process`, inheriting stdio and blocking until
/// they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(command = %command))]
    fn run(&self, command: &CommandLine) -> SceletonResult<()> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .status()
            .map_err(|e| spawn_error(command, e))?;

        debug!(code = ?status.code(), "Process exited");
        if status.success() {
            Ok(())
        } else {
            Err(ApplicationError::CommandFailed {
                command: command.to_string(),
                status: status.code(),
            }
            .into())
        }
    }
}

fn spawn_error(command: &CommandLine, e: io::Error) -> SceletonError {
    match e.kind() {
        io::ErrorKind::NotFound => ApplicationError::CommandNotFound {
            program: command.program.clone(),
        },
        _ => ApplicationError::FilesystemError {
            path: command.cwd.clone(),
            reason: format!("Failed to start `{}`: {}", command.program, e),
        },
    }
    .into()
}

/// Records commands instead of running them (testing).
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    inner: Arc<Mutex<RecordingInner>>,
}

#[derive(Debug, Default)]
struct RecordingInner {
    commands: Vec<CommandLine>,
    failing: Vec<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later call of `program` fail with exit code 1.
    pub fn fail_program(&self, program: impl Into<String>) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.failing.push(program.into());
        }
    }

    /// Commands received so far, in order.
    pub fn commands(&self) -> Vec<CommandLine> {
        self.inner
            .lock()
            .map(|inner| inner.commands.clone())
            .unwrap_or_default()
    }

    /// Rendered command lines received so far.
    pub fn command_lines(&self) -> Vec<String> {
        self.commands().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandLine) -> SceletonResult<()> {
        let mut inner = self.inner.lock().map_err(|_| SceletonError::Internal {
            message: "recording runner lock poisoned".into(),
        })?;
        inner.commands.push(command.clone());

        if inner.failing.contains(&command.program) {
            return Err(ApplicationError::CommandFailed {
                command: command.to_string(),
                status: Some(1),
            }
            .into());
        }
        Ok(())
    }
}
