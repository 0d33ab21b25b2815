//! In-memory executor for tests
//!
//! Shipped in the library so integration tests and embedders can drive the
//! orchestrator without docker; not part of the documented API.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::command_executor::{
    render_command, CommandExecutorError, ComposeExecutor, DEFAULT_PROGRAM,
};

/// A recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// Interactive passthrough run
    Run(Vec<String>),
    /// Captured-output run
    Captured(Vec<String>),
}

#[derive(Debug, Default)]
struct RecordingState {
    calls: Vec<RecordedCall>,
    captured_output: Vec<u8>,
    fail_run_on: Option<String>,
    fail_captured: bool,
}

/// Records every call instead of spawning processes.
///
/// `run` succeeds unless the rendered command contains the configured
/// failure marker; `run_captured` returns the configured output.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingExecutor {
    /// Create an executor with no canned output
    pub fn new() -> Self {
        Self::default()
    }

    /// Output returned by every captured run
    pub fn with_captured_output(self, output: impl Into<Vec<u8>>) -> Self {
        self.lock().captured_output = output.into();
        self
    }

    /// Make `run` fail whenever the rendered command contains `marker`
    pub fn failing_run_on(self, marker: impl Into<String>) -> Self {
        self.lock().fail_run_on = Some(marker.into());
        self
    }

    /// Make every captured run fail
    pub fn failing_captured(self) -> Self {
        self.lock().fail_captured = true;
        self
    }

    /// All recorded calls in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Interactive runs only, rendered as `docker ...` strings
    pub fn run_commands(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Run(args) => Some(render_command(DEFAULT_PROGRAM, args)),
                RecordedCall::Captured(_) => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RecordingState> {
        // a poisoned lock only means another test thread panicked
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl ComposeExecutor for RecordingExecutor {
    fn program(&self) -> &str {
        DEFAULT_PROGRAM
    }

    async fn run(&self, args: &[String]) -> Result<(), CommandExecutorError> {
        let command = render_command(DEFAULT_PROGRAM, args);
        let mut state = self.lock();
        state.calls.push(RecordedCall::Run(args.to_vec()));

        match &state.fail_run_on {
            Some(marker) if command.contains(marker.as_str()) => {
                Err(CommandExecutorError::CommandFailed {
                    command,
                    exit_code: Some(1),
                    stderr: String::new(),
                })
            }
            _ => Ok(()),
        }
    }

    async fn run_captured(&self, args: &[String]) -> Result<Vec<u8>, CommandExecutorError> {
        let command = render_command(DEFAULT_PROGRAM, args);
        let mut state = self.lock();
        state.calls.push(RecordedCall::Captured(args.to_vec()));

        if state.fail_captured {
            return Err(CommandExecutorError::CommandFailed {
                command,
                exit_code: Some(1),
                stderr: "Cannot connect to the Docker daemon".to_string(),
            });
        }

        Ok(state.captured_output.clone())
    }
}
