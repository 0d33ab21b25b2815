//! Running docker on the host

use async_trait::async_trait;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command as TokioCommand;
use tracing::debug;

/// Program used for every compose invocation
pub const DEFAULT_PROGRAM: &str = "docker";

/// Command executor errors
#[derive(Debug, Error)]
pub enum CommandExecutorError {
    /// The command ran and exited unsuccessfully
    #[error("'{command}' failed with exit code {}{}", exit_code_text(.exit_code), stderr_suffix(.stderr))]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Exit code, `None` when killed by a signal
        exit_code: Option<i32>,
        /// Captured stderr, empty for interactive runs
        stderr: String,
    },

    /// The program could not be started
    #[error("Process spawn failed for '{command}': {source}")]
    SpawnFailed {
        /// Rendered command line
        command: String,
        /// Spawn error
        #[source]
        source: std::io::Error,
    },
}

fn exit_code_text(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => code.to_string(),
        None => "unknown (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Render a command line for logs and error messages
pub fn render_command(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Runs container-engine commands on behalf of the compose gateway.
#[async_trait]
pub trait ComposeExecutor: Send + Sync {
    /// Program name used when rendering commands (e.g. `docker`)
    fn program(&self) -> &str;

    /// Run with stdin/stdout/stderr connected to the terminal
    async fn run(&self, args: &[String]) -> Result<(), CommandExecutorError>;

    /// Run without a terminal and return captured stdout
    async fn run_captured(&self, args: &[String]) -> Result<Vec<u8>, CommandExecutorError>;
}

/// Executes commands on the host with `tokio::process`
#[derive(Debug, Clone)]
pub struct DockerCommandExecutor {
    program: String,
}

impl Default for DockerCommandExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl DockerCommandExecutor {
    /// Create an executor for the given program
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl ComposeExecutor for DockerCommandExecutor {
    fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, args: &[String]) -> Result<(), CommandExecutorError> {
        let command = render_command(&self.program, args);
        debug!("Executing: {}", command);

        let status = TokioCommand::new(&self.program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| CommandExecutorError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(CommandExecutorError::CommandFailed {
                command,
                exit_code: status.code(),
                stderr: String::new(),
            });
        }

        Ok(())
    }

    async fn run_captured(&self, args: &[String]) -> Result<Vec<u8>, CommandExecutorError> {
        let command = render_command(&self.program, args);
        debug!("Querying: {}", command);

        let output = TokioCommand::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| CommandExecutorError::SpawnFailed {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CommandExecutorError::CommandFailed {
                command,
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(output.stdout)
    }
}
