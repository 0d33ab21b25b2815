use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::common::error::ComposectlError;
use crate::common::result::ComposectlResult;
use crate::domain::entities::configuration::{Config, StackConfig};
use crate::domain::entities::stack::{Stack, StackStatus};
use crate::infrastructure::process::command_executor::{render_command, ComposeExecutor};

/// One record of `docker compose ls --all --format json`
#[derive(Debug, Deserialize)]
struct ProjectRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Status", default)]
    status: String,
}

/// Translates stack operations into `docker compose` invocations.
///
/// Holds the global configuration; per-stack overrides are merged on every
/// call. In dry-run mode mutating operations are only logged and queries
/// report nothing, so the executor is never reached.
pub struct ComposeClient {
    executor: Arc<dyn ComposeExecutor>,
    config: Config,
    dry_run: bool,
}

impl ComposeClient {
    /// Create a new compose client
    pub fn new(executor: Arc<dyn ComposeExecutor>, config: Config, dry_run: bool) -> Self {
        Self {
            executor,
            config,
            dry_run,
        }
    }

    /// Create and start every resource of the stack (`up`)
    pub async fn up(&self, stack: &Stack, stack_config: &StackConfig) -> ComposectlResult<()> {
        let config = self.config.merge(stack_config);
        let mut args = self.build_args(stack, &config, "up");
        args.extend(config.up_args.iter().cloned());
        self.run(stack, "up", args).await
    }

    /// Resume previously created containers (`start`)
    pub async fn start_existing(
        &self,
        stack: &Stack,
        stack_config: &StackConfig,
    ) -> ComposectlResult<()> {
        let config = self.config.merge(stack_config);
        let args = self.build_args(stack, &config, "start");
        self.run(stack, "start", args).await
    }

    /// Stop the stack; the timeout always comes from the global config
    pub async fn stop(&self, stack: &Stack, stack_config: &StackConfig) -> ComposectlResult<()> {
        let config = self.config.merge(stack_config);
        let mut args = self.build_args(stack, &config, "stop");
        args.push("--timeout".to_string());
        args.push(self.config.timeout.to_string());
        self.run(stack, "stop", args).await
    }

    /// Remove the stack's resources (`down`)
    pub async fn down(&self, stack: &Stack, stack_config: &StackConfig) -> ComposectlResult<()> {
        let config = self.config.merge(stack_config);
        let mut args = self.build_args(stack, &config, "down");
        args.extend(config.down_args.iter().cloned());
        self.run(stack, "down", args).await
    }

    /// Whether the engine knows any container (running or not) for the stack.
    ///
    /// Best effort: any failure is logged at debug level and reported as `false`.
    pub async fn has_containers(&self, stack: &Stack) -> bool {
        if self.dry_run {
            return false;
        }

        let args = vec![
            "compose".to_string(),
            "--project-directory".to_string(),
            stack.directory.to_string_lossy().into_owned(),
            "--project-name".to_string(),
            stack.name.clone(),
            "ps".to_string(),
            "-a".to_string(),
            "-q".to_string(),
        ];

        match self.executor.run_captured(&args).await {
            Ok(output) => !String::from_utf8_lossy(&output).trim().is_empty(),
            Err(e) => {
                debug!("Failed to check containers for stack {}: {}", stack.name, e);
                false
            }
        }
    }

    /// Status of every compose project known to the engine, keyed by project name.
    ///
    /// Any failure yields an empty map.
    pub async fn list_all_statuses(&self) -> HashMap<String, StackStatus> {
        if self.dry_run {
            return HashMap::new();
        }

        let args = strings(&["compose", "ls", "--all", "--format", "json"]);
        let output = match self.executor.run_captured(&args).await {
            Ok(output) => output,
            Err(e) => {
                debug!("Failed to get compose statuses: {}", e);
                return HashMap::new();
            }
        };

        match parse_project_statuses(&output) {
            Ok(statuses) => statuses,
            Err(e) => {
                debug!("Failed to parse compose statuses: {}", e);
                HashMap::new()
            }
        }
    }

    fn build_args(&self, stack: &Stack, config: &Config, verb: &str) -> Vec<String> {
        let mut args = vec!["compose".to_string()];
        args.extend(config.common_args.iter().cloned());
        args.push("--project-directory".to_string());
        args.push(stack.directory.to_string_lossy().into_owned());
        args.push("--project-name".to_string());
        args.push(stack.name.clone());
        args.push(verb.to_string());
        args
    }

    async fn run(&self, stack: &Stack, verb: &str, args: Vec<String>) -> ComposectlResult<()> {
        if self.dry_run {
            info!(
                "[DRY-RUN] Would execute: {}",
                render_command(self.executor.program(), &args)
            );
            return Ok(());
        }

        self.executor.run(&args).await.map_err(|e| {
            ComposectlError::external_command_error_with_source(
                format!("docker compose {} failed", verb),
                stack.name.clone(),
                e,
            )
        })
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn parse_project_statuses(
    output: &[u8],
) -> Result<HashMap<String, StackStatus>, serde_json::Error> {
    let trimmed = String::from_utf8_lossy(output);
    let trimmed = trimmed.trim();
    if trimmed.is_empty() {
        return Ok(HashMap::new());
    }

    let records: Vec<ProjectRecord> = serde_json::from_str(trimmed)?;
    Ok(records
        .into_iter()
        .map(|record| (record.name, StackStatus::normalize(&record.status)))
        .collect())
}
