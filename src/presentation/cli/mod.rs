use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::exit;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::application::use_cases::execute_action::{ActionOutcome, StackManager};
use crate::domain::value_objects::action::Action;
use crate::infrastructure::compose::ComposeClient;
use crate::infrastructure::filesystem::{ConfigStore, StackRepository};
use crate::infrastructure::logging::LogSession;
use crate::infrastructure::process::{ComposeExecutor, DockerCommandExecutor};
use crate::presentation::ui::format_stack_table;

/// Base directory used when neither `--base-dir` nor `COMPOSECTL_DIR` is set
pub const DEFAULT_BASE_DIR: &str = "/volmain/.@docker_compose";

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("BUILD_DATE"),
    ")"
);

/// composectl - Manage ordered groups of Docker Compose stacks
#[derive(Debug, Parser)]
#[command(name = "composectl")]
#[command(about = "Manage ordered groups of Docker Compose stacks")]
#[command(version = VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory holding config.yaml, .env and stacks/
    #[arg(long, global = true, env = "COMPOSECTL_DIR", default_value = DEFAULT_BASE_DIR)]
    pub base_dir: PathBuf,

    /// Global config file (defaults to <base-dir>/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Show the docker commands without running them (implies --verbose)
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Action to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start stacks, resuming existing containers or creating them
    Start {
        /// Stack name or directory name (all stacks if omitted)
        stack: Option<String>,
    },

    /// Stop stacks
    Stop {
        /// Stack name or directory name (all stacks if omitted)
        stack: Option<String>,
    },

    /// Stop and start stacks
    #[command(alias = "reload")]
    Restart {
        /// Stack name or directory name (all stacks if omitted)
        stack: Option<String>,
    },

    /// Remove the resources of stacks
    Down {
        /// Stack name or directory name (all stacks if omitted)
        stack: Option<String>,
    },

    /// List stacks with their status
    List,
}

impl Commands {
    /// Action carried out by this command
    pub fn action(&self) -> Action {
        match self {
            Self::Start { .. } => Action::Start,
            Self::Stop { .. } => Action::Stop,
            Self::Restart { .. } => Action::Restart,
            Self::Down { .. } => Action::Down,
            Self::List => Action::List,
        }
    }

    /// Stack named on the command line, if any
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Start { stack }
            | Self::Stop { stack }
            | Self::Restart { stack }
            | Self::Down { stack } => stack.as_deref(),
            Self::List => None,
        }
    }
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CliApp {
    /// Parse the process arguments
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    /// Run with already parsed arguments
    pub fn with_cli(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the command; on failure prints the error chain and exits with status 1
    pub async fn run(self) -> Result<()> {
        if self.cli.no_color {
            colored::control::set_override(false);
        }

        match self.handle_command().await {
            Ok(_) => Ok(()),
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                exit(1);
            }
        }
    }

    async fn handle_command(&self) -> Result<()> {
        let action = self.cli.command.action();

        if action == Action::List && self.cli.dry_run {
            bail!("--dry-run flag is not applicable for list command");
        }

        let base_dir = self.cli.base_dir.as_path();
        if !base_dir.is_dir() {
            bail!("base directory does not exist: {}", base_dir.display());
        }

        let verbose = self.cli.verbose || self.cli.dry_run;
        let session = LogSession::start(base_dir, verbose)?;

        info!("composectl started - action: {}", action);
        info!("Base directory: {}", base_dir.display());
        debug!("Log file: {}", session.path().display());
        if self.cli.dry_run {
            info!("Dry-run mode enabled, no commands will be executed");
        }

        let result = self
            .execute(base_dir, action)
            .await
            .with_context(|| format!("{} action failed", action));

        match &result {
            Ok(()) => info!("composectl finished successfully"),
            Err(e) => error!("{:#}", e),
        }

        result
    }

    async fn execute(&self, base_dir: &Path, action: Action) -> Result<()> {
        let mut config_store = ConfigStore::new(base_dir);
        if let Some(config_file) = &self.cli.config {
            config_store = config_store.with_config_file(config_file);
        }
        let config = config_store.load_global()?;
        debug!("Configuration: {:?}", config);

        let executor: Arc<dyn ComposeExecutor> = Arc::new(DockerCommandExecutor::default());
        let compose = Arc::new(ComposeClient::new(executor, config, self.cli.dry_run));
        let repository = StackRepository::new(base_dir, compose.clone());
        let manager = StackManager::new(repository, compose, config_store);

        match manager.execute(action, self.cli.command.target()).await? {
            ActionOutcome::NoStacks => println!("No stacks found"),
            ActionOutcome::Listed(stacks) => {
                println!("{}", format_stack_table(&stacks, !self.cli.no_color));
            }
            ActionOutcome::Completed { processed } => {
                debug!("Processed {} stack(s)", processed);
            }
        }

        Ok(())
    }
}
