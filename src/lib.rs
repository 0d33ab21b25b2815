//! # composectl - Docker Compose stack manager
//!
//! `composectl` manages a directory of independent Docker Compose projects
//! ("stacks") as one ordered group: start, stop, restart, take down or list
//! them in a deterministic order, with an optional dry-run mode.
//!
//! ## Base directory layout
//!
//! ```text
//! <base>/config.yaml              global configuration (optional)
//! <base>/.env                     environment file (optional)
//! <base>/composectl.log           log file
//! <base>/stacks/01-web/           one directory per stack, NN-name
//! <base>/stacks/01-web/config.yaml  per-stack override (optional)
//! ```
//!
//! The two-digit prefix orders the stacks; the rest of the directory name is
//! the stack (and compose project) name.
//!
//! ## Configuration
//!
//! ```yaml
//! common-args: [--env-file, prod.env]
//! up-args: [--detach, --wait-timeout, "30", --pull, always]
//! down-args: [--volumes]
//! timeout: 10
//! ```
//!
//! Stack overrides may replace `up-args` and `down-args` only.
//!
//! ## Architecture
//!
//! - [`domain`]: stacks, statuses, actions and configuration values
//! - [`application`]: duplicate guard and the action orchestrator
//! - [`infrastructure`]: process execution, compose gateway, file system and logging
//! - [`presentation`]: CLI interface and table output
//! - [`common`]: error handling
//!
//! ## Using the Library
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use composectl::application::{ActionOutcome, StackManager};
//! use composectl::infrastructure::{
//!     ComposeClient, ConfigStore, DockerCommandExecutor, StackRepository,
//! };
//!
//! # async fn example() -> composectl::Result<()> {
//! let base_dir = "/srv/compose";
//! let config_store = ConfigStore::new(base_dir);
//! let config = config_store.load_global()?;
//!
//! let compose = Arc::new(ComposeClient::new(
//!     Arc::new(DockerCommandExecutor::default()),
//!     config,
//!     true,
//! ));
//! let repository = StackRepository::new(base_dir, compose.clone());
//! let manager = StackManager::new(repository, compose, config_store);
//!
//! if let ActionOutcome::Completed { processed } = manager.execute_action("start", None).await? {
//!     println!("Processed {} stacks", processed);
//! }
//! # Ok(())
//! # }
//! ```

// Documentation attributes
#![warn(missing_docs)]
#![cfg_attr(test, deny(missing_docs))]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::ComposectlError;
pub use crate::common::result::ComposectlResult as Result;
