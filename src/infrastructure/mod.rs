//! Infrastructure layer modules
//!
//! This layer provides concrete implementations for external system interactions:
//! - Compose gateway (docker compose invocations, dry-run)
//! - File system operations (config files, stack discovery)
//! - Log file session
//! - Process execution (command runners)

/// Compose gateway
pub mod compose;
/// Config files and stack discovery
pub mod filesystem;
/// Log file session
pub mod logging;
/// Command execution
pub mod process;

// Re-export commonly used types
pub use compose::ComposeClient;
pub use filesystem::{ConfigStore, StackRepository};
pub use logging::LogSession;
pub use process::{ComposeExecutor, DockerCommandExecutor};
