//! Error types shared by every layer

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving configuration, discovering stacks or
/// driving docker compose
#[derive(Error, Debug)]
pub enum ComposectlError {
    /// A config file exists but could not be read
    #[error("reading config file {}: {source}", .path.display())]
    ConfigReadError {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid YAML for its schema
    #[error("parsing config file {}: {source}", .path.display())]
    ConfigParseError {
        /// File that failed
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_yaml::Error,
    },

    /// `<base>/stacks` is missing
    #[error("stacks directory does not exist: {}", .path.display())]
    DirectoryNotFoundError {
        /// Directory that was expected
        path: PathBuf,
    },

    /// No stack matches the requested name
    #[error("stack not found: {name}")]
    StackNotFoundError {
        /// Requested stack or directory name
        name: String,
    },

    /// Several directories resolve to the same logical name
    #[error("duplicate stack names found:\n{}", format_duplicates(.duplicates))]
    DuplicateStackError {
        /// (stack name, sorted directory names), sorted by stack name
        duplicates: Vec<(String, Vec<String>)>,
    },

    /// The action name is not one of the known actions
    #[error("unrecognized action: {action}")]
    InvalidActionError {
        /// Action name as given
        action: String,
    },

    /// A docker compose command failed for a stack
    #[error("stack '{stack_name}': {message}")]
    ExternalCommandError {
        /// What failed, e.g. `docker compose up failed`
        message: String,
        /// Stack being processed
        stack_name: String,
        /// Executor error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Any other file system failure
    #[error("File system operation failed: {message}")]
    FileSystemError {
        /// Operation that failed
        message: String,
        /// Path involved, if any
        path: Option<PathBuf>,
        /// Underlying I/O error
        #[source]
        source: Option<std::io::Error>,
    },
}

impl ComposectlError {
    /// Create a config read error
    pub fn config_read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse error
    pub fn config_parse_error(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::ConfigParseError {
            path: path.into(),
            source,
        }
    }

    /// Create a missing stacks directory error
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        Self::DirectoryNotFoundError { path: path.into() }
    }

    /// Create a stack not found error
    pub fn stack_not_found(name: impl Into<String>) -> Self {
        Self::StackNotFoundError { name: name.into() }
    }

    /// Create a duplicate stack names error
    pub fn duplicate_stacks(duplicates: Vec<(String, Vec<String>)>) -> Self {
        Self::DuplicateStackError { duplicates }
    }

    /// Create an invalid action error
    pub fn invalid_action(action: impl Into<String>) -> Self {
        Self::InvalidActionError {
            action: action.into(),
        }
    }

    /// Create an external command error wrapping the executor error
    pub fn external_command_error_with_source(
        message: impl Into<String>,
        stack_name: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ExternalCommandError {
            message: message.into(),
            stack_name: stack_name.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a file system error with its I/O source
    pub fn filesystem_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }
}

/// Render the duplicate listing the way it is shown to operators:
/// `  - 'web' in: 01-web, 03-web`, one line per name.
pub fn format_duplicates(duplicates: &[(String, Vec<String>)]) -> String {
    duplicates
        .iter()
        .map(|(name, dirs)| format!("  - '{}' in: {}", name, dirs.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}
