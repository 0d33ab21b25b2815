//! Shared error handling

/// Error types
pub mod error;
/// Result alias
pub mod result;
