//! Presentation layer
//!
//! Command line parsing and terminal output.

/// Command line interface
pub mod cli;
/// Terminal output
pub mod ui;
