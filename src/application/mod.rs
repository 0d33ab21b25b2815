//! Application layer
//!
//! Use cases coordinating the domain with the infrastructure adapters.

/// ドメインサービス
pub mod services;
/// ユースケース
pub mod use_cases;

pub use use_cases::execute_action::{ActionOutcome, StackManager};
