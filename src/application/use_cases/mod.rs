/// Orchestration of stack actions
pub mod execute_action;
