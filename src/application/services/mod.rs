/// Duplicate logical-name detection
pub mod duplicate_guard;
