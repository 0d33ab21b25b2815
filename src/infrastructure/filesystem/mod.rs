/// Global config and stack overrides
pub mod config_store;
/// Stack discovery under `stacks/`
pub mod stack_repository;

pub use config_store::ConfigStore;
pub use stack_repository::StackRepository;
