/// `list` table rendering
pub mod stack_table;

pub use stack_table::format_stack_table;
