/// アクション
pub mod action;
/// スタックディレクトリ名
pub mod stack_dir_name;
