/// 設定エンティティ
pub mod configuration;
/// スタックエンティティ
pub mod stack;
