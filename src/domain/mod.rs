//! ドメイン層
//!
//! スタック、状態、アクション、設定値

/// ドメインエンティティ
pub mod entities;
/// 値オブジェクト
pub mod value_objects;
