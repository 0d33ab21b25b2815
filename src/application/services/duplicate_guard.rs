use std::collections::BTreeMap;
use tracing::warn;

use crate::common::error::{format_duplicates, ComposectlError};
use crate::common::result::ComposectlResult;
use crate::domain::entities::stack::Stack;

/// 論理名が重複しているスタックを名前順に列挙する
///
/// 各エントリは `(論理名, ソート済みのディレクトリ名)`。重複がなければ空。
pub fn find_duplicates(stacks: &[Stack]) -> Vec<(String, Vec<String>)> {
    let mut by_name: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for stack in stacks {
        by_name
            .entry(stack.name.as_str())
            .or_default()
            .push(stack.dir_name());
    }

    by_name
        .into_iter()
        .filter(|(_, dirs)| dirs.len() > 1)
        .map(|(name, mut dirs)| {
            dirs.sort();
            (name.to_string(), dirs)
        })
        .collect()
}

/// 変更系アクションの前提条件: 論理名の重複があればエラー
pub fn check_duplicates(stacks: &[Stack]) -> ComposectlResult<()> {
    let duplicates = find_duplicates(stacks);
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(ComposectlError::duplicate_stacks(duplicates))
    }
}

/// 重複を警告するだけで処理は止めない（`list` 用）
///
/// 重複があった場合は `true` を返す。
pub fn warn_duplicates(stacks: &[Stack]) -> bool {
    let duplicates = find_duplicates(stacks);
    if duplicates.is_empty() {
        return false;
    }

    let message = format!(
        "duplicate stack names found:\n{}",
        format_duplicates(&duplicates)
    );
    eprintln!("Warning: {}", message);
    warn!("{}", message);
    true
}
