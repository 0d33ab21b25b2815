use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use super::configuration::CONFIG_FILE_NAME;

/// スタックの状態
///
/// コンテナエンジンに問い合わせた結果から導出される。永続化はしない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackStatus {
    /// 実行中
    Running,
    /// 停止中（コンテナは存在する）
    Stopped,
    /// コンテナが存在しない
    Down,
}

impl StackStatus {
    /// エンジンが報告するステータス文字列を正規化する
    ///
    /// `running(2)` のような括弧付きのカウントは取り除いてから判定する。
    /// 未知の値や空文字列は `Down` として扱う。
    pub fn normalize(raw: &str) -> Self {
        let base = match raw.find('(') {
            Some(idx) => &raw[..idx],
            None => raw,
        };

        match base {
            "running" => Self::Running,
            "exited" | "stopped" => Self::Stopped,
            _ => Self::Down,
        }
    }

    /// 表示用の文字列
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for StackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// スタックエンティティ
///
/// `stacks/` 配下の `NN-name` ディレクトリ1つに対応する Compose プロジェクト。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    /// 論理名（ディレクトリ名から順序プレフィックスを除いたもの）
    pub name: String,

    /// スタックのファイルが置かれたディレクトリ
    pub directory: PathBuf,

    /// スキャン時に問い合わせたステータス（問い合わせ前は `None`）
    pub status: Option<StackStatus>,
}

impl Stack {
    /// 新しいStackインスタンスを作成
    pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            status: None,
        }
    }

    /// ステータスを設定
    pub fn with_status(mut self, status: StackStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// ディレクトリのベース名（例: `01-web`）
    pub fn dir_name(&self) -> String {
        self.directory
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// ディレクトリ名の順序プレフィックス（例: `01`）
    pub fn order(&self) -> String {
        let dir_name = self.dir_name();
        match dir_name.split_once('-') {
            Some((order, _)) => order.to_string(),
            None => dir_name,
        }
    }

    /// 名前またはディレクトリ名が一致するか
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.dir_name() == name
    }

    /// スタック固有の設定ファイルのパス
    pub fn config_path(&self) -> PathBuf {
        stack_config_path(&self.directory)
    }
}

/// `<stack dir>/config.yaml`
pub fn stack_config_path(directory: &Path) -> PathBuf {
    directory.join(CONFIG_FILE_NAME)
}
