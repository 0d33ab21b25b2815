use serde::{Deserialize, Serialize};

/// グローバル設定ファイルとスタック固有設定ファイルの名前
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// `docker compose stop` に渡すデフォルトのタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// `up` のデフォルト引数
pub fn default_up_args() -> Vec<String> {
    ["--detach", "--wait-timeout", "30", "--pull", "always"]
        .iter()
        .map(|arg| arg.to_string())
        .collect()
}

/// グローバル設定
///
/// 起動時に一度だけ構築され、以降は各コンポーネントに値として渡される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// すべての compose 呼び出しに付与する引数
    #[serde(rename = "common-args", default)]
    pub common_args: Vec<String>,

    /// `up` に付与する引数
    #[serde(rename = "up-args", default = "default_up_args")]
    pub up_args: Vec<String>,

    /// `down` に付与する引数
    #[serde(rename = "down-args", default)]
    pub down_args: Vec<String>,

    /// `stop` のタイムアウト（秒）
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            common_args: Vec::new(),
            up_args: default_up_args(),
            down_args: Vec::new(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// スタック固有の設定をマージした新しい設定を返す
    ///
    /// `up-args` / `down-args` は空でなければ丸ごと置き換える。
    /// `common-args` と `timeout` は常にグローバルの値を引き継ぐ。
    /// どちらの入力も変更しない。
    pub fn merge(&self, stack_config: &StackConfig) -> Config {
        let mut merged = self.clone();

        if !stack_config.up_args.is_empty() {
            merged.up_args = stack_config.up_args.clone();
        }

        if !stack_config.down_args.is_empty() {
            merged.down_args = stack_config.down_args.clone();
        }

        merged
    }
}

/// スタック固有の設定（`stacks/NN-name/config.yaml`）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackConfig {
    /// `up` 引数の上書き（空の場合はグローバルを継承）
    #[serde(rename = "up-args", default)]
    pub up_args: Vec<String>,

    /// `down` 引数の上書き（空の場合はグローバルを継承）
    #[serde(rename = "down-args", default)]
    pub down_args: Vec<String>,
}

impl StackConfig {
    /// 上書きが一つもないか
    pub fn is_empty(&self) -> bool {
        self.up_args.is_empty() && self.down_args.is_empty()
    }
}
