use std::fmt;
use std::str::FromStr;

use crate::common::error::ComposectlError;

/// スタックに対する操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// 起動（既存コンテナがあれば再開、なければ作成）
    Start,
    /// 停止
    Stop,
    /// 停止してから起動（`reload` も同じ）
    Restart,
    /// 削除
    Down,
    /// 一覧表示
    List,
}

impl Action {
    /// スタックの状態を変更する操作か
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::List)
    }

    /// 操作名
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Down => "down",
            Self::List => "list",
        }
    }
}

impl FromStr for Action {
    type Err = ComposectlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "restart" | "reload" => Ok(Self::Restart),
            "down" => Ok(Self::Down),
            "list" => Ok(Self::List),
            other => Err(ComposectlError::invalid_action(other)),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
