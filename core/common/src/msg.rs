//! 型付き会話ターン（Turn）
//!
//! セッションは Vec<Turn> を保持し、LLMプロバイダが各APIのリクエスト形式に変換する。
//! 一度 append した Turn は変更しない。

use serde::{Deserialize, Serialize};

/// 会話ターン（ユーザー・アシスタント）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Turn {
    User(String),
    Assistant(String),
}

impl Turn {
    pub fn user(s: impl Into<String>) -> Self {
        Turn::User(s.into())
    }

    pub fn assistant(s: impl Into<String>) -> Self {
        Turn::Assistant(s.into())
    }

    /// API 上のロール名
    pub fn role(&self) -> &'static str {
        match self {
            Turn::User(_) => "user",
            Turn::Assistant(_) => "assistant",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Turn::User(s) => s,
            Turn::Assistant(s) => s,
        }
    }
}
