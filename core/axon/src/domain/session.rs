//! セッション状態
//!
//! 呼び出し側（REPL やセッションストア）が所有し、1 リクエストの間だけ
//! `&mut` でディスパッチに貸し出す。同一セッションへの並行リクエストは
//! 呼び出し側が直列化する前提。

use crate::domain::game::GameState;
use common::msg::Turn;

/// 1 セッション分の可変状態（履歴・サマリ・進行中ゲーム）
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// 会話ターン（append のみ。コンパクションでのみ切り詰める）
    pub history: Vec<Turn>,
    /// 圧縮済みサマリ（空文字列なら未生成）
    pub summary: String,
    /// 進行中のミニゲーム
    pub game: Option<GameState>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// /clear: 履歴・サマリ・ゲームを初期状態へ戻す
    pub fn reset(&mut self) {
        self.history.clear();
        self.summary.clear();
        self.game = None;
    }

    /// 補完成功後に user/assistant ペアを追加する
    pub fn append_exchange(&mut self, user_text: impl Into<String>, assistant_text: impl Into<String>) {
        self.history.push(Turn::user(user_text));
        self.history.push(Turn::assistant(assistant_text));
    }

    /// 送信用の履歴ウィンドウ（直近 n ターン）
    pub fn history_window(&self, n: usize) -> Vec<Turn> {
        let start = self.history.len().saturating_sub(n);
        self.history[start..].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::game::TicTacToeGame;

    #[test]
    fn test_reset_clears_everything() {
        let mut session = SessionContext::new();
        session.append_exchange("Hi", "Hello!");
        session.summary = "greeted".to_string();
        session.game = Some(GameState::TicTacToe(TicTacToeGame::new()));

        session.reset();

        assert!(session.history.is_empty());
        assert!(session.summary.is_empty());
        assert!(session.game.is_none());
    }

    #[test]
    fn test_history_window_takes_tail() {
        let mut session = SessionContext::new();
        for i in 0..10 {
            session.append_exchange(format!("q{}", i), format!("a{}", i));
        }
        let window = session.history_window(15);
        assert_eq!(window.len(), 15);
        assert_eq!(window.last().unwrap().content(), "a9");
        assert_eq!(window[0].content(), "a2");
    }

    #[test]
    fn test_history_window_shorter_than_limit() {
        let mut session = SessionContext::new();
        session.append_exchange("q", "a");
        assert_eq!(session.history_window(15).len(), 2);
    }
}
