//! LLM による履歴コンパクション
//!
//! 蓄積ターン数が閾値（20）に達したら、全履歴を補助モデル 1 回の呼び出しで
//! 要約し、サマリを置き換えて履歴を直近テール（10 ターン＋直前に追加した
//! ペア）へ切り詰める。要約に失敗したらコンパクション自体をスキップする。

use crate::domain::session::SessionContext;
use crate::ports::outbound::{CompactionStrategy, CompletionClient};
use common::llm::{CompletionRequest, ModelCandidate};
use std::sync::Arc;

/// コンパクションを起動する蓄積ターン数
pub const COMPACTION_TRIGGER: usize = 20;
/// 切り詰め後に残す古いターンのテール長（直前ペア 2 ターンを別途残す）
pub const SUMMARY_TAIL: usize = 10;
/// 要約に渡す 1 ターンあたりの抜粋上限（文字数）
const EXCERPT_CHARS: usize = 200;
const SUMMARY_MAX_TOKENS: u32 = 150;

const SUMMARIZE_SYSTEM: &str = "Summarize the following conversation history briefly, focusing on key topics and facts mentioned. Keep it under 100 words.";

pub struct LlmHistoryCompactor {
    completion: Arc<dyn CompletionClient>,
    summary_model: String,
    temperature: f64,
}

impl LlmHistoryCompactor {
    pub fn new(
        completion: Arc<dyn CompletionClient>,
        summary_model: impl Into<String>,
        temperature: f64,
    ) -> Self {
        Self {
            completion,
            summary_model: summary_model.into(),
            temperature,
        }
    }

    fn format_history(session: &SessionContext) -> String {
        session
            .history
            .iter()
            .map(|turn| {
                let excerpt: String = turn.content().chars().take(EXCERPT_CHARS).collect();
                format!("{}: {}", turn.role(), excerpt)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl CompactionStrategy for LlmHistoryCompactor {
    fn compact(&self, session: &mut SessionContext) {
        if session.history.len() < COMPACTION_TRIGGER {
            return;
        }

        let req = CompletionRequest {
            system: Some(SUMMARIZE_SYSTEM.to_string()),
            live_context: None,
            history: Vec::new(),
            user_text: Self::format_history(session),
            image: None,
            temperature: self.temperature,
            max_tokens: SUMMARY_MAX_TOKENS,
        };
        let candidates = [ModelCandidate::from_name(&self.summary_model)];

        match self.completion.complete(&candidates, &req) {
            Ok(summary) if !summary.trim().is_empty() => {
                session.summary = summary.trim().to_string();
                let keep = SUMMARY_TAIL + 2;
                if session.history.len() > keep {
                    session.history = session.history.split_off(session.history.len() - keep);
                }
            }
            // 失敗・空サマリはスキップ（履歴は切り詰めない）
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::error::Error;
    use std::sync::Mutex;

    struct StubCompletionClient {
        result: Result<String, Error>,
        calls: Mutex<Vec<CompletionRequest>>,
    }

    impl StubCompletionClient {
        fn ok(text: &str) -> Self {
            Self {
                result: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                result: Err(Error::RateLimited("429".to_string())),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl CompletionClient for StubCompletionClient {
        fn complete(
            &self,
            _candidates: &[ModelCandidate],
            req: &CompletionRequest,
        ) -> Result<String, Error> {
            self.calls.lock().unwrap().push(req.clone());
            self.result.clone()
        }
    }

    fn session_with_turns(n: usize) -> SessionContext {
        let mut session = SessionContext::new();
        for i in 0..n / 2 {
            session.append_exchange(format!("question {}", i), format!("answer {}", i));
        }
        session
    }

    #[test]
    fn test_no_compaction_below_trigger() {
        let stub = Arc::new(StubCompletionClient::ok("summary"));
        let compactor =
            LlmHistoryCompactor::new(Arc::clone(&stub) as _, "summary-model", 0.6);
        let mut session = session_with_turns(18);
        compactor.compact(&mut session);
        assert_eq!(session.history.len(), 18);
        assert!(session.summary.is_empty());
        assert_eq!(stub.call_count(), 0);
    }

    #[test]
    fn test_compaction_triggers_at_twenty_and_keeps_tail_plus_pair() {
        let stub = Arc::new(StubCompletionClient::ok("the summary"));
        let compactor =
            LlmHistoryCompactor::new(Arc::clone(&stub) as _, "summary-model", 0.6);
        let mut session = session_with_turns(20);
        compactor.compact(&mut session);
        assert_eq!(stub.call_count(), 1);
        assert_eq!(session.summary, "the summary");
        // 直近テール 10 ターン＋追加したばかりのペア 2 ターン
        assert_eq!(session.history.len(), 12);
        assert_eq!(session.history.last().unwrap().content(), "answer 9");
        assert_eq!(session.history[0].content(), "question 4");
    }

    #[test]
    fn test_failed_summary_skips_compaction_entirely() {
        let stub = Arc::new(StubCompletionClient::failing());
        let compactor =
            LlmHistoryCompactor::new(Arc::clone(&stub) as _, "summary-model", 0.6);
        let mut session = session_with_turns(20);
        compactor.compact(&mut session);
        assert_eq!(session.history.len(), 20);
        assert!(session.summary.is_empty());
    }

    #[test]
    fn test_summary_request_uses_excerpts() {
        let stub = Arc::new(StubCompletionClient::ok("s"));
        let compactor =
            LlmHistoryCompactor::new(Arc::clone(&stub) as _, "summary-model", 0.6);
        let mut session = SessionContext::new();
        let long = "x".repeat(500);
        for _ in 0..10 {
            session.append_exchange(long.clone(), "short");
        }
        compactor.compact(&mut session);
        let calls = stub.calls.lock().unwrap();
        let req = &calls[0];
        assert!(req.user_text.contains(&format!("user: {}", "x".repeat(200))));
        assert!(!req.user_text.contains(&"x".repeat(201)));
        assert!(req.user_text.contains("assistant: short"));
        assert_eq!(req.max_tokens, 150);
    }
}
