//! Echoプロバイダの実装
//!
//! このプロバイダは実際にLLM APIを呼び出さず、クエリを表示するだけです。
//! デバッグやオフライン動作確認用に使用します。

use crate::error::Error;
use crate::llm::provider::{CompletionProvider, CompletionRequest};
use serde_json::{json, Value};

/// Echoプロバイダ
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

impl EchoProvider {
    /// 新しいEchoプロバイダを作成
    pub fn new() -> Self {
        Self
    }
}

impl CompletionProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn make_request_payload(&self, model: &str, req: &CompletionRequest) -> Result<Value, Error> {
        let mut payload = json!({
            "model": model,
            "query": req.user_text,
        });
        if let Some(ref system) = req.system {
            payload["system_instruction"] = json!(system);
        }
        if !req.history.is_empty() {
            let history_json: Vec<Value> = req
                .history
                .iter()
                .map(|t| json!({ "role": t.role(), "content": t.content() }))
                .collect();
            payload["history"] = json!(history_json);
        }
        if req.image.is_some() {
            payload["image"] = json!(true);
        }
        Ok(payload)
    }

    fn make_http_request(&self, _request_json: &str) -> Result<String, Error> {
        // ダミーのレスポンスを返す（実際のAPI呼び出しは行わない）
        Ok(r#"{"echo": "This is a dummy response from echo provider"}"#.to_string())
    }

    fn parse_response_text(&self, _response_json: &str) -> Result<Option<String>, Error> {
        // Echoプロバイダは常に固定のメッセージを返す
        Ok(Some(
            "[Echo Provider] Query received (no actual LLM call made)".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::Turn;

    #[test]
    fn test_echo_provider_name() {
        let provider = EchoProvider::new();
        assert_eq!(provider.name(), "echo");
    }

    #[test]
    fn test_echo_provider_make_request_payload() {
        let provider = EchoProvider::new();
        let req = CompletionRequest {
            system: Some("You are helpful".to_string()),
            live_context: None,
            history: vec![Turn::user("Hi"), Turn::assistant("Hello!")],
            user_text: "How are you?".to_string(),
            image: None,
            temperature: 0.6,
            max_tokens: 64,
        };
        let payload = provider.make_request_payload("echo-1", &req).unwrap();
        assert_eq!(payload["query"], "How are you?");
        assert_eq!(payload["system_instruction"], "You are helpful");
        assert_eq!(payload["history"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_echo_provider_parse_response_text() {
        let provider = EchoProvider::new();
        let result = provider.parse_response_text("{}").unwrap();
        assert!(result.is_some());
        assert!(result.unwrap().contains("Echo Provider"));
    }
}
