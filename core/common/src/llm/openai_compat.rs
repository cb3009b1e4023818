//! OpenAI Chat Completions 互換 (/chat/completions) プロバイダ
//!
//! base_url で任意のエンドポイント（既定は Groq）を指定可能。
//! HTTP エラーは error::classify_http_error で種別タグに分類して返す。

use crate::error::{classify_http_error, Error};
use crate::llm::provider::{CompletionProvider, CompletionRequest};
use serde_json::{json, Value};
use std::env;

/// OpenAI Chat Completions 互換プロバイダ
pub struct OpenAiCompatProvider {
    base_url: String,
    api_key_env: String,
}

impl OpenAiCompatProvider {
    /// 新しいプロバイダを作成
    ///
    /// * `base_url` - ベース URL（末尾スラッシュは除去）
    /// * `api_key_env` - API キーを読む環境変数名
    pub fn new(base_url: impl Into<String>, api_key_env: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key_env: api_key_env.into(),
        }
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn auth_header(&self) -> Option<String> {
        env::var(&self.api_key_env)
            .ok()
            .map(|key| format!("Bearer {}", key))
    }
}

impl CompletionProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "openai_compat"
    }

    fn make_request_payload(&self, model: &str, req: &CompletionRequest) -> Result<Value, Error> {
        let mut messages: Vec<Value> = Vec::new();

        if let Some(ref s) = req.system {
            messages.push(json!({ "role": "system", "content": s }));
        }

        for turn in &req.history {
            messages.push(json!({ "role": turn.role(), "content": turn.content() }));
        }

        if let Some(ref ctx) = req.live_context {
            messages.push(json!({ "role": "system", "content": ctx }));
        }

        if let Some(ref image) = req.image {
            messages.push(json!({
                "role": "user",
                "content": [
                    { "type": "text", "text": req.user_text },
                    { "type": "image_url", "image_url": { "url": image.data_url() } }
                ]
            }));
        } else {
            messages.push(json!({ "role": "user", "content": req.user_text }));
        }

        Ok(json!({
            "model": model,
            "messages": messages,
            "temperature": req.temperature,
            "max_tokens": req.max_tokens,
            "stream": false
        }))
    }

    fn make_http_request(&self, request_json: &str) -> Result<String, Error> {
        let mut builder = reqwest::blocking::Client::new()
            .post(self.url())
            .header("Content-Type", "application/json")
            .body(request_json.to_string());

        if let Some(auth) = self.auth_header() {
            builder = builder.header("Authorization", auth);
        }

        let response = builder
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let error_msg = if let Ok(v) = serde_json::from_str::<Value>(&response_text) {
                v["error"]["message"]
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| response_text.clone())
            } else {
                response_text.clone()
            };
            return Err(classify_http_error(status.as_u16(), &error_msg));
        }

        Ok(response_text)
    }

    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error> {
        let v: Value = serde_json::from_str(response_json)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;

        if let Some(err) = v.get("error") {
            let msg = err["message"].as_str().unwrap_or("Unknown error");
            return Err(Error::http(format!("API error: {}", msg)));
        }

        let text = v["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.trim().to_string());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::ImageAttachment;
    use crate::msg::Turn;

    fn request(image: Option<ImageAttachment>) -> CompletionRequest {
        CompletionRequest {
            system: Some("You are AXON.".to_string()),
            live_context: None,
            history: vec![Turn::user("A"), Turn::assistant("B")],
            user_text: "Hello".to_string(),
            image,
            temperature: 0.6,
            max_tokens: 2048,
        }
    }

    #[test]
    fn test_make_request_payload_text() {
        let p = OpenAiCompatProvider::new("https://api.example.com/v1/", "X_KEY");
        let payload = p.make_request_payload("model-a", &request(None)).unwrap();
        assert_eq!(payload["model"], "model-a");
        assert_eq!(payload["temperature"], 0.6);
        assert_eq!(payload["max_tokens"], 2048);
        assert_eq!(payload["stream"], false);
        let messages = payload["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["content"], "A");
        assert_eq!(messages[2]["role"], "assistant");
        assert_eq!(messages[3]["role"], "user");
        assert_eq!(messages[3]["content"], "Hello");
        assert_eq!(p.url(), "https://api.example.com/v1/chat/completions");
    }

    #[test]
    fn test_make_request_payload_with_live_context() {
        let p = OpenAiCompatProvider::new("https://api.example.com/v1", "X_KEY");
        let mut req = request(None);
        req.live_context = Some("Real-time Context: rain".to_string());
        let payload = p.make_request_payload("m", &req).unwrap();
        let messages = payload["messages"].as_array().unwrap();
        // system, history x2, live context, user
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[3]["role"], "system");
        assert_eq!(messages[3]["content"], "Real-time Context: rain");
        assert_eq!(messages[4]["role"], "user");
    }

    #[test]
    fn test_make_request_payload_with_image_uses_content_parts() {
        let p = OpenAiCompatProvider::new("https://api.example.com/v1", "X_KEY");
        let req = request(Some(ImageAttachment::new("image/jpeg", "aGVsbG8=")));
        let payload = p.make_request_payload("m-vision", &req).unwrap();
        let messages = payload["messages"].as_array().unwrap();
        let user = messages.last().unwrap();
        assert_eq!(user["role"], "user");
        let parts = user["content"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[0]["text"], "Hello");
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(
            parts[1]["image_url"]["url"],
            "data:image/jpeg;base64,aGVsbG8="
        );
    }

    #[test]
    fn test_parse_response_text() {
        let p = OpenAiCompatProvider::new("https://api.example.com/v1", "X_KEY");
        let json = r#"{"choices":[{"message":{"role":"assistant","content":" Hello world "}}]}"#;
        let text = p.parse_response_text(json).unwrap();
        assert_eq!(text.as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_parse_response_text_empty_content() {
        let p = OpenAiCompatProvider::new("https://api.example.com/v1", "X_KEY");
        let json = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let text = p.parse_response_text(json).unwrap();
        assert_eq!(text, None);
    }

    #[test]
    fn test_parse_response_text_api_error() {
        let p = OpenAiCompatProvider::new("https://api.example.com/v1", "X_KEY");
        let json = r#"{"error":{"message":"boom"}}"#;
        assert!(p.parse_response_text(json).is_err());
    }
}
