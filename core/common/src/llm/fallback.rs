//! マルチモデル・フォールバッククライアント
//!
//! 候補モデルを順に試し、一時的エラー（レート制限・モデル廃止）のときだけ
//! 次の候補へ進む。それ以外のエラー（認証など）は即座に打ち切って返す。
//! 候補を使い切った場合は最後に見たエラーを返す。
//! 試行は常に逐次実行する（先勝ちセマンティクスと二重課金回避のため）。

use crate::error::Error;
use crate::llm::config::ModelCandidate;
use crate::llm::provider::{CompletionProvider, CompletionRequest};
use std::sync::Arc;

/// 候補モデルリストに対して順にチャット補完を試すクライアント
pub struct FallbackCompletionClient {
    provider: Arc<dyn CompletionProvider>,
}

impl FallbackCompletionClient {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// 候補を順に試し、最初に成功したテキストを返す
    ///
    /// 画像付きリクエストを非 vision 候補に送るときは、画像を落とした
    /// テキストのみのペイロードに組み直す（vision ペイロードは vision
    /// 非対応モデルには決して送らない）。
    pub fn complete(
        &self,
        candidates: &[ModelCandidate],
        req: &CompletionRequest,
    ) -> Result<String, Error> {
        if candidates.is_empty() {
            return Err(Error::invalid_argument("no candidate models configured"));
        }

        let mut last_err: Option<Error> = None;
        for candidate in candidates {
            let stripped;
            let attempt: &CompletionRequest = if req.image.is_some() && !candidate.vision {
                stripped = req.text_only();
                &stripped
            } else {
                req
            };

            match self.try_candidate(&candidate.name, attempt) {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() => {
                    last_err = Some(e);
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        // 全候補を使い切った。最後に見たエラーを返す。
        Err(last_err.expect("at least one candidate was attempted"))
    }

    fn try_candidate(&self, model: &str, req: &CompletionRequest) -> Result<String, Error> {
        let payload = self.provider.make_request_payload(model, req)?;
        let request_json = serde_json::to_string(&payload)
            .map_err(|e| Error::json(format!("Failed to serialize request: {}", e)))?;
        let response_json = self.provider.make_http_request(&request_json)?;
        let text = self
            .provider
            .parse_response_text(&response_json)?
            .ok_or_else(|| Error::http("No text in response"))?;
        Ok(text)
    }
}
