//! CompletionClient ポートの標準実装
//!
//! common のフォールバッククライアントをそのまま被せる薄いアダプタ。

use crate::ports::outbound::CompletionClient;
use common::error::Error;
use common::llm::{CompletionProvider, CompletionRequest, FallbackCompletionClient, ModelCandidate};
use std::sync::Arc;

pub struct StdCompletionClient {
    inner: FallbackCompletionClient,
}

impl StdCompletionClient {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            inner: FallbackCompletionClient::new(provider),
        }
    }
}

impl CompletionClient for StdCompletionClient {
    fn complete(
        &self,
        candidates: &[ModelCandidate],
        req: &CompletionRequest,
    ) -> Result<String, Error> {
        self.inner.complete(candidates, req)
    }
}
