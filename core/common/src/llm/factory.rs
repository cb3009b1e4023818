//! 設定からプロバイダを組み立てるファクトリ

use crate::llm::config::{ModelsConfig, ProviderTypeKind};
use crate::llm::echo::EchoProvider;
use crate::llm::openai_compat::OpenAiCompatProvider;
use crate::llm::provider::CompletionProvider;
use std::sync::Arc;

/// ModelsConfig からプロバイダ実装を生成する
pub fn build_provider(cfg: &ModelsConfig) -> Arc<dyn CompletionProvider> {
    match cfg.provider {
        ProviderTypeKind::OpenaiCompat => Arc::new(OpenAiCompatProvider::new(
            cfg.base_url.clone(),
            cfg.api_key_env.clone(),
        )),
        ProviderTypeKind::Echo => Arc::new(EchoProvider::new()),
    }
}
