//! LLMプロバイダとフォールバッククライアント

pub mod config;
pub mod echo;
pub mod factory;
pub mod fallback;
pub mod openai_compat;
pub mod provider;

pub use config::{ModelCandidate, ModelsConfig, ProviderTypeKind};
pub use echo::EchoProvider;
pub use factory::build_provider;
pub use fallback::FallbackCompletionClient;
pub use openai_compat::OpenAiCompatProvider;
pub use provider::{CompletionProvider, CompletionRequest, ImageAttachment};
