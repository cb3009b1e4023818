//! チャット補完 Outbound ポート

use common::error::Error;
use common::llm::{CompletionRequest, ModelCandidate};

/// 候補モデルチェーンに対する補完呼び出しの抽象
///
/// 実装は `adapter::StdCompletionClient`（common のフォールバッククライアント）
/// やテスト用のスタブなど。
pub trait CompletionClient: Send + Sync {
    fn complete(
        &self,
        candidates: &[ModelCandidate],
        req: &CompletionRequest,
    ) -> Result<String, Error>;
}
