//! 履歴コンパクション Outbound ポート

use crate::domain::session::SessionContext;

/// 履歴コンパクションの抽象
///
/// user/assistant ペアの追加直後に呼び出す。閾値に達していなければ
/// 何もしない。ベストエフォートであり、失敗してもセッションは壊さない。
pub trait CompactionStrategy: Send + Sync {
    fn compact(&self, session: &mut SessionContext);
}
