//! 乱数 Outbound ポート
//!
//! 定型返答の抽選・ゲームエンジンのタイブレーク・秘密の数の生成を
//! この trait 経由にして、テストでシード固定の実装に差し替え可能にする。

/// 一様乱数の抽象
///
/// 実装は `common::adapter::StdRandom`（thread_rng）やテスト用の
/// `common::adapter::SeededRandom` など。
pub trait RandomSource: Send + Sync {
    /// `[0, n)` の一様乱数。`n` は 1 以上であること。
    fn pick_index(&self, n: usize) -> usize;

    /// `[lo, hi]`（両端含む）の一様乱数
    fn int_in_range(&self, lo: i64, hi: i64) -> i64;
}
