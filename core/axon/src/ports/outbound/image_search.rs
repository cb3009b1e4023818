//! 画像検索 Outbound ポート

/// 最適化済みクエリで画像 URL のリストを取得する。空もあり得る。
pub trait ImageSearch: Send + Sync {
    fn search(&self, query: &str) -> Vec<String>;
}
