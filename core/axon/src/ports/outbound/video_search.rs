//! 動画検索 Outbound ポート

/// 動画検索の 1 件分の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoResult {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// 最初の動画検索結果を取得する。見つからない・失敗時は None。
pub trait VideoSearch: Send + Sync {
    fn search(&self, query: &str) -> Option<VideoResult>;
}
