//! ライブ検索 Outbound ポート

/// 話題性キーワード検出時に注入する短い検索結果テキストを取得する
///
/// ベストエフォート。失敗時はエラーを注釈した文字列を返し、Err にはしない。
pub trait LiveSearch: Send + Sync {
    fn search(&self, query: &str) -> String;
}
