//! LLMプロバイダのトレイト定義とリクエスト型

use crate::error::Error;
use crate::msg::Turn;
use serde_json::Value;

/// 画像添付（vision モデル用）
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    /// MIME タイプ（例: image/jpeg）
    pub mime: String,
    /// base64 エンコード済みデータ
    pub data_base64: String,
}

impl ImageAttachment {
    pub fn new(mime: impl Into<String>, data_base64: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            data_base64: data_base64.into(),
        }
    }

    /// image_url フィールド用の data URL
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.data_base64)
    }
}

/// 1 回の補完呼び出しのリクエスト（呼び出しごとに組み立て、永続化しない）
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// システムプロンプト（ペルソナ＋日付＋サマリ）
    pub system: Option<String>,
    /// ライブ検索の注入テキスト（履歴の後ろに system ロールで挿入）
    pub live_context: Option<String>,
    /// 直近の会話ターン（送信ウィンドウに切り詰め済み）
    pub history: Vec<Turn>,
    /// 新しいユーザー発話（OCR コンテキストを含む場合あり）
    pub user_text: String,
    /// 画像添付（vision モデル候補にのみ送る）
    pub image: Option<ImageAttachment>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// テキストのみのリクエストに組み直す
    ///
    /// vision 候補から text 候補へフォールバックするとき、画像・履歴・
    /// ライブ文脈を落とし、system とユーザー発話のテキスト部だけを残す。
    pub fn text_only(&self) -> Self {
        Self {
            system: self.system.clone(),
            live_context: None,
            history: Vec::new(),
            user_text: self.user_text.clone(),
            image: None,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// LLMプロバイダのトレイト
///
/// 各プロバイダ（OpenAI互換、Echoなど）はこのトレイトを実装する。
/// モデル名は呼び出しごとに渡す（フォールバックで候補が変わるため）。
pub trait CompletionProvider: Send + Sync {
    /// プロバイダ名を返す
    fn name(&self) -> &str;

    /// リクエストペイロードを生成
    fn make_request_payload(&self, model: &str, req: &CompletionRequest) -> Result<Value, Error>;

    /// HTTPリクエストを実行してレスポンスを取得
    ///
    /// 失敗時は分類済みエラー（RateLimited / ModelUnavailable / Auth / Http）を返す。
    fn make_http_request(&self, request_json: &str) -> Result<String, Error>;

    /// レスポンスからテキストを抽出（存在しない場合は None）
    fn parse_response_text(&self, response_json: &str) -> Result<Option<String>, Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> CompletionRequest {
        CompletionRequest {
            system: Some("persona".to_string()),
            live_context: Some("Real-time Context: sunny".to_string()),
            history: vec![Turn::user("Hi"), Turn::assistant("Hello!")],
            user_text: "[Visual Scan Content: receipt]\n\nWhat is this?".to_string(),
            image: Some(ImageAttachment::new("image/jpeg", "aGVsbG8=")),
            temperature: 0.6,
            max_tokens: 2048,
        }
    }

    #[test]
    fn test_image_attachment_data_url() {
        let img = ImageAttachment::new("image/png", "aA==");
        assert_eq!(img.data_url(), "data:image/png;base64,aA==");
    }

    #[test]
    fn test_text_only_drops_image_history_and_context() {
        let req = sample_request();
        let stripped = req.text_only();
        assert!(stripped.image.is_none());
        assert!(stripped.history.is_empty());
        assert!(stripped.live_context.is_none());
        assert_eq!(stripped.system.as_deref(), Some("persona"));
        assert_eq!(stripped.user_text, req.user_text);
        assert_eq!(stripped.max_tokens, 2048);
    }
}
