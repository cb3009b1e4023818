//! エラーハンドリング
//!
//! プロバイダエラーは明示的な種別タグで分類する。フォールバックループは
//! メッセージ文字列ではなくこのタグを検査して継続/中断を決める。

/// 共通エラー型
///
/// `RateLimited` / `ModelUnavailable` は一時的エラー（次の候補モデルで
/// リトライ可能）、それ以外は致命的エラーとして扱う。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// レート制限（HTTP 429）
    #[error("rate limited: {0}")]
    RateLimited(String),
    /// モデル廃止・利用不可（HTTP 400 / model_decommissioned）
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
    /// 認証・設定エラー（HTTP 401/403 など）
    #[error("authentication failed: {0}")]
    Auth(String),
    /// その他の HTTP エラー
    #[error("HTTP error: {0}")]
    Http(String),
    /// JSON の生成・解析エラー
    #[error("JSON error: {0}")]
    Json(String),
    /// I/O エラー
    #[error("I/O error: {0}")]
    Io(String),
    /// 引数不正エラー
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub fn http(msg: impl Into<String>) -> Self {
        Error::Http(msg.into())
    }

    pub fn json(msg: impl Into<String>) -> Self {
        Error::Json(msg.into())
    }

    pub fn io_msg(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// 別の候補モデルで成功が見込めるエラーか
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::RateLimited(_) | Error::ModelUnavailable(_))
    }

    /// 引数不正か（usage 表示用）
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// プロセス終了コード（sysexits 準拠）
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidArgument(_) => 64,
            Error::Auth(_) => 70,
            _ => 74,
        }
    }
}

/// HTTP レスポンスからエラー種別を分類する
///
/// 分類規則: 429 → RateLimited、400 または本文に `model_decommissioned` →
/// ModelUnavailable、401/403 → Auth、それ以外 → Http。
pub fn classify_http_error(status: u16, message: &str) -> Error {
    if status == 429 {
        return Error::RateLimited(message.to_string());
    }
    if status == 400 || message.contains("model_decommissioned") {
        return Error::ModelUnavailable(message.to_string());
    }
    if status == 401 || status == 403 {
        return Error::Auth(message.to_string());
    }
    Error::Http(format!("HTTP {}: {}", status, message))
}
