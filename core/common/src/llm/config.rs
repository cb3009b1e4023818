//! モデル設定（config.json）
//!
//! プロバイダ種別・エンドポイント・フォールバック候補チェーンを解決するための構造体。
//! 省略時は Groq の既定値を使う。

use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";
const DEFAULT_PRIMARY_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_FAST_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_LAST_RESORT_MODEL: &str = "mixtral-8x7b-32768";
const DEFAULT_VISION_MODEL: &str = "llama-3.2-90b-vision-preview";
const DEFAULT_TEMPERATURE: f64 = 0.6;
const DEFAULT_MAX_TOKENS: u32 = 2048;

/// フォールバックチェーンの 1 候補
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCandidate {
    pub name: String,
    /// vision 対応モデルか（画像付きペイロードを送ってよいか）
    pub vision: bool,
}

impl ModelCandidate {
    /// モデル名から候補を作る（名前に "vision" を含めば vision 対応とみなす）
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let vision = name.contains("vision");
        Self { name, vision }
    }
}

/// JSON の "provider" で使うプロバイダ種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderTypeKind {
    OpenaiCompat,
    Echo,
}

impl ProviderTypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenaiCompat => "openai_compat",
            Self::Echo => "echo",
        }
    }
}

/// モデル設定のルート
#[derive(Debug, Clone)]
pub struct ModelsConfig {
    /// プロバイダ種別: openai_compat | echo
    pub provider: ProviderTypeKind,
    /// API のベース URL（省略時は Groq）
    pub base_url: String,
    /// API キーを読む環境変数名
    pub api_key_env: String,
    /// テキスト補完のフォールバック候補（先頭が第一候補）
    pub text_chain: Vec<String>,
    /// 画像添付時に先頭に置く vision モデル
    pub vision_model: String,
    /// 履歴サマリ生成に使うモデル
    pub summary_model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            provider: ProviderTypeKind::OpenaiCompat,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            text_chain: vec![
                DEFAULT_PRIMARY_MODEL.to_string(),
                DEFAULT_FAST_MODEL.to_string(),
                DEFAULT_LAST_RESORT_MODEL.to_string(),
            ],
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            summary_model: DEFAULT_FAST_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// serde 用の内部構造（全フィールド省略可）
#[derive(Debug, Deserialize)]
struct ModelsConfigRaw {
    provider: Option<ProviderTypeKindSerde>,
    base_url: Option<String>,
    api_key_env: Option<String>,
    #[serde(alias = "models")]
    text_chain: Option<Vec<String>>,
    vision_model: Option<String>,
    summary_model: Option<String>,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ProviderTypeKindSerde {
    #[serde(rename = "openai_compat", alias = "groq")]
    OpenaiCompat,
    Echo,
}

impl From<ProviderTypeKindSerde> for ProviderTypeKind {
    fn from(s: ProviderTypeKindSerde) -> Self {
        match s {
            ProviderTypeKindSerde::OpenaiCompat => ProviderTypeKind::OpenaiCompat,
            ProviderTypeKindSerde::Echo => ProviderTypeKind::Echo,
        }
    }
}

impl ModelsConfig {
    /// JSON 文字列からパース（ファイル読みは呼び出し側で行う）。
    /// 省略されたフィールドは既定値で埋める。
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: ModelsConfigRaw = serde_json::from_str(json)?;
        let defaults = Self::default();
        Ok(Self {
            provider: raw.provider.map(Into::into).unwrap_or(defaults.provider),
            base_url: raw.base_url.unwrap_or(defaults.base_url),
            api_key_env: raw.api_key_env.unwrap_or(defaults.api_key_env),
            text_chain: raw
                .text_chain
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.text_chain),
            vision_model: raw.vision_model.unwrap_or(defaults.vision_model),
            summary_model: raw.summary_model.unwrap_or(defaults.summary_model),
            temperature: raw.temperature.unwrap_or(defaults.temperature),
            max_tokens: raw.max_tokens.unwrap_or(defaults.max_tokens),
        })
    }

    /// テキスト入力用の候補リスト
    pub fn text_candidates(&self) -> Vec<ModelCandidate> {
        self.text_chain
            .iter()
            .map(ModelCandidate::from_name)
            .collect()
    }

    /// 画像添付時の候補リスト（vision モデルを先頭に置き、text チェーンへ降格可能）
    pub fn vision_candidates(&self) -> Vec<ModelCandidate> {
        let mut candidates = vec![ModelCandidate::from_name(&self.vision_model)];
        candidates.extend(self.text_candidates());
        candidates
    }
}
