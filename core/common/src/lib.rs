//! AXON共通ライブラリ
//!
//! ディスパッチエンジン（`axon`）と共有される機能を提供します。

/// エラーハンドリング
pub mod error;

/// 型付き会話ターン（Turn）
pub mod msg;

/// LLMプロバイダとフォールバッククライアント
pub mod llm;

/// Outbound ポート（trait）
pub mod ports;

/// 標準アダプタ実装
pub mod adapter;

/// Base64エンコード（vision ペイロード用）
pub mod base64;
