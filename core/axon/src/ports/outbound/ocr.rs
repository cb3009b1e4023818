//! OCR Outbound ポート

use std::path::Path;

/// 画像からテキストを抽出する
///
/// ベストエフォート。バックエンド不在や失敗時は固定のプレースホルダ文字列を
/// 返し、決して Err にしない。
pub trait OcrExtract: Send + Sync {
    fn extract(&self, path: &Path) -> String;
}
