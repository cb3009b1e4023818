//! tesseract OCR アダプタ
//!
//! tesseract コマンドをサブプロセスとして起動してテキストを抽出する。
//! コマンド不在・失敗・空出力のときは固定のプレースホルダを返す。

use crate::ports::outbound::OcrExtract;
use common::ports::outbound::Process;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_COMMAND: &str = "tesseract";
const COMMAND_ENV: &str = "TESSERACT_PATH";
pub const OCR_PLACEHOLDER: &str = "[Scanning image for visual features and metadata...]";

pub struct TesseractOcr {
    process: Arc<dyn Process>,
    command: PathBuf,
}

impl TesseractOcr {
    /// TESSERACT_PATH 環境変数があればそのコマンドを使う
    pub fn new(process: Arc<dyn Process>) -> Self {
        let command = std::env::var(COMMAND_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_COMMAND));
        Self { process, command }
    }

    pub fn with_command(process: Arc<dyn Process>, command: impl Into<PathBuf>) -> Self {
        Self {
            process,
            command: command.into(),
        }
    }
}

impl OcrExtract for TesseractOcr {
    fn extract(&self, path: &Path) -> String {
        let args = vec![path.to_string_lossy().into_owned(), "stdout".to_string()];
        match self.process.run_capture(&self.command, &args) {
            Ok(output) if output.success() && !output.stdout.trim().is_empty() => {
                format!("[Visual Scan Content: {}]", output.stdout.trim())
            }
            _ => OCR_PLACEHOLDER.to_string(),
        }
    }
}
