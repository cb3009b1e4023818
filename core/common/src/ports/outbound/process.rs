//! サブプロセス実行 Outbound ポート
//!
//! OCR（tesseract）等の外部コマンドを usecase から隔離して実行する。

use crate::error::Error;
use std::path::Path;

/// サブプロセスの実行結果
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// サブプロセス実行の抽象（Outbound ポート）
pub trait Process: Send + Sync {
    /// コマンドを実行し、標準出力を取り込んで返す
    fn run_capture(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, Error>;
}
