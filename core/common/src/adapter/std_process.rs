//! 標準サブプロセス実行（std::process::Command を委譲）

use crate::error::Error;
use crate::ports::outbound::{Process, ProcessOutput};
use std::path::Path;

/// 標準ライブラリの Command を使う Process 実装
#[derive(Debug, Clone, Default)]
pub struct StdProcess;

impl Process for StdProcess {
    fn run_capture(&self, program: &Path, args: &[String]) -> Result<ProcessOutput, Error> {
        let output = std::process::Command::new(program)
            .args(args)
            .output()
            .map_err(|e| {
                Error::io_msg(format!("Failed to execute '{}': {}", program.display(), e))
            })?;
        Ok(ProcessOutput {
            code: output.status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
