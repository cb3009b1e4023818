//! 配線: 標準アダプタで DispatchUseCase を組み立てる

use std::path::PathBuf;
use std::sync::Arc;

use common::adapter::{
    FileJsonLog, NoopLog, SeededRandom, StdClock, StdFileSystem, StdProcess, StdRandom,
};
use common::error::Error;
use common::llm::{build_provider, ModelsConfig};
use common::ports::outbound::{FileSystem, Log, RandomSource};

use crate::adapter::{
    BingImageSearch, DdgLiveSearch, DdgVideoSearch, LlmHistoryCompactor, StdCompletionClient,
    TesseractOcr,
};
use crate::ports::outbound::CompletionClient;
use crate::usecase::{DispatchDeps, DispatchUseCase};

const CONFIG_ENV: &str = "AXON_CONFIG";
const LOG_FILE_ENV: &str = "AXON_LOG_FILE";

/// 配線オプション（CLI 引数から渡す）
#[derive(Debug, Clone, Default)]
pub struct WiringOptions {
    pub config_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

/// 配線で組み立てたアプリケーション
pub struct App {
    pub dispatch_use_case: DispatchUseCase,
}

/// モデル設定を解決する
///
/// 優先順位: --config → $AXON_CONFIG → 組み込み既定値。
/// 明示されたパスが読めない・不正な JSON の場合はエラーにする。
fn resolve_models_config(
    fs: &Arc<dyn FileSystem>,
    config_path: Option<&PathBuf>,
) -> Result<ModelsConfig, Error> {
    let path = config_path
        .cloned()
        .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));
    match path {
        Some(path) => {
            let json = fs.read_to_string(&path)?;
            ModelsConfig::parse(&json).map_err(|e| {
                Error::invalid_argument(format!("invalid config {}: {}", path.display(), e))
            })
        }
        None => Ok(ModelsConfig::default()),
    }
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_axon(options: &WiringOptions) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);

    let log_path = options
        .log_file
        .clone()
        .or_else(|| std::env::var(LOG_FILE_ENV).ok().map(PathBuf::from));
    let logger: Arc<dyn Log> = match log_path {
        Some(path) => Arc::new(FileJsonLog::new(Arc::clone(&fs), path)),
        None => Arc::new(NoopLog),
    };

    let models = resolve_models_config(&fs, options.config_path.as_ref())?;

    let random: Arc<dyn RandomSource> = match options.seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(StdRandom),
    };

    let provider = build_provider(&models);
    let completion: Arc<dyn CompletionClient> = Arc::new(StdCompletionClient::new(provider));
    let compactor = Arc::new(LlmHistoryCompactor::new(
        Arc::clone(&completion),
        models.summary_model.clone(),
        models.temperature,
    ));
    let ocr = Arc::new(TesseractOcr::new(Arc::new(StdProcess)));

    let deps = DispatchDeps {
        completion,
        compactor,
        live_search: Arc::new(DdgLiveSearch::new()),
        video_search: Arc::new(DdgVideoSearch::new()),
        image_search: Arc::new(BingImageSearch::new()),
        ocr,
        random,
        fs,
        clock: Arc::new(StdClock),
        logger,
        models,
    };

    Ok(App {
        dispatch_use_case: DispatchUseCase::new(deps),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::SessionContext;
    use crate::usecase::DispatchRequest;
    use std::io::Write;

    fn echo_config_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "provider": "echo" }}"#).unwrap();
        file
    }

    #[test]
    fn test_wire_with_echo_config_answers_canned_offline() {
        let config = echo_config_file();
        let app = wire_axon(&WiringOptions {
            config_path: Some(config.path().to_path_buf()),
            seed: Some(1),
            log_file: None,
        })
        .unwrap();

        let mut session = SessionContext::new();
        let res = app.dispatch_use_case.dispatch(
            &mut session,
            &DispatchRequest {
                text: "hello".to_string(),
                image_path: None,
            },
        );
        assert!(res.message.contains("AXON AI"));
    }

    #[test]
    fn test_wire_with_echo_config_completes_without_network() {
        let config = echo_config_file();
        let app = wire_axon(&WiringOptions {
            config_path: Some(config.path().to_path_buf()),
            seed: Some(1),
            log_file: None,
        })
        .unwrap();

        let mut session = SessionContext::new();
        let res = app.dispatch_use_case.dispatch(
            &mut session,
            &DispatchRequest {
                text: "explain lifetimes".to_string(),
                image_path: None,
            },
        );
        assert!(res.message.contains("Echo Provider"));
        assert_eq!(session.history.len(), 2);
    }

    #[test]
    fn test_wire_with_missing_explicit_config_fails() {
        let result = wire_axon(&WiringOptions {
            config_path: Some(PathBuf::from("/nonexistent/axon.json")),
            seed: None,
            log_file: None,
        });
        assert!(result.is_err());
    }
}
