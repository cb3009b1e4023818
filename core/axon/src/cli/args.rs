//! コマンドライン引数

use clap::Parser;
use common::error::Error;
use std::path::PathBuf;

/// AXON: 会話ディスパッチエンジン
///
/// -m/--message（または -i/--image）指定時はワンショット実行、
/// 省略時は対話 REPL を起動する。
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(
    name = "axon",
    about = "Conversational assistant with command routing, mini games, and multi-model LLM fallback"
)]
pub struct Args {
    /// Send one message and exit (omit to start the interactive REPL)
    #[arg(short, long, value_name = "text")]
    pub message: Option<String>,

    /// Attach an image to the message (OCR context + vision model chain)
    #[arg(short, long, value_name = "path")]
    pub image: Option<PathBuf>,

    /// Models config JSON (default: $AXON_CONFIG, else built-in defaults)
    #[arg(short, long, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Fix the random seed (canned-reply picks and game randomness)
    #[arg(long, value_name = "n")]
    pub seed: Option<u64>,

    /// Append structured JSONL logs to this file (default: $AXON_LOG_FILE)
    #[arg(long, value_name = "path")]
    pub log_file: Option<PathBuf>,
}

/// コマンドラインを解析する（clap のエラーは usage エラーに変換）
///
/// --help / --version は clap に表示させてそのまま終了する。
pub fn parse_args() -> Result<Args, Error> {
    match Args::try_parse() {
        Ok(args) => Ok(args),
        Err(e)
            if matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            e.exit()
        }
        Err(e) => Err(Error::invalid_argument(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_repl() {
        let args = Args::try_parse_from(["axon"]).unwrap();
        assert_eq!(args, Args::default());
    }

    #[test]
    fn test_parse_one_shot_with_image() {
        let args =
            Args::try_parse_from(["axon", "-m", "what is this", "-i", "/tmp/r.jpg"]).unwrap();
        assert_eq!(args.message.as_deref(), Some("what is this"));
        assert_eq!(args.image, Some(PathBuf::from("/tmp/r.jpg")));
    }

    #[test]
    fn test_parse_seed_and_config() {
        let args =
            Args::try_parse_from(["axon", "--seed", "7", "--config", "/etc/axon.json"]).unwrap();
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.config, Some(PathBuf::from("/etc/axon.json")));
    }

    #[test]
    fn test_parse_rejects_unknown_flag() {
        assert!(Args::try_parse_from(["axon", "--bogus"]).is_err());
    }
}
