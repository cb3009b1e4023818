//! コマンド分類
//!
//! 生テキストを 1 パスでタグ付き Command に分類する。判定は先勝ちで、
//! 並び順がそのまま優先順位になる（usecase 側の match はこの列挙に従う）。

/// 画像コマンドの起動フレーズ（部分一致で判定する）
const IMAGE_TRIGGERS: [&str; 10] = [
    "/image",
    "/img",
    "give me an image of",
    "give me img",
    "show me a picture of",
    "show me an image of",
    "fetch me image of",
    "show me img",
    "search for an image of",
    "generate an image of",
];

/// 画像クエリから除去するストップワード
const IMAGE_STOPWORDS: [&str; 9] = ["search", "for", "me", "find", "please", "of", "a", "an", "the"];

/// 動画クエリの先頭から 1 回だけ剥がすつなぎ語
const VIDEO_FILLERS: [&str; 3] = ["of ", "a ", "an "];

/// ライブ検索を起動する話題性キーワード
pub const SEARCH_TRIGGERS: [&str; 5] = ["news", "weather", "today", "current", "latest"];

/// 分類済みコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// /clear: 履歴・サマリ・ゲームをリセット
    Reset,
    /// /functions, /help: 機能一覧
    Help,
    Joke,
    Quote,
    Tip,
    /// /intro, /welcome
    Intro,
    Greeting,
    Status,
    Thanks,
    Farewell,
    Video { query: String },
    Image { subject: String },
    Open { target: String },
    StartTicTacToe,
    StartGuessNumber,
    /// 進行中ゲームへの数値入力
    GameMove(i64),
    /// 資格情報らしきテキスト。モデルには渡さない
    SecurityBlock,
    /// どれにも該当しない入力。LLM 補完へ
    Completion,
}

/// テキストを Command に分類する（先勝ち）
pub fn classify(text: &str, game_active: bool) -> Command {
    let lower = text.to_lowercase();
    let lower = lower.trim();

    if lower.starts_with("/clear") {
        return Command::Reset;
    }
    if lower.starts_with("/functions") || lower.starts_with("/help") {
        return Command::Help;
    }
    if lower.starts_with("/joke") {
        return Command::Joke;
    }
    if lower.starts_with("/quote") {
        return Command::Quote;
    }
    if lower.starts_with("/intro") || lower.starts_with("/welcome") {
        return Command::Intro;
    }
    if lower.starts_with("/tip") {
        return Command::Tip;
    }

    match lower {
        "hello" | "hi" | "hey" | "hola" | "greetings" => return Command::Greeting,
        "how are you" | "how are you doing" | "how's it going" => return Command::Status,
        "thank you" | "thanks" | "thx" | "appreciate it" => return Command::Thanks,
        "bye" | "goodbye" | "exit" | "see ya" => return Command::Farewell,
        _ => {}
    }

    if lower.starts_with("/video") || lower.starts_with("/vid") || lower.contains("show me a video for")
    {
        return Command::Video {
            query: video_query(lower),
        };
    }

    if IMAGE_TRIGGERS.iter().any(|t| lower.contains(t)) {
        return Command::Image {
            subject: image_subject(lower),
        };
    }

    if lower.starts_with("open ") {
        return Command::Open {
            target: text.trim()[5..].trim().to_string(),
        };
    }

    if lower == "/tictactoe" || lower.contains("play tictactoe") {
        return Command::StartTicTacToe;
    }
    if lower == "/guessnumber" || lower.contains("play guess number") {
        return Command::StartGuessNumber;
    }

    if game_active && !lower.is_empty() && lower.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = lower.parse::<i64>() {
            return Command::GameMove(n);
        }
    }

    if lower.contains("gsk_") || lower.contains("api key") {
        return Command::SecurityBlock;
    }

    Command::Completion
}

/// 動画コマンドの残りからクエリを抜き出す
fn video_query(lower: &str) -> String {
    let mut query = lower
        .replace("/video", "")
        .replace("/vid", "")
        .replace("show me a video for", "")
        .trim()
        .to_string();
    for filler in VIDEO_FILLERS {
        if let Some(rest) = query.strip_prefix(filler) {
            query = rest.trim().to_string();
        }
    }
    query
}

/// 画像コマンドの残りから被写体を抜き出す（トリガーとストップワードを除去）
fn image_subject(lower: &str) -> String {
    let mut raw = lower.to_string();
    for trigger in IMAGE_TRIGGERS {
        raw = raw.replace(trigger, "");
    }
    raw.split_whitespace()
        .filter(|w| !IMAGE_STOPWORDS.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}
