//! ディスパッチ UseCase
//!
//! 1 リクエストのテキスト（と任意の画像添付）を分類し、定型応答・ゲーム・
//! LLM 補完のいずれかで必ず応答を返す。この UseCase は Err を返さない。
//! エラーはすべてメッセージ文字列へ畳み込む。

use crate::domain::canned;
use crate::domain::command::{classify, Command, SEARCH_TRIGGERS};
use crate::domain::game::{
    render_board, GameState, GuessNumberGame, GuessOutcome, TicTacToeGame, TicTacToeOutcome,
};
use crate::domain::session::SessionContext;
use crate::ports::outbound::{
    CompactionStrategy, CompletionClient, ImageSearch, LiveSearch, OcrExtract, VideoSearch,
};
use chrono::TimeZone;
use common::llm::{CompletionRequest, ImageAttachment, ModelsConfig};
use common::ports::outbound::{Clock, FileSystem, Log, LogLevel, LogRecord, RandomSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 補完リクエストに載せる直近ターン数
const HISTORY_WINDOW: usize = 15;
/// 動画説明文の切り詰め長（文字数）
const VIDEO_DESCRIPTION_CHARS: usize = 150;

const PERSONA: &str = "You are AXON AI, a cutting-edge artificial intelligence. You are highly sophisticated, witty, and possess immense knowledge across all domains.";

const PROTOCOLS: &str = "OPERATIONAL PROTOCOLS:\n\
1. **Intelligence**: Provide deep, nuanced, and detailed responses. Break down complex topics into digestible structured lists or tables.\n\
2. **Visual Command**: If the user wants to SEE something, guide them to use your built-in tools, e.g. \"To see an image, try saying '/img [topic]'\".\n\
3. **Coding**: When asked to generate code, provide fully working, complete, and runnable solutions with all necessary imports. Zero placeholders.\n\
4. **Markdown**: Use professional Markdown with code blocks, bold emphasis, and structured tables.\n\
5. **Persona**: You are AXON AI, an elite digital companion and expert coding assistant. If a user asks for code, output the code immediately and keep explanations brief.";

/// トランスポート層へ渡す実行指示（この UseCase は実行しない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ClearSession,
    Open { target: String },
}

#[derive(Debug, Clone, Default)]
pub struct DispatchRequest {
    pub text: String,
    pub image_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResponse {
    pub message: String,
    pub action: Option<Action>,
}

impl DispatchResponse {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            action: None,
        }
    }

    fn with_action(message: impl Into<String>, action: Action) -> Self {
        Self {
            message: message.into(),
            action: Some(action),
        }
    }
}

/// ディスパッチが依存するポート群（配線で組み立てる）
pub struct DispatchDeps {
    pub completion: Arc<dyn CompletionClient>,
    pub compactor: Arc<dyn CompactionStrategy>,
    pub live_search: Arc<dyn LiveSearch>,
    pub video_search: Arc<dyn VideoSearch>,
    pub image_search: Arc<dyn ImageSearch>,
    pub ocr: Arc<dyn OcrExtract>,
    pub random: Arc<dyn RandomSource>,
    pub fs: Arc<dyn FileSystem>,
    pub clock: Arc<dyn Clock>,
    pub logger: Arc<dyn Log>,
    pub models: ModelsConfig,
}

pub struct DispatchUseCase {
    deps: DispatchDeps,
}

impl DispatchUseCase {
    pub fn new(deps: DispatchDeps) -> Self {
        Self { deps }
    }

    /// 1 リクエストを処理して応答を返す（決して失敗しない）
    pub fn dispatch(&self, session: &mut SessionContext, req: &DispatchRequest) -> DispatchResponse {
        let text = req.text.trim();

        if text.is_empty() && req.image_path.is_none() {
            return DispatchResponse::message(canned::EMPTY_INPUT);
        }

        let command = classify(text, session.game.is_some());
        self.log_classified(kind_of(&command));

        match command {
            Command::Reset => {
                session.reset();
                DispatchResponse::with_action(canned::RESET_ACK, Action::ClearSession)
            }
            Command::Help => DispatchResponse::message(canned::HELP),
            Command::Joke => DispatchResponse::message(format!("🤖 {}", self.pick(&canned::JOKES))),
            Command::Quote => {
                DispatchResponse::message(format!("✨ \"{}\"", self.pick(&canned::QUOTES)))
            }
            Command::Tip => {
                DispatchResponse::message(format!("💡 **Pro Tip:** {}", self.pick(&canned::TIPS)))
            }
            Command::Intro => DispatchResponse::message(canned::INTRO),
            Command::Greeting => DispatchResponse::message(canned::GREETING),
            Command::Status => DispatchResponse::message(canned::STATUS),
            Command::Thanks => DispatchResponse::message(canned::THANKS),
            Command::Farewell => DispatchResponse::message(canned::FAREWELL),
            Command::Video { query } => self.handle_video(&query),
            Command::Image { subject } => self.handle_image(&subject),
            Command::Open { target } => DispatchResponse::with_action(
                format!("Opening {}! 🛰️", capitalize(&target)),
                Action::Open { target },
            ),
            Command::StartTicTacToe => {
                let game = TicTacToeGame::new();
                let board = render_board(&game.board);
                session.game = Some(GameState::TicTacToe(game));
                DispatchResponse::message(format!(
                    "{}\n\n{}\n\nEnter a position (**1-9**) to make your move.",
                    canned::TICTACTOE_START,
                    board
                ))
            }
            Command::StartGuessNumber => {
                session.game = Some(GameState::GuessNumber(GuessNumberGame::new(
                    self.deps.random.as_ref(),
                )));
                DispatchResponse::message(canned::GUESS_NUMBER_START)
            }
            Command::GameMove(n) => self.handle_game_move(session, n, text, req),
            Command::SecurityBlock => DispatchResponse::message(canned::SECURITY_DENIAL),
            Command::Completion => {
                self.handle_completion(session, text, req.image_path.as_deref())
            }
        }
    }

    fn pick<'a>(&self, pool: &[&'a str]) -> &'a str {
        pool[self.deps.random.pick_index(pool.len())]
    }

    fn handle_video(&self, query: &str) -> DispatchResponse {
        if query.is_empty() {
            return DispatchResponse::message(canned::VIDEO_GUIDANCE);
        }
        match self.deps.video_search.search(query) {
            Some(video) => {
                let description: String = video
                    .description
                    .chars()
                    .take(VIDEO_DESCRIPTION_CHARS)
                    .collect();
                DispatchResponse::message(format!(
                    "I found a tutorial for **{}**:\n\n**{}**\n{}\n\n{}...",
                    query, video.title, video.url, description
                ))
            }
            None => DispatchResponse::message(format!(
                "I couldn't find a video for '**{}**' right now. 😕",
                query
            )),
        }
    }

    /// 画像コマンドの 3 段パイプライン
    ///
    /// クエリ最適化 → シネマティックな説明文生成 → 画像検索。前半 2 段は
    /// 失敗時に定型文へ個別にフォールバックし、パイプライン全体は止めない。
    fn handle_image(&self, subject: &str) -> DispatchResponse {
        if subject.is_empty() {
            return DispatchResponse::message(canned::IMAGE_GUIDANCE);
        }

        let optimized = self.optimize_image_query(subject);
        let description = self.describe_image_subject(subject);
        let urls = self.deps.image_search.search(&optimized);

        match pick_best_url(&urls) {
            Some(url) => DispatchResponse::message(format!(
                "🖼️ {}\n\n**Neural Scan Description:** {}",
                url, description
            )),
            None => DispatchResponse::message(format!(
                "My neural net couldn't locate a stable visual stream for '**{}**'. Please try refining the subject parameters.",
                subject
            )),
        }
    }

    fn optimize_image_query(&self, subject: &str) -> String {
        let req = CompletionRequest {
            system: Some(
                "Return ONLY the subject and 3-4 professional keywords (e.g. 'official artwork', 'high resolution', 'pinterest') optimized for ultra-high-quality image search. No intro, no chat."
                    .to_string(),
            ),
            live_context: None,
            history: Vec::new(),
            user_text: format!("Optimize search keywords for: {}", subject),
            image: None,
            temperature: self.deps.models.temperature,
            max_tokens: 40,
        };
        match self
            .deps
            .completion
            .complete(&self.deps.models.text_candidates(), &req)
        {
            Ok(optimized) => optimized,
            Err(e) => {
                self.log(
                    LogLevel::Warn,
                    "image",
                    format!("query optimization failed: {}", e),
                );
                format!("{} high quality official artwork pinterest", subject)
            }
        }
    }

    fn describe_image_subject(&self, subject: &str) -> String {
        let req = CompletionRequest {
            system: Some(
                "Generate a single, cinematic, and highly descriptive sentence for an image of this subject. Focus on lighting, mood, and detail. No intro."
                    .to_string(),
            ),
            live_context: None,
            history: Vec::new(),
            user_text: format!("Subject: {}", subject),
            image: None,
            temperature: self.deps.models.temperature,
            max_tokens: 80,
        };
        match self
            .deps
            .completion
            .complete(&self.deps.models.text_candidates(), &req)
        {
            Ok(description) => description.replace('"', "'"),
            Err(e) => {
                self.log(
                    LogLevel::Warn,
                    "image",
                    format!("description generation failed: {}", e),
                );
                format!(
                    "A high-definition visual of {}, rendered with stunning detail and composition.",
                    subject
                )
            }
        }
    }

    fn handle_game_move(
        &self,
        session: &mut SessionContext,
        n: i64,
        text: &str,
        req: &DispatchRequest,
    ) -> DispatchResponse {
        match session.game.take() {
            Some(GameState::TicTacToe(mut game)) => {
                match game.apply_move(n, self.deps.random.as_ref()) {
                    Ok(TicTacToeOutcome::HumanWins { board }) => DispatchResponse::message(format!(
                        "🎉 **Incredible!** You defeated me.\n\n{}\n\nNeural processors recalibrating... You win!",
                        render_board(&board)
                    )),
                    Ok(TicTacToeOutcome::EngineWins { board }) => DispatchResponse::message(format!(
                        "🤖 **Victory is mine!** Your strategy was logical, but my calculations were absolute.\n\n{}\n\nBetter luck next time.",
                        render_board(&board)
                    )),
                    Ok(TicTacToeOutcome::Draw { board }) => DispatchResponse::message(format!(
                        "🤝 **Stalemate!** A perfect calculation on both sides.\n\n{}\n\nIt's a draw.",
                        render_board(&board)
                    )),
                    Ok(TicTacToeOutcome::Continue { board }) => {
                        session.game = Some(GameState::TicTacToe(game));
                        DispatchResponse::message(format!(
                            "My move! Board updated:\n\n{}\n\nYour turn! Enter a position (**1-9**).",
                            render_board(&board)
                        ))
                    }
                    Err(_) => {
                        session.game = Some(GameState::TicTacToe(game));
                        DispatchResponse::message(canned::INVALID_TICTACTOE_MOVE)
                    }
                }
            }
            Some(GameState::GuessNumber(mut game)) => match game.guess(n) {
                GuessOutcome::Higher { attempts } => {
                    session.game = Some(GameState::GuessNumber(game));
                    DispatchResponse::message(format!("Higher! (Attempt {})", attempts))
                }
                GuessOutcome::Lower { attempts } => {
                    session.game = Some(GameState::GuessNumber(game));
                    DispatchResponse::message(format!("Lower! (Attempt {})", attempts))
                }
                GuessOutcome::Correct { secret, attempts } => DispatchResponse::message(format!(
                    "🎊 **Correct!** The number was **{}**. It took you {} attempts. You have sharp intuition!",
                    secret, attempts
                )),
            },
            // 分類時にはゲームが居たが消えているケース。通常の補完として扱う。
            None => self.handle_completion(session, text, req.image_path.as_deref()),
        }
    }

    fn handle_completion(
        &self,
        session: &mut SessionContext,
        text: &str,
        image_path: Option<&Path>,
    ) -> DispatchResponse {
        let mut image_context = String::new();
        let mut attachment = None;

        if let Some(path) = image_path {
            image_context = self.deps.ocr.extract(path);
            match self.deps.fs.read(path) {
                Ok(bytes) => {
                    attachment = Some(ImageAttachment::new(
                        mime_for(path),
                        common::base64::encode(&bytes),
                    ));
                }
                Err(e) => {
                    self.log(
                        LogLevel::Warn,
                        "image",
                        format!("failed to read attachment: {}", e),
                    );
                }
            }
        }

        let candidates = if attachment.is_some() {
            self.deps.models.vision_candidates()
        } else {
            self.deps.models.text_candidates()
        };

        let lower = text.to_lowercase();
        let live_context = if SEARCH_TRIGGERS.iter().any(|w| lower.contains(w)) {
            let blob = self.deps.live_search.search(text);
            if blob.is_empty() {
                None
            } else {
                Some(format!("Real-time Context: {}", blob))
            }
        } else {
            None
        };

        let user_text = if image_context.is_empty() {
            text.to_string()
        } else {
            format!("{}\n\n{}", image_context, text)
        };

        let req = CompletionRequest {
            system: Some(self.system_prompt(&session.summary)),
            live_context,
            history: session.history_window(HISTORY_WINDOW),
            user_text,
            image: attachment,
            temperature: self.deps.models.temperature,
            max_tokens: self.deps.models.max_tokens,
        };

        match self.deps.completion.complete(&candidates, &req) {
            Ok(message) => {
                session.append_exchange(text, &message);
                self.deps.compactor.compact(session);
                DispatchResponse::message(message)
            }
            Err(e) => {
                self.log(LogLevel::Error, "fallback", format!("chain exhausted: {}", e));
                DispatchResponse::message(format!("Neural Link Failure: {}", e))
            }
        }
    }

    /// ペルソナ＋現在日付＋サマリ（非空のとき）からシステムプロンプトを組む
    fn system_prompt(&self, summary: &str) -> String {
        let mut prompt = format!("{}\n\nCurrent Date: {}\n", PERSONA, self.current_date());
        if !summary.is_empty() {
            prompt.push_str(&format!("Neural Link History Summary: {}\n", summary));
        }
        prompt.push('\n');
        prompt.push_str(PROTOCOLS);
        prompt
    }

    fn current_date(&self) -> String {
        let ms = self.deps.clock.now_ms();
        chrono::Utc
            .timestamp_millis_opt(ms as i64)
            .single()
            .map(|dt| dt.format("%B %d, %Y").to_string())
            .unwrap_or_default()
    }

    fn log(&self, level: LogLevel, kind: &str, message: String) {
        let _ = self.deps.logger.log(&LogRecord {
            ts: common::ports::outbound::now_iso8601(),
            level,
            message,
            layer: Some("usecase".to_string()),
            kind: Some(kind.to_string()),
            fields: None,
        });
    }

    fn log_classified(&self, command_kind: &str) {
        let mut fields = std::collections::BTreeMap::new();
        fields.insert("command".to_string(), serde_json::json!(command_kind));
        let _ = self.deps.logger.log(&LogRecord {
            ts: common::ports::outbound::now_iso8601(),
            level: LogLevel::Debug,
            message: "command classified".to_string(),
            layer: Some("usecase".to_string()),
            kind: Some("dispatch".to_string()),
            fields: Some(fields),
        });
    }
}

/// ログ用のコマンド種別名（クエリ内容は含めない）
fn kind_of(command: &Command) -> &'static str {
    match command {
        Command::Reset => "reset",
        Command::Help => "help",
        Command::Joke => "joke",
        Command::Quote => "quote",
        Command::Tip => "tip",
        Command::Intro => "intro",
        Command::Greeting => "greeting",
        Command::Status => "status",
        Command::Thanks => "thanks",
        Command::Farewell => "farewell",
        Command::Video { .. } => "video",
        Command::Image { .. } => "image",
        Command::Open { .. } => "open",
        Command::StartTicTacToe => "tictactoe",
        Command::StartGuessNumber => "guessnumber",
        Command::GameMove(_) => "game_move",
        Command::SecurityBlock => "security_block",
        Command::Completion => "completion",
    }
}

/// 一般的な画像拡張子で終わる URL を優先し、なければ先頭を使う
fn pick_best_url(urls: &[String]) -> Option<&String> {
    const PREFERRED_EXTS: [&str; 4] = [".png", ".jpg", ".jpeg", ".webp"];
    urls.iter()
        .find(|u| {
            let lower = u.to_lowercase();
            PREFERRED_EXTS.iter().any(|ext| lower.ends_with(ext))
        })
        .or_else(|| urls.first())
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
