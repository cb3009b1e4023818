//! ミニゲームエンジン（Tic-Tac-Toe / 数当て）
//!
//! 純粋な状態機械。I/O は持たず、乱数は RandomSource 経由で注入する。
//! ライフサイクルは 未初期化 → Active → 終局（呼び出し側が状態を破棄）。

use common::error::Error;
use common::ports::outbound::RandomSource;

/// 盤面の 1 マス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    X,
    O,
}

/// 勝利判定に使う 8 本のライン
const WIN_LINES: [(usize, usize, usize); 8] = [
    (0, 1, 2),
    (3, 4, 5),
    (6, 7, 8),
    (0, 3, 6),
    (1, 4, 7),
    (2, 5, 8),
    (0, 4, 8),
    (2, 4, 6),
];

fn is_win(board: &[Cell; 9], player: Cell) -> bool {
    WIN_LINES
        .iter()
        .any(|&(i, j, k)| board[i] == player && board[j] == player && board[k] == player)
}

/// 進行中のゲーム（セッションに保持）
#[derive(Debug, Clone, PartialEq)]
pub enum GameState {
    TicTacToe(TicTacToeGame),
    GuessNumber(GuessNumberGame),
}

/// Tic-Tac-Toe: 人間が X、エンジンが O
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicTacToeGame {
    pub board: [Cell; 9],
}

/// 1 手適用後の結果。終局時は最終盤面を持ち帰る（状態破棄は呼び出し側）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicTacToeOutcome {
    HumanWins { board: [Cell; 9] },
    EngineWins { board: [Cell; 9] },
    Draw { board: [Cell; 9] },
    Continue { board: [Cell; 9] },
}

impl TicTacToeGame {
    pub fn new() -> Self {
        Self {
            board: [Cell::Empty; 9],
        }
    }

    /// 人間の 1 手（1〜9）を適用し、エンジンの応手まで進める
    ///
    /// 範囲外・既着手マスはエラーで、盤面は変更しない。
    /// エンジンの応手の優先順位: 自分のラインを完成 → 人間のラインをブロック →
    /// 空きマスから一様ランダム。フォーク（二重脅威）は検出しない仕様。
    pub fn apply_move(
        &mut self,
        position: i64,
        random: &dyn RandomSource,
    ) -> Result<TicTacToeOutcome, Error> {
        if !(1..=9).contains(&position) {
            return Err(Error::invalid_argument("position out of range"));
        }
        let idx = (position - 1) as usize;
        if self.board[idx] != Cell::Empty {
            return Err(Error::invalid_argument("cell already occupied"));
        }

        self.board[idx] = Cell::X;
        if is_win(&self.board, Cell::X) {
            return Ok(TicTacToeOutcome::HumanWins { board: self.board });
        }

        if let Some(engine_idx) = self.engine_move(random) {
            self.board[engine_idx] = Cell::O;
        }

        if is_win(&self.board, Cell::O) {
            return Ok(TicTacToeOutcome::EngineWins { board: self.board });
        }
        if self.board.iter().all(|&c| c != Cell::Empty) {
            return Ok(TicTacToeOutcome::Draw { board: self.board });
        }
        Ok(TicTacToeOutcome::Continue { board: self.board })
    }

    fn empty_cells(&self) -> Vec<usize> {
        self.board
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    fn engine_move(&self, random: &dyn RandomSource) -> Option<usize> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }
        // 自分のラインを完成できるマス
        for &m in &empty {
            let mut trial = self.board;
            trial[m] = Cell::O;
            if is_win(&trial, Cell::O) {
                return Some(m);
            }
        }
        // 人間のラインをブロックするマス
        for &m in &empty {
            let mut trial = self.board;
            trial[m] = Cell::X;
            if is_win(&trial, Cell::X) {
                return Some(m);
            }
        }
        Some(empty[random.pick_index(empty.len())])
    }
}

impl Default for TicTacToeGame {
    fn default() -> Self {
        Self::new()
    }
}

/// 盤面をテキストで描画する（空きマスは位置番号）
pub fn render_board(board: &[Cell; 9]) -> String {
    let disp: Vec<String> = board
        .iter()
        .enumerate()
        .map(|(i, c)| match c {
            Cell::Empty => (i + 1).to_string(),
            Cell::X => "X".to_string(),
            Cell::O => "O".to_string(),
        })
        .collect();
    format!(
        " {} | {} | {} \n---+---+---\n {} | {} | {} \n---+---+---\n {} | {} | {} ",
        disp[0], disp[1], disp[2], disp[3], disp[4], disp[5], disp[6], disp[7], disp[8]
    )
}

/// 数当て: 秘密の数は [1,100] の一様乱数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessNumberGame {
    secret: i64,
    attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Higher { attempts: u32 },
    Lower { attempts: u32 },
    Correct { secret: i64, attempts: u32 },
}

impl GuessNumberGame {
    pub fn new(random: &dyn RandomSource) -> Self {
        Self {
            secret: random.int_in_range(1, 100),
            attempts: 0,
        }
    }

    #[cfg(test)]
    pub fn with_secret(secret: i64) -> Self {
        Self { secret, attempts: 0 }
    }

    /// 1 回の推測。試行回数を増やし、的中なら終局（状態破棄は呼び出し側）。
    pub fn guess(&mut self, n: i64) -> GuessOutcome {
        self.attempts += 1;
        if n < self.secret {
            GuessOutcome::Higher {
                attempts: self.attempts,
            }
        } else if n > self.secret {
            GuessOutcome::Lower {
                attempts: self.attempts,
            }
        } else {
            GuessOutcome::Correct {
                secret: self.secret,
                attempts: self.attempts,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::SeededRandom;

    fn count(board: &[Cell; 9], player: Cell) -> usize {
        board.iter().filter(|&&c| c == player).count()
    }

    #[test]
    fn test_mark_counts_stay_balanced() {
        // どの乱数系列でも、エンジン応手後に X が O を 2 つ以上上回らない
        for seed in 0..20 {
            let random = SeededRandom::new(seed);
            let mut game = TicTacToeGame::new();
            for pos in 1..=9 {
                if game.board[(pos - 1) as usize] != Cell::Empty {
                    continue;
                }
                let outcome = game.apply_move(pos, &random).unwrap();
                let board = match &outcome {
                    TicTacToeOutcome::HumanWins { board }
                    | TicTacToeOutcome::EngineWins { board }
                    | TicTacToeOutcome::Draw { board }
                    | TicTacToeOutcome::Continue { board } => board,
                };
                let x = count(board, Cell::X);
                let o = count(board, Cell::O);
                assert!(x >= o && x - o <= 1, "x={} o={} seed={}", x, o, seed);
                if !matches!(outcome, TicTacToeOutcome::Continue { .. }) {
                    break;
                }
            }
        }
    }

    #[test]
    fn test_occupied_cell_rejected_without_mutation() {
        let random = SeededRandom::new(1);
        let mut game = TicTacToeGame::new();
        game.apply_move(5, &random).unwrap();
        let snapshot = game.board;
        assert!(game.apply_move(5, &random).is_err());
        assert_eq!(game.board, snapshot);
    }

    #[test]
    fn test_out_of_range_rejected_without_mutation() {
        let random = SeededRandom::new(1);
        let mut game = TicTacToeGame::new();
        let snapshot = game.board;
        assert!(game.apply_move(0, &random).is_err());
        assert!(game.apply_move(10, &random).is_err());
        assert_eq!(game.board, snapshot);
    }

    #[test]
    fn test_engine_completes_own_line() {
        // O O _ の行があれば、エンジンは 3 マス目（index 2）で勝ち切る
        let random = SeededRandom::new(1);
        let mut game = TicTacToeGame::new();
        game.board = [
            Cell::O,
            Cell::O,
            Cell::Empty,
            Cell::X,
            Cell::X,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
        ];
        // 人間は 9 を選ぶ（X のリーチは 6 だが、エンジンは自分の勝ちを優先する）
        let outcome = game.apply_move(9, &random).unwrap();
        assert!(matches!(outcome, TicTacToeOutcome::EngineWins { .. }));
        assert_eq!(game.board[2], Cell::O);
    }

    #[test]
    fn test_engine_blocks_human_line() {
        // エンジンに勝ち筋がなく、人間が X X _ でリーチなら index 2 をブロック
        let random = SeededRandom::new(1);
        let mut game = TicTacToeGame::new();
        game.board = [
            Cell::X,
            Cell::X,
            Cell::Empty,
            Cell::O,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
        ];
        let outcome = game.apply_move(8, &random).unwrap();
        assert!(matches!(outcome, TicTacToeOutcome::Continue { .. }));
        assert_eq!(game.board[2], Cell::O);
    }

    #[test]
    fn test_human_win_is_terminal() {
        let random = SeededRandom::new(1);
        let mut game = TicTacToeGame::new();
        game.board = [
            Cell::X,
            Cell::X,
            Cell::Empty,
            Cell::O,
            Cell::O,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
        ];
        // ブロックされる前に人間が自分で 3 を取って勝つケース
        let outcome = game.apply_move(3, &random).unwrap();
        assert!(matches!(outcome, TicTacToeOutcome::HumanWins { .. }));
    }

    #[test]
    fn test_guess_number_higher_lower_correct() {
        let mut game = GuessNumberGame::with_secret(42);
        assert_eq!(game.guess(41), GuessOutcome::Higher { attempts: 1 });
        assert_eq!(game.guess(43), GuessOutcome::Lower { attempts: 2 });
        assert_eq!(
            game.guess(42),
            GuessOutcome::Correct {
                secret: 42,
                attempts: 3
            }
        );
    }

    #[test]
    fn test_guess_number_secret_in_range() {
        for seed in 0..50 {
            let random = SeededRandom::new(seed);
            let mut game = GuessNumberGame::new(&random);
            // 1..=100 の範囲なら 0 と 101 は必ず Higher/Lower になる
            assert!(matches!(game.guess(0), GuessOutcome::Higher { .. }));
            assert!(matches!(game.guess(101), GuessOutcome::Lower { .. }));
        }
    }

    #[test]
    fn test_render_board_shows_positions_and_marks() {
        let mut board = [Cell::Empty; 9];
        board[0] = Cell::X;
        board[4] = Cell::O;
        let text = render_board(&board);
        assert!(text.contains(" X | 2 | 3 "));
        assert!(text.contains(" 4 | O | 6 "));
        assert!(text.contains("---+---+---"));
    }
}
