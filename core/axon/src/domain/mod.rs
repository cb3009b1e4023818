//! ドメイン層（純粋ロジック、I/O なし）

pub mod canned;
pub mod command;
pub mod game;
pub mod session;
