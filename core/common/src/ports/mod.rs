//! ポート定義（Outbound）

pub mod outbound;
