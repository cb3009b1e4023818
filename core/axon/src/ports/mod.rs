//! ポート定義（usecase とアダプタの境界）

pub mod outbound;
