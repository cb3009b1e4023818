//! CLI 境界（引数解析）

pub mod args;

pub use args::parse_args;
