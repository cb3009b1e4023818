//! Outbound ポート（usecase から見た外側への trait）

pub mod compaction;
pub mod completion;
pub mod image_search;
pub mod live_search;
pub mod ocr;
pub mod video_search;

pub use compaction::CompactionStrategy;
pub use completion::CompletionClient;
pub use image_search::ImageSearch;
pub use live_search::LiveSearch;
pub use ocr::OcrExtract;
pub use video_search::{VideoResult, VideoSearch};
