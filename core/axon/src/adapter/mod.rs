//! Outbound ポートの実装（ネットワーク・サブプロセス・LLM）

pub mod bing_image_search;
pub mod ddg_live_search;
pub mod ddg_video_search;
pub mod llm_compactor;
pub mod std_completion;
pub mod tesseract_ocr;

pub use bing_image_search::BingImageSearch;
pub use ddg_live_search::DdgLiveSearch;
pub use ddg_video_search::DdgVideoSearch;
pub use llm_compactor::LlmHistoryCompactor;
pub use std_completion::StdCompletionClient;
pub use tesseract_ocr::TesseractOcr;
