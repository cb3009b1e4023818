//! Outbound ポート（usecase から見た外側への trait）

pub mod clock;
pub mod fs;
pub mod log;
pub mod process;
pub mod random;

pub use clock::Clock;
pub use fs::{FileMetadata, FileSystem};
pub use log::{now_iso8601, Log, LogLevel, LogRecord};
pub use process::{Process, ProcessOutput};
pub use random::RandomSource;
