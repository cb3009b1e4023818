//! 標準アダプタ実装（ポートの既定実装）

pub mod file_json_log;
pub mod std_clock;
pub mod std_fs;
pub mod std_process;
pub mod std_random;

pub use file_json_log::{FileJsonLog, NoopLog};
pub use std_clock::{FixedClock, StdClock};
pub use std_fs::StdFileSystem;
pub use std_process::StdProcess;
pub use std_random::{SeededRandom, StdRandom};
