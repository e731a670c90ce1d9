//! Benchmark log parsing: line classification plus whole-file ingestion.

pub mod line;
pub mod parse;

pub use line::{LineClassifier, LogLine};
pub use parse::{parse_log_file, parse_log_str};
