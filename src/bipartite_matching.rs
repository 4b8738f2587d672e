pub mod alternating_path;
pub mod matching;
