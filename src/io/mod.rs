/// Level memoization by source path
pub mod cache;
/// Command-line interface and batch processing
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding and export
pub mod image;
/// Level dimensions from file names
pub mod level_name;
/// Cached level loading
pub mod loader;
/// Batch progress display
pub mod progress;
