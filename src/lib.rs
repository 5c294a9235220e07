//! Sokoban-style puzzle engine driven by level images
//!
//! Level artwork is cut into cells and each cell is classified by
//! nearest-color voting into a symbolic tag. The resulting grid seeds a
//! deterministic push-block state machine with undo and win detection.

#![forbid(unsafe_code)]

/// Image-to-grid classification
pub mod classify;
/// Input/output operations, caching and error handling
pub mod io;
/// Puzzle rules, state and sessions
pub mod puzzle;

pub use io::error::{PuzzleError, Result};
