//! Puzzle rules and state
//!
//! This module contains the playable side of a level:
//! - Cell tags and their textual notation
//! - Bounds-checked grids for levels, boards and targets
//! - The move/undo/win state machine and a multi-level session

/// Movement directions
pub mod direction;
/// Two-dimensional grids and positions
pub mod grid;
/// Built-in almost-solved position
pub mod preset;
/// Multi-level play session and command dispatch
pub mod session;
/// Puzzle state machine with push rules and undo history
pub mod state;
/// Symbolic cell contents
pub mod tag;

pub use direction::Direction;
pub use grid::{Board, Grid, LevelGrid, Position, TargetMap};
pub use session::{Command, CommandOutcome, GameSession};
pub use state::{MoveOutcome, MoveRecord, Phase, PuzzleState, Rejection};
pub use tag::{BlockColor, Piece, Tag};
