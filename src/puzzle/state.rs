//! Live puzzle state: moves with push rules, undo history and win detection
//!
//! The board holds walls, blocks and the player; target markers live in a
//! separate [`TargetMap`] so a block can sit on a target without losing it.
//! Every accepted move first records a full copy of the board, which keeps
//! undo an exact inverse of the move it reverts.

use crate::io::error::{Result, invalid_grid};
use crate::puzzle::direction::Direction;
use crate::puzzle::grid::{Board, LevelGrid, Position, TargetMap};
use crate::puzzle::tag::{BlockColor, Piece};
use log::debug;
use std::fmt;

/// Board and player position as they were before an accepted move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// Board before the move
    pub board: Board,
    /// Player position before the move
    pub player: Position,
}

/// Why a move was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The level is already won; only reset is accepted
    LevelWon,
    /// The player would leave the board
    OutOfBounds,
    /// The player would walk into a wall
    Wall,
    /// The block in the way cannot move: the cell behind it is off the
    /// board, a wall or another block
    BlockedPush,
}

/// Result of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player stepped onto empty floor
    Walked,
    /// The player pushed a block one cell ahead
    Pushed(BlockColor),
    /// Nothing changed
    Rejected(Rejection),
}

impl MoveOutcome {
    /// Whether the move changed the board
    pub const fn is_accepted(self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// Coarse game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Moves are accepted
    Playing,
    /// Every target holds a matching block
    Won,
}

/// A loaded level in play
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleState {
    board: Board,
    targets: TargetMap,
    player: Position,
    history: Vec<MoveRecord>,
    won: bool,
}

impl PuzzleState {
    /// Start playing a classified level
    ///
    /// # Errors
    ///
    /// Returns an error if the grid does not contain exactly one player
    pub fn new(grid: &LevelGrid) -> Result<Self> {
        let player = grid.player_position()?;
        let board = grid.map(|tag| tag.piece());
        let targets = grid.map(|tag| tag.target());

        debug!(
            "Loaded {}x{} level, player at {player}",
            grid.rows(),
            grid.cols()
        );

        Ok(Self {
            board,
            targets,
            player,
            history: Vec::new(),
            won: false,
        })
    }

    /// Start from a board and a separate target layer, so blocks may begin on
    /// their targets
    ///
    /// Board lines use the level notation (target symbols read as floor).
    /// Target lines hold `-` or a color initial in either case.
    ///
    /// # Errors
    ///
    /// Returns an error if either layer does not parse, their shapes differ,
    /// or the board does not contain exactly one player
    pub fn from_layers<S: AsRef<str>>(board_lines: &[S], target_lines: &[S]) -> Result<Self> {
        let layout = LevelGrid::parse_lines(board_lines)?;
        let player = layout.player_position()?;

        let target_rows = target_lines
            .iter()
            .map(|line| line.as_ref())
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|symbol| match symbol {
                        '-' => Ok(None),
                        _ => BlockColor::from_initial(symbol).map(Some).ok_or_else(|| {
                            invalid_grid(&format!("unknown target symbol '{symbol}'"))
                        }),
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        let targets = TargetMap::from_rows(target_rows)?;

        if (targets.rows(), targets.cols()) != (layout.rows(), layout.cols()) {
            return Err(invalid_grid(&format!(
                "target layer is {}x{}, board is {}x{}",
                targets.rows(),
                targets.cols(),
                layout.rows(),
                layout.cols()
            )));
        }

        let mut state = Self {
            board: layout.map(|tag| tag.piece()),
            targets,
            player,
            history: Vec::new(),
            won: false,
        };
        state.check_win();
        Ok(state)
    }

    /// Replace the level with a freshly classified grid and clear history
    ///
    /// On error the current state is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid does not contain exactly one player
    pub fn reset(&mut self, grid: &LevelGrid) -> Result<()> {
        *self = Self::new(grid)?;
        Ok(())
    }

    /// Move the player one cell, pushing a block if one is in the way
    ///
    /// Rejected moves leave the board, player, history and win flag as
    /// they were. Accepted moves record the prior state for [`Self::undo`]
    /// and re-evaluate the win condition.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        if self.won {
            return MoveOutcome::Rejected(Rejection::LevelWon);
        }

        let Some(next) = self.board.step(self.player, direction) else {
            return MoveOutcome::Rejected(Rejection::OutOfBounds);
        };

        let outcome = match self.board.get(next).copied().unwrap_or(Piece::Wall) {
            Piece::Wall => return MoveOutcome::Rejected(Rejection::Wall),
            Piece::Block(color) => {
                let Some(beyond) = self
                    .board
                    .step(next, direction)
                    .filter(|&beyond| self.board.get(beyond) == Some(&Piece::Empty))
                else {
                    return MoveOutcome::Rejected(Rejection::BlockedPush);
                };

                self.record();
                self.board.set(beyond, Piece::Block(color));
                self.board.set(next, Piece::Empty);
                MoveOutcome::Pushed(color)
            }
            Piece::Empty | Piece::Player => {
                self.record();
                MoveOutcome::Walked
            }
        };

        self.board.set(self.player, Piece::Empty);
        self.board.set(next, Piece::Player);
        self.player = next;
        self.check_win();

        outcome
    }

    /// Revert the most recent accepted move
    ///
    /// Returns whether a move was reverted. The win flag is cleared either way.
    pub fn undo(&mut self) -> bool {
        self.won = false;
        match self.history.pop() {
            Some(record) => {
                self.board = record.board;
                self.player = record.player;
                true
            }
            None => false,
        }
    }

    /// Evaluate the win condition and cache it in the win flag
    pub fn check_win(&mut self) -> bool {
        self.won = self.is_solved();
        self.won
    }

    /// Whether every target holds a block of its color
    ///
    /// Levels without targets are trivially solved.
    pub fn is_solved(&self) -> bool {
        self.targets.iter().all(|(position, target)| match target {
            Some(color) => self.board.get(position) == Some(&Piece::Block(*color)),
            None => true,
        })
    }

    /// Current board
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Target colors per cell
    pub const fn targets(&self) -> &TargetMap {
        &self.targets
    }

    /// Player position
    pub const fn player(&self) -> Position {
        self.player
    }

    /// Recorded moves, oldest first
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Number of moves that can be undone
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Cached result of the last win check
    pub const fn is_won(&self) -> bool {
        self.won
    }

    /// Current phase
    pub const fn phase(&self) -> Phase {
        if self.won { Phase::Won } else { Phase::Playing }
    }

    /// Targets not yet covered by a matching block
    pub fn open_targets(&self) -> usize {
        self.targets
            .iter()
            .filter(|(position, target)| {
                target.is_some_and(|color| self.board.get(*position) != Some(&Piece::Block(color)))
            })
            .count()
    }

    /// Board with uncovered targets drawn in, one string per row
    pub fn render_lines(&self) -> Vec<String> {
        (0..self.board.rows())
            .map(|row| {
                (0..self.board.cols())
                    .map(|col| {
                        let position = Position::new(row, col);
                        let piece = self.board.get(position).copied().unwrap_or_default();
                        match (piece, self.targets.get(position).copied().flatten()) {
                            (Piece::Empty, Some(color)) => color.initial().to_ascii_uppercase(),
                            (piece, _) => piece.symbol(),
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn record(&mut self) {
        self.history.push(MoveRecord {
            board: self.board.clone(),
            player: self.player,
        });
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.render_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
