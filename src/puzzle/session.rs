//! A play session over an ordered list of levels
//!
//! The session is the only input surface a front end needs: it forwards
//! commands to the current [`PuzzleState`] and reloads levels through a
//! [`LevelLoader`], so resets and level switches hit the cache.

use crate::classify::level::{ClassifiedLevel, ImageMap};
use crate::io::cache::LevelCache;
use crate::io::error::{PuzzleError, Result};
use crate::io::loader::LevelLoader;
use crate::puzzle::direction::Direction;
use crate::puzzle::preset;
use crate::puzzle::state::{MoveOutcome, PuzzleState};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Player request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the player
    Move(Direction),
    /// Revert the last move
    Undo,
    /// Restart the current level
    Reset,
    /// Switch to the level at this index
    Select(usize),
    /// Replace the first level with its built-in almost-solved position
    AlmostSolve,
}

impl Command {
    /// Parse a move-script character: `u d l r` move, `z` undoes, `x` resets,
    /// `a` loads the almost-solved preset and a digit `1`-`9` selects that level
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'z' | 'Z' => Some(Self::Undo),
            'x' | 'X' => Some(Self::Reset),
            'a' | 'A' => Some(Self::AlmostSolve),
            '1'..='9' => key
                .to_digit(10)
                .map(|digit| Self::Select(digit as usize - 1)),
            _ => Direction::from_letter(key).map(Self::Move),
        }
    }
}

/// What a command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A move was attempted
    Moved(MoveOutcome),
    /// An undo was attempted; true if a move was reverted
    Undone(bool),
    /// The current level was reloaded
    Reset,
    /// The level at this index is now loaded
    Selected(usize),
    /// The almost-solved preset replaced the current state
    Preset,
    /// The command was not applicable (level won, or no such level)
    Ignored,
}

/// Levels, the loader that classifies them and the level in play
pub struct GameSession<C> {
    loader: LevelLoader<C>,
    levels: Vec<PathBuf>,
    current: usize,
    level: ClassifiedLevel,
    state: PuzzleState,
}

impl<C: LevelCache> GameSession<C> {
    /// Start a session at the first level
    ///
    /// # Errors
    ///
    /// Returns an error if `levels` is empty or the first level cannot be
    /// loaded and played
    pub fn new(mut loader: LevelLoader<C>, levels: Vec<PathBuf>) -> Result<Self> {
        let first = levels.first().ok_or(PuzzleError::NoLevels)?;
        let level = loader.load(first)?;
        let state = PuzzleState::new(&level.grid)?;
        info!("Session started with {} level(s)", levels.len());

        Ok(Self {
            loader,
            levels,
            current: 0,
            level,
            state,
        })
    }

    /// Apply one command
    ///
    /// Reset is always honored. While the level is won every other command
    /// is ignored. The preset is ignored outside the first level.
    ///
    /// # Errors
    ///
    /// Returns an error if reloading or switching to a level fails; the
    /// session keeps its previous level in that case
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome> {
        if command == Command::Reset {
            self.load(self.current)?;
            return Ok(CommandOutcome::Reset);
        }
        if self.state.is_won() {
            debug!("Ignoring {command:?}: level already won");
            return Ok(CommandOutcome::Ignored);
        }

        let outcome = match command {
            Command::Move(direction) => CommandOutcome::Moved(self.state.move_player(direction)),
            Command::Undo => CommandOutcome::Undone(self.state.undo()),
            Command::Select(index) if index < self.levels.len() => {
                self.load(index)?;
                CommandOutcome::Selected(index)
            }
            Command::AlmostSolve if self.preset_applies() => {
                self.state = preset::almost_solved()?;
                debug!("Loaded the almost-solved preset");
                CommandOutcome::Preset
            }
            Command::Select(_) | Command::Reset | Command::AlmostSolve => CommandOutcome::Ignored,
        };
        Ok(outcome)
    }

    /// The preset only fits the first level, and only when its size matches
    fn preset_applies(&self) -> bool {
        self.current == 0
            && (self.level.grid.rows(), self.level.grid.cols()) == preset::ALMOST_SOLVED_SIZE
    }

    fn load(&mut self, index: usize) -> Result<()> {
        let path = self.levels.get(index).ok_or(PuzzleError::NoLevels)?;
        let level = self.loader.load(path)?;
        self.state.reset(&level.grid)?;
        self.level = level;
        self.current = index;
        debug!("Loaded level {index}: {}", path.display());
        Ok(())
    }

    /// Puzzle in play
    pub const fn state(&self) -> &PuzzleState {
        &self.state
    }

    /// Index of the level in play
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Source path of the level in play
    pub fn current_path(&self) -> Option<&Path> {
        self.levels.get(self.current).map(PathBuf::as_path)
    }

    /// Number of levels in the session
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Representative cell images of the level in play
    pub const fn images(&self) -> &ImageMap {
        &self.level.images
    }

    /// Loader, including its cache statistics
    pub const fn loader(&self) -> &LevelLoader<C> {
        &self.loader
    }
}
