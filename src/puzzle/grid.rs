//! Fixed-size two-dimensional grids with bounds-checked access
//!
//! [`Grid`] wraps an `ndarray::Array2` in row-major order. Every accessor
//! returns `Option` instead of panicking, so callers never index out of range.

use crate::io::error::{PuzzleError, Result, invalid_grid};
use crate::puzzle::direction::Direction;
use crate::puzzle::tag::{BlockColor, Piece, Tag};
use ndarray::Array2;
use std::fmt;
use std::str::FromStr;

/// A cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Zero-based row, counted from the top
    pub row: usize,
    /// Zero-based column, counted from the left
    pub col: usize,
}

impl Position {
    /// Create a position
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rectangular grid of cells, immutable in shape after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Array2<T>,
}

/// Classified level: one [`Tag`] per cell
pub type LevelGrid = Grid<Tag>;
/// Live puzzle board: walls, blocks, the player and empty floor
pub type Board = Grid<Piece>;
/// Target color per cell, fixed for the lifetime of a loaded level
pub type TargetMap = Grid<Option<BlockColor>>;

impl<T: Clone + Default> Grid<T> {
    /// Create a grid filled with the default cell
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: Array2::from_elem((rows, cols), T::default()),
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f` at every position
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(Position) -> T,
    {
        Self {
            cells: Array2::from_shape_fn((rows, cols), |(row, col)| f(Position::new(row, col))),
        }
    }

    /// Build a grid from a list of equally long rows
    ///
    /// # Errors
    ///
    /// Returns an error if the rows differ in length
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != col_count)
        {
            return Err(invalid_grid(&format!(
                "row {index} has {} cells, expected {col_count}",
                row.len()
            )));
        }

        let flat: Vec<T> = rows.into_iter().flatten().collect();
        let cells =
            Array2::from_shape_vec((row_count, col_count), flat).map_err(|e| invalid_grid(&e))?;
        Ok(Self { cells })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Cell at `position`, or `None` when out of bounds
    pub fn get(&self, position: Position) -> Option<&T> {
        self.cells.get((position.row, position.col))
    }

    /// Mutable cell at `position`, or `None` when out of bounds
    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        self.cells.get_mut((position.row, position.col))
    }

    /// Overwrite the cell at `position`; returns false when out of bounds
    pub fn set(&mut self, position: Position, value: T) -> bool {
        self.get_mut(position).map(|cell| *cell = value).is_some()
    }

    /// Neighbor of `position` one step in `direction`, if it lies inside the grid
    pub fn step(&self, position: Position, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.delta();
        let row = position.row.checked_add_signed(dr)?;
        let col = position.col.checked_add_signed(dc)?;
        (row < self.rows() && col < self.cols()).then_some(Position::new(row, col))
    }

    /// All cells with their positions in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| (Position::new(row, col), cell))
    }

    /// Apply `f` to every cell, keeping the shape
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            cells: self.cells.map(f),
        }
    }

    /// Cells of one row, or `None` when out of bounds
    pub fn row(&self, row: usize) -> Option<Vec<&T>> {
        (row < self.rows()).then(|| self.cells.row(row).into_iter().collect())
    }
}

/// Cells that have a one-character textual form
pub trait Glyph {
    /// Character drawn for this cell
    fn glyph(&self) -> char;
}

impl Glyph for Tag {
    fn glyph(&self) -> char {
        self.symbol()
    }
}

impl Glyph for Piece {
    fn glyph(&self) -> char {
        self.symbol()
    }
}

impl Glyph for Option<BlockColor> {
    fn glyph(&self) -> char {
        self.map_or('-', |color| color.initial().to_ascii_uppercase())
    }
}

impl<T: Glyph> Grid<T> {
    /// One string per row
    pub fn to_lines(&self) -> Vec<String> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(Glyph::glyph).collect())
            .collect()
    }
}

impl<T: Glyph> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.to_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl LevelGrid {
    /// Parse one line of symbols per row; whitespace inside a line is ignored
    /// and blank lines are skipped
    ///
    /// # Errors
    ///
    /// Returns an error on an unknown symbol or rows of unequal length
    pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let mut rows = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|symbol| {
                    Tag::from_symbol(symbol).ok_or_else(|| {
                        invalid_grid(&format!("unknown symbol '{symbol}' on line {index}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Position of the single player cell
    ///
    /// # Errors
    ///
    /// Returns an error if there is no player or more than one
    pub fn player_position(&self) -> Result<Position> {
        let mut players = self
            .iter()
            .filter(|(_, tag)| **tag == Tag::Player)
            .map(|(position, _)| position);

        let first = players.next().ok_or(PuzzleError::MissingPlayer)?;
        if let Some(second) = players.next() {
            return Err(PuzzleError::MultiplePlayers {
                first: (first.row, first.col),
                second: (second.row, second.col),
            });
        }
        Ok(first)
    }
}

impl FromStr for LevelGrid {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<&str> = s.lines().collect();
        Self::parse_lines(&lines)
    }
}
