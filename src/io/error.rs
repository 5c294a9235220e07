//! Error types for level loading, classification and puzzle setup

use std::fmt;
use std::path::PathBuf;

/// Main error type for all level and puzzle operations
///
/// Rejected moves are not errors; see [`crate::puzzle::MoveOutcome`].
#[derive(Debug)]
pub enum PuzzleError {
    /// Failed to open or decode a level image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to write a cell image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// Row or column count is zero
    InvalidDimensions {
        /// Declared row count
        rows: usize,
        /// Declared column count
        cols: usize,
    },

    /// The level grid contains no player cell
    MissingPlayer,

    /// The level grid contains more than one player cell
    MultiplePlayers {
        /// First player position found (row, col)
        first: (usize, usize),
        /// Second player position found (row, col)
        second: (usize, usize),
    },

    /// File name does not follow `<name>-<rows>x<cols>.<ext>`
    InvalidLevelName {
        /// Offending path
        path: PathBuf,
        /// What part of the name could not be parsed
        reason: String,
    },

    /// A textual grid could not be parsed
    InvalidGrid {
        /// Description of the defect
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A cache entry could not be serialized
    CacheFormat {
        /// Cache file path
        path: PathBuf,
        /// Underlying serialization error
        source: serde_json::Error,
    },

    /// A session was started without any levels
    NoLevels,

    /// Command-line target is neither a PNG file nor a directory
    InvalidTarget {
        /// Target that was rejected
        path: PathBuf,
        /// Why it was rejected
        reason: &'static str,
    },
}

impl PuzzleError {
    /// Whether the error stems from a malformed level rather than I/O
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. }
                | Self::MissingPlayer
                | Self::MultiplePlayers { .. }
                | Self::InvalidLevelName { .. }
                | Self::InvalidGrid { .. }
                | Self::NoLevels
        )
    }
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidDimensions { rows, cols } => {
                write!(
                    f,
                    "Invalid level dimensions {rows}x{cols}: rows and columns must be positive"
                )
            }
            Self::MissingPlayer => write!(f, "Level has no player cell"),
            Self::MultiplePlayers { first, second } => {
                write!(
                    f,
                    "Level has more than one player cell (at {},{} and {},{})",
                    first.0, first.1, second.0, second.1
                )
            }
            Self::InvalidLevelName { path, reason } => {
                write!(f, "Invalid level name '{}': {reason}", path.display())
            }
            Self::InvalidGrid { reason } => write!(f, "Invalid grid: {reason}"),
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::CacheFormat { path, source } => {
                write!(f, "Cache entry '{}' is malformed: {source}", path.display())
            }
            Self::NoLevels => write!(f, "No levels to play"),
            Self::InvalidTarget { path, reason } => {
                write!(f, "Invalid target '{}': {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::CacheFormat { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for puzzle results
pub type Result<T> = std::result::Result<T, PuzzleError>;

impl From<image::ImageError> for PuzzleError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create a file system error for the given path and operation
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> PuzzleError {
    PuzzleError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}

/// Create an invalid grid error
pub fn invalid_grid(reason: &impl ToString) -> PuzzleError {
    PuzzleError::InvalidGrid {
        reason: reason.to_string(),
    }
}
