//! Level dimensions encoded in file names (`<name>-<rows>x<cols>.<ext>`)

use crate::io::error::{PuzzleError, Result};
use std::path::Path;

/// Rows and columns declared by a level file name
///
/// `levels/level3-8x6.png` declares 8 rows and 6 columns. The name part may
/// itself contain dashes; only the text after the last one is parsed, up to
/// its first dot, so `lvl-3x3.v2.png` declares 3x3.
///
/// # Errors
///
/// Returns an error if the name lacks the `-<rows>x<cols>` suffix, either
/// number fails to parse, or either number is zero
pub fn parse_level_dimensions(path: &Path) -> Result<(usize, usize)> {
    let invalid = |reason: &str| PuzzleError::InvalidLevelName {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| invalid("file name is missing or not UTF-8"))?;

    let (_, suffix) = name
        .rsplit_once('-')
        .ok_or_else(|| invalid("expected '-<rows>x<cols>' before the extension"))?;
    let dimensions = suffix.split('.').next().unwrap_or(suffix);

    let (rows, cols) = dimensions
        .split_once('x')
        .ok_or_else(|| invalid("expected '<rows>x<cols>'"))?;

    let rows: usize = rows
        .parse()
        .map_err(|e| invalid(&format!("row count '{rows}': {e}")))?;
    let cols: usize = cols
        .parse()
        .map_err(|e| invalid(&format!("column count '{cols}': {e}")))?;

    if rows == 0 || cols == 0 {
        return Err(PuzzleError::InvalidDimensions { rows, cols });
    }

    Ok((rows, cols))
}
