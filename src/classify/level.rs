//! Partition a level image into cells and classify each one

use crate::classify::cell::classify_cell;
use crate::classify::palette::ColorPalette;
use crate::io::configuration::CELL_MARGIN;
use crate::io::error::{PuzzleError, Result};
use crate::puzzle::grid::{LevelGrid, Position};
use crate::puzzle::tag::Tag;
use image::{RgbImage, imageops};
use log::debug;
use std::collections::BTreeMap;

/// Representative cell image per non-empty tag, kept for rendering
pub type ImageMap = BTreeMap<Tag, RgbImage>;

/// Result of classifying a level image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLevel {
    /// One tag per cell, `rows x cols`
    pub grid: LevelGrid,
    /// First cell image seen for each non-empty tag
    pub images: ImageMap,
}

/// Pixel rectangle `(x, y, width, height)` sampled for a cell
///
/// The cell's bounds are inset by [`CELL_MARGIN`] on every side. Cells too
/// small to survive the inset yield a zero-sized rectangle.
pub const fn cell_bounds(
    row: u32,
    col: u32,
    cell_width: u32,
    cell_height: u32,
) -> (u32, u32, u32, u32) {
    let left = col * cell_width + CELL_MARGIN;
    let top = row * cell_height + CELL_MARGIN;
    let width = cell_width.saturating_sub(2 * CELL_MARGIN);
    let height = cell_height.saturating_sub(2 * CELL_MARGIN);
    (left, top, width, height)
}

/// Classify every cell of a level image laid out as `rows x cols`
///
/// Cell size is the floor of image size over the cell count, so any
/// leftover pixels on the right and bottom edges are ignored.
///
/// # Errors
///
/// Returns an error if `rows` or `cols` is zero or exceeds the pixel range
pub fn classify_level(
    image: &RgbImage,
    rows: usize,
    cols: usize,
    palette: &ColorPalette,
) -> Result<ClassifiedLevel> {
    let invalid = || PuzzleError::InvalidDimensions { rows, cols };
    if rows == 0 || cols == 0 {
        return Err(invalid());
    }
    let row_count = u32::try_from(rows).map_err(|_overflow| invalid())?;
    let col_count = u32::try_from(cols).map_err(|_overflow| invalid())?;

    let (width, height) = image.dimensions();
    let cell_width = width / col_count;
    let cell_height = height / row_count;
    debug!(
        "Classifying {rows}x{cols} level from {width}x{height} image \
         ({cell_width}x{cell_height} cells)"
    );

    let mut tags = Vec::with_capacity(rows);
    let mut images = ImageMap::new();

    for row in 0..row_count {
        let mut tag_row = Vec::with_capacity(cols);
        for col in 0..col_count {
            let (x, y, w, h) = cell_bounds(row, col, cell_width, cell_height);
            let cell = imageops::crop_imm(image, x, y, w, h).to_image();
            let tag = classify_cell(&cell, palette);
            tag_row.push(tag);

            if tag != Tag::Empty {
                images.entry(tag).or_insert(cell);
            }
        }
        tags.push(tag_row);
    }

    let grid = LevelGrid::from_rows(tags)?;
    Ok(ClassifiedLevel { grid, images })
}

impl ClassifiedLevel {
    /// Tag of a single cell
    pub fn tag(&self, position: Position) -> Option<Tag> {
        self.grid.get(position).copied()
    }

    /// Representative image for `tag`, if any cell carried it
    pub fn image(&self, tag: Tag) -> Option<&RgbImage> {
        self.images.get(&tag)
    }

    /// Dimensions of each representative image, for quick inspection
    pub fn image_sizes(&self) -> BTreeMap<Tag, (u32, u32)> {
        self.images
            .iter()
            .map(|(tag, image)| (*tag, image.dimensions()))
            .collect()
    }
}
