//! Image-to-grid classification
//!
//! Cells are recognized by counting pixels near each reference color of a
//! [`ColorPalette`] and applying fixed-priority thresholds.

/// Per-cell color voting
pub mod cell;
/// Level partitioning into cells
pub mod level;
/// Reference colors and thresholds
pub mod palette;

pub use cell::classify_cell;
pub use level::{ClassifiedLevel, ImageMap, classify_level};
pub use palette::{ColorPalette, Thresholds};
