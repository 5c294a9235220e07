//! Reference colors and vote thresholds used to recognize cell contents

use crate::io::configuration::{
    BLOCK_THRESHOLD, BLUE_BLOCK_RGB, BLUE_TARGET_RGB, CYAN_BLOCK_RGB, CYAN_TARGET_RGB,
    GREEN_BLOCK_RGB, GREEN_TARGET_RGB, MATCH_DISTANCE, PLAYER_RGB, PLAYER_THRESHOLD,
    RED_BLOCK_RGB, RED_TARGET_RGB, TARGET_THRESHOLD, VIOLET_BLOCK_RGB, VIOLET_TARGET_RGB,
    WALL_RGB, WALL_THRESHOLD,
};
use crate::puzzle::tag::BlockColor;

/// Pixel-count cutoffs a vote total must strictly exceed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Votes for a block color
    pub block: usize,
    /// Votes for a target color
    pub target: usize,
    /// Votes for the wall color
    pub wall: usize,
    /// Votes for the player color
    pub player: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            block: BLOCK_THRESHOLD,
            target: TARGET_THRESHOLD,
            wall: WALL_THRESHOLD,
            player: PLAYER_THRESHOLD,
        }
    }
}

/// Reference colors per tag plus classification thresholds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPalette {
    /// Block colors, indexed by [`BlockColor::index`]
    pub blocks: [[u8; 3]; 5],
    /// Target marker colors, indexed by [`BlockColor::index`]
    pub targets: [[u8; 3]; 5],
    /// Wall color
    pub wall: [u8; 3],
    /// Player color
    pub player: [u8; 3],
    /// Pixels strictly closer than this distance vote for a color
    pub match_distance: u32,
    /// Vote cutoffs
    pub thresholds: Thresholds,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            blocks: [
                RED_BLOCK_RGB,
                GREEN_BLOCK_RGB,
                BLUE_BLOCK_RGB,
                VIOLET_BLOCK_RGB,
                CYAN_BLOCK_RGB,
            ],
            targets: [
                RED_TARGET_RGB,
                GREEN_TARGET_RGB,
                BLUE_TARGET_RGB,
                VIOLET_TARGET_RGB,
                CYAN_TARGET_RGB,
            ],
            wall: WALL_RGB,
            player: PLAYER_RGB,
            match_distance: MATCH_DISTANCE,
            thresholds: Thresholds::default(),
        }
    }
}

impl ColorPalette {
    /// Standard palette with custom thresholds
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            ..Self::default()
        }
    }

    /// Reference color of a block
    pub fn block(&self, color: BlockColor) -> [u8; 3] {
        self.blocks.get(color.index()).copied().unwrap_or_default()
    }

    /// Reference color of a target marker
    pub fn target(&self, color: BlockColor) -> [u8; 3] {
        self.targets.get(color.index()).copied().unwrap_or_default()
    }

    /// Whether `pixel` lies strictly within the match distance of `reference`
    ///
    /// Compares squared distances so the test stays in integers.
    pub const fn matches(&self, pixel: [u8; 3], reference: [u8; 3]) -> bool {
        let dr = pixel[0].abs_diff(reference[0]) as u32;
        let dg = pixel[1].abs_diff(reference[1]) as u32;
        let db = pixel[2].abs_diff(reference[2]) as u32;
        dr * dr + dg * dg + db * db < self.match_distance * self.match_distance
    }
}

/// Per-color pixel votes gathered from one cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    /// Votes per block color, indexed by [`BlockColor::index`]
    pub blocks: [usize; 5],
    /// Votes per target color, indexed by [`BlockColor::index`]
    pub targets: [usize; 5],
    /// Wall votes
    pub wall: usize,
    /// Player votes
    pub player: usize,
}

impl VoteTally {
    /// Votes for a block color
    pub fn block(&self, color: BlockColor) -> usize {
        self.blocks.get(color.index()).copied().unwrap_or(0)
    }

    /// Votes for a target color
    pub fn target(&self, color: BlockColor) -> usize {
        self.targets.get(color.index()).copied().unwrap_or(0)
    }
}
