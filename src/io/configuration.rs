//! Classification constants and runtime configuration defaults

// Reference colors sampled from the level artwork
/// Reference color of a red block
pub const RED_BLOCK_RGB: [u8; 3] = [175, 72, 68];
/// Reference color of a green block
pub const GREEN_BLOCK_RGB: [u8; 3] = [114, 187, 81];
/// Reference color of a blue block
pub const BLUE_BLOCK_RGB: [u8; 3] = [66, 82, 182];
/// Reference color of a violet block
pub const VIOLET_BLOCK_RGB: [u8; 3] = [149, 69, 182];
/// Reference color of a cyan block
pub const CYAN_BLOCK_RGB: [u8; 3] = [101, 186, 187];

/// Reference color of a red target marker
pub const RED_TARGET_RGB: [u8; 3] = [174, 72, 68];
/// Reference color of a green target marker
pub const GREEN_TARGET_RGB: [u8; 3] = [114, 187, 82];
/// Reference color of a blue target marker
pub const BLUE_TARGET_RGB: [u8; 3] = [66, 82, 182];
/// Reference color of a violet target marker
pub const VIOLET_TARGET_RGB: [u8; 3] = [149, 69, 182];
/// Reference color of a cyan target marker
pub const CYAN_TARGET_RGB: [u8; 3] = [101, 186, 188];

/// Reference color of wall bricks (brown)
pub const WALL_RGB: [u8; 3] = [218, 168, 75];
/// Reference color of the player sprite (tan)
pub const PLAYER_RGB: [u8; 3] = [245, 218, 131];

/// A pixel votes for a reference color when strictly closer than this (Euclidean RGB)
pub const MATCH_DISTANCE: u32 = 80;

/// Pixels trimmed from every side of a cell before classification
pub const CELL_MARGIN: u32 = 4;

// Vote thresholds are pixel counts, so they assume cells of roughly 80px or more
/// Votes a color needs before the cell is a block of that color
pub const BLOCK_THRESHOLD: usize = 4000;
/// Votes a target color needs before the cell is a target of that color
pub const TARGET_THRESHOLD: usize = 500;
/// Brown votes needed before the cell is a wall
pub const WALL_THRESHOLD: usize = 5000;
/// Tan votes needed before the cell holds the player
pub const PLAYER_THRESHOLD: usize = 500;

// Cache settings
/// Suffix appended to a level image path to locate its cache entry
pub const CACHE_SUFFIX: &str = ".cache.json";
/// Bumped whenever the cache record layout changes
pub const CACHE_FORMAT_VERSION: u32 = 1;

// Output settings
/// Suffix of the directory receiving exported cell images
pub const TILES_DIR_SUFFIX: &str = "_tiles";
/// Only files with this extension are picked up when scanning a directory
pub const LEVEL_EXTENSION: &str = "png";
