//! Built-in position for the first level of the stock level pack

use crate::io::error::Result;
use crate::puzzle::state::PuzzleState;

/// Board of the first stock level one push from solved
pub const ALMOST_SOLVED_BOARD: [&str; 10] = [
    "------wwww",
    "----wwwrrw",
    "----wpg-bw",
    "----w--rrw",
    "wwwwww--ww",
    "w------www",
    "ww-------w",
    "-w-----w-w",
    "-w---w---w",
    "-wwwwwwwww",
];

/// Targets of the first stock level
pub const ALMOST_SOLVED_TARGETS: [&str; 10] = [
    "----------",
    "-------rr-",
    "-------gb-",
    "-------rr-",
    "----------",
    "----------",
    "----------",
    "----------",
    "----------",
    "----------",
];

/// Dimensions shared by the preset layers
pub const ALMOST_SOLVED_SIZE: (usize, usize) = (10, 10);

/// Fresh state for the almost-solved position: pushing right wins
///
/// # Errors
///
/// Returns an error only if the built-in layers are malformed
pub fn almost_solved() -> Result<PuzzleState> {
    PuzzleState::from_layers(&ALMOST_SOLVED_BOARD, &ALMOST_SOLVED_TARGETS)
}
