//! Nearest-color voting over the pixels of a single cell

use crate::classify::palette::{ColorPalette, Thresholds, VoteTally};
use crate::puzzle::tag::{BlockColor, Tag};
use image::{GenericImageView, Rgb};

/// Count, for every palette color, the pixels within its match distance
///
/// A pixel may vote for several colors; block and target references are
/// nearly identical so both usually receive the vote.
pub fn tally_votes<I>(cell: &I, palette: &ColorPalette) -> VoteTally
where
    I: GenericImageView<Pixel = Rgb<u8>>,
{
    let mut tally = VoteTally::default();

    for (_, _, Rgb(pixel)) in cell.pixels() {
        if palette.matches(pixel, palette.wall) {
            tally.wall += 1;
        }
        if palette.matches(pixel, palette.player) {
            tally.player += 1;
        }
        for color in BlockColor::ALL {
            if palette.matches(pixel, palette.block(color)) {
                if let Some(votes) = tally.blocks.get_mut(color.index()) {
                    *votes += 1;
                }
            }
            if palette.matches(pixel, palette.target(color)) {
                if let Some(votes) = tally.targets.get_mut(color.index()) {
                    *votes += 1;
                }
            }
        }
    }

    tally
}

/// Turn a vote tally into a tag
///
/// Priority is fixed: wall, then player, then each color in
/// [`BlockColor::CLASSIFICATION_ORDER`] testing block before target.
/// The first satisfied threshold wins.
pub fn tag_from_votes(tally: &VoteTally, thresholds: &Thresholds) -> Tag {
    if tally.wall > thresholds.wall {
        return Tag::Wall;
    }
    if tally.player > thresholds.player {
        return Tag::Player;
    }

    for color in BlockColor::CLASSIFICATION_ORDER {
        if tally.block(color) > thresholds.block {
            return Tag::Block(color);
        }
        if tally.target(color) > thresholds.target {
            return Tag::Target(color);
        }
    }

    Tag::Empty
}

/// Classify one cell image against the palette
pub fn classify_cell<I>(cell: &I, palette: &ColorPalette) -> Tag
where
    I: GenericImageView<Pixel = Rgb<u8>>,
{
    tag_from_votes(&tally_votes(cell, palette), &palette.thresholds)
}
