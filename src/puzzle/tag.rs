//! Symbolic cell contents and their one-character level notation
//!
//! The notation is the one used by level fixtures: `-` empty, `w` wall,
//! `p` player, lowercase color initial for a block and uppercase for a target.

use std::fmt;

/// Color shared by a block and the targets it may rest on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockColor {
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
    /// Violet
    Violet,
    /// Cyan
    Cyan,
}

impl BlockColor {
    /// All colors in declaration order
    pub const ALL: [Self; 5] = [Self::Red, Self::Green, Self::Blue, Self::Violet, Self::Cyan];

    /// Order in which the classifier tests colors; the first match wins
    pub const CLASSIFICATION_ORDER: [Self; 5] =
        [Self::Green, Self::Red, Self::Blue, Self::Violet, Self::Cyan];

    /// Dense index suitable for per-color arrays
    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
            Self::Violet => 3,
            Self::Cyan => 4,
        }
    }

    /// Lowercase initial used for blocks
    pub const fn initial(self) -> char {
        match self {
            Self::Red => 'r',
            Self::Green => 'g',
            Self::Blue => 'b',
            Self::Violet => 'v',
            Self::Cyan => 'c',
        }
    }

    /// Color whose block initial is `initial`, ignoring case
    pub const fn from_initial(initial: char) -> Option<Self> {
        match initial.to_ascii_lowercase() {
            'r' => Some(Self::Red),
            'g' => Some(Self::Green),
            'b' => Some(Self::Blue),
            'v' => Some(Self::Violet),
            'c' => Some(Self::Cyan),
            _ => None,
        }
    }

    /// Lowercase color name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Violet => "violet",
            Self::Cyan => "cyan",
        }
    }
}

/// Classification of a single level cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// Floor or background
    #[default]
    Empty,
    /// Impassable wall
    Wall,
    /// Player start position
    Player,
    /// Pushable block
    Block(BlockColor),
    /// Destination for a block of the same color
    Target(BlockColor),
}

impl Tag {
    /// One-character notation of this tag
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '-',
            Self::Wall => 'w',
            Self::Player => 'p',
            Self::Block(color) => color.initial(),
            Self::Target(color) => color.initial().to_ascii_uppercase(),
        }
    }

    /// Parse the one-character notation
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '-' => Some(Self::Empty),
            'w' => Some(Self::Wall),
            'p' => Some(Self::Player),
            _ => match BlockColor::from_initial(symbol) {
                Some(color) if symbol.is_ascii_uppercase() => Some(Self::Target(color)),
                Some(color) => Some(Self::Block(color)),
                None => None,
            },
        }
    }

    /// File-name friendly label, distinct for blocks and targets even on
    /// case-insensitive file systems
    pub fn slug(self) -> String {
        match self {
            Self::Empty => "empty".to_string(),
            Self::Wall => "wall".to_string(),
            Self::Player => "player".to_string(),
            Self::Block(color) => format!("{}-block", color.name()),
            Self::Target(color) => format!("{}-target", color.name()),
        }
    }

    /// Board content this tag starts as; targets start as empty floor
    pub const fn piece(self) -> Piece {
        match self {
            Self::Wall => Piece::Wall,
            Self::Player => Piece::Player,
            Self::Block(color) => Piece::Block(color),
            Self::Empty | Self::Target(_) => Piece::Empty,
        }
    }

    /// Target color carried by this tag, if any
    pub const fn target(self) -> Option<BlockColor> {
        match self {
            Self::Target(color) => Some(color),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Mutable board content; targets are tracked separately
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Piece {
    /// Walkable floor
    #[default]
    Empty,
    /// Impassable wall
    Wall,
    /// The player
    Player,
    /// Pushable block
    Block(BlockColor),
}

impl Piece {
    /// One-character notation, shared with [`Tag::symbol`]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '-',
            Self::Wall => 'w',
            Self::Player => 'p',
            Self::Block(color) => color.initial(),
        }
    }
}
