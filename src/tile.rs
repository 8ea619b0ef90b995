//! Tile alphabet and wire codes.
//!
//! A tile travels as a two-character code: suit letter then rank, e.g. `m1`, `z5`, `f3`.
//! Equality is by value; the same code may appear several times in a hand.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Suits in display order. Flowers sort last and are never playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Characters,
    Dots,
    Bamboo,
    Honors,
    Flowers,
}

impl Suit {
    pub const fn letter(self) -> char {
        match self {
            Suit::Characters => 'm',
            Suit::Dots => 'p',
            Suit::Bamboo => 's',
            Suit::Honors => 'z',
            Suit::Flowers => 'f',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'm' => Some(Suit::Characters),
            'p' => Some(Suit::Dots),
            's' => Some(Suit::Bamboo),
            'z' => Some(Suit::Honors),
            'f' => Some(Suit::Flowers),
            _ => None,
        }
    }

    /// Highest rank in the suit.
    pub const fn max_rank(self) -> u8 {
        match self {
            Suit::Characters | Suit::Dots | Suit::Bamboo => 9,
            Suit::Honors => 7,
            Suit::Flowers => 8,
        }
    }
}

/// A single tile value. Ordering is suit first, then rank.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tile {
    suit: Suit,
    rank: u8,
}

impl Tile {
    pub fn new(suit: Suit, rank: u8) -> Option<Self> {
        if (1..=suit.max_rank()).contains(&rank) {
            Some(Self { suit, rank })
        } else {
            None
        }
    }

    pub fn suit(self) -> Suit {
        self.suit
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Bonus tiles are shown in the flower group and can never be discarded.
    pub fn is_bonus(self) -> bool {
        self.suit == Suit::Flowers
    }

    pub fn texture_key(self) -> String {
        format!("tile_{}", self)
    }
}

pub const BACK_TEXTURE_KEY: &str = "tile_back";

/// Texture keys the renderer preloads: one per tile face, then the back.
pub fn texture_keys() -> Vec<String> {
    ALL_TILES
        .iter()
        .map(|tile| tile.texture_key())
        .chain(std::iter::once(BACK_TEXTURE_KEY.to_string()))
        .collect()
}

/// Every distinct tile, in display order.
pub static ALL_TILES: Lazy<Vec<Tile>> = Lazy::new(|| {
    [
        Suit::Characters,
        Suit::Dots,
        Suit::Bamboo,
        Suit::Honors,
        Suit::Flowers,
    ]
    .into_iter()
    .flat_map(|suit| (1..=suit.max_rank()).map(move |rank| Tile { suit, rank }))
    .collect()
});

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit.letter(), self.rank)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Tile {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ClientError::InvalidTile {
            input: s.to_string(),
        };
        let mut chars = s.chars();
        let suit = chars.next().and_then(Suit::from_letter).ok_or_else(invalid)?;
        let digits = chars.as_str();
        if digits.len() != 1 {
            return Err(invalid());
        }
        let rank: u8 = digits.parse().map_err(|_| invalid())?;
        Tile::new(suit, rank).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Tile {
    type Error = ClientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tile> for String {
    fn from(tile: Tile) -> Self {
        tile.to_string()
    }
}

/// Parses a whitespace- or comma-separated list of codes. Test and debug helper.
pub fn parse_tiles(input: &str) -> Result<Vec<Tile>, ClientError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}
