//! Display ordering of the viewer's hand.
//!
//! Tiles are carried as `(tile, original_index)` pairs through every step so a discard
//! always names the server's index, never a display position. Duplicate tile values make
//! a value-to-index lookup lossy, so none is ever done.

use std::collections::HashSet;

use serde::Serialize;

use crate::draw_tracker::PendingDraw;
use crate::tile::Tile;
use crate::types::Meld;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandEntry {
    pub tile: Tile,
    pub original_index: usize,
}

/// Sorted playable tiles, then the pending draw (unsorted) as the last element.
/// Bonus tiles never appear.
pub fn project(hand: &[Tile], pending: Option<PendingDraw>) -> Vec<HandEntry> {
    let drawn = pending.and_then(|p| {
        hand.get(p.index)
            .filter(|tile| !tile.is_bonus())
            .map(|&tile| HandEntry {
                tile,
                original_index: p.index,
            })
    });

    let mut entries: Vec<HandEntry> = hand
        .iter()
        .enumerate()
        .filter(|(_, tile)| !tile.is_bonus())
        .filter(|(idx, _)| drawn.is_none_or(|d| d.original_index != *idx))
        .map(|(original_index, &tile)| HandEntry {
            tile,
            original_index,
        })
        .collect();
    // Stable: equal tiles keep their original-index order.
    entries.sort_by_key(|entry| entry.tile);
    entries.extend(drawn);
    entries
}

/// Everything the bottom hand area shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandView {
    pub tiles: Vec<HandEntry>,
    /// True when the last element of `tiles` is the freshly drawn tile.
    pub has_drawn: bool,
    pub flowers: Vec<Tile>,
    /// Pung, chow and kong tiles laid flat, in meld order.
    pub meld_tiles: Vec<Tile>,
}

impl HandView {
    pub fn build(hand: &[Tile], pending: Option<PendingDraw>, melds: &[Meld]) -> Self {
        let tiles = project(hand, pending);
        let has_drawn = pending.is_some_and(|p| {
            tiles
                .last()
                .is_some_and(|last| last.original_index == p.index)
        });

        let mut flowers = Vec::new();
        let mut meld_tiles = Vec::new();
        for meld in melds {
            if meld.is_flower() {
                flowers.extend_from_slice(meld.tiles());
            } else {
                meld_tiles.extend_from_slice(meld.tiles());
            }
        }

        // A flower may still be echoed in the hand after the server moved it into the melds.
        let mut seen: HashSet<Tile> = flowers.iter().copied().collect();
        for &tile in hand.iter().filter(|tile| tile.is_bonus()) {
            if seen.insert(tile) {
                flowers.push(tile);
            }
        }

        Self {
            tiles,
            has_drawn,
            flowers,
            meld_tiles,
        }
    }

    pub fn original_index(&self, display_index: usize) -> Option<usize> {
        self.tiles
            .get(display_index)
            .map(|entry| entry.original_index)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
