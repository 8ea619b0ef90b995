//! Identifies the tile that was just drawn into the viewer's hand.
//!
//! The server never says "you drew X"; the tracker infers it from consecutive hands.
//! Any length change while the viewer may discard counts as a draw, because a kong
//! removes tiles and the replacement draw adds one within what the client sees as a
//! single transition. This cannot tell a draw apart from the server silently rewriting
//! the hand with a different length; only an explicit draw event could.

use serde::Serialize;

use crate::tile::Tile;

/// Position of the freshly drawn tile in the current snapshot's hand array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingDraw {
    pub index: usize,
    pub tile: Tile,
}

fn last_playable(hand: &[Tile]) -> Option<PendingDraw> {
    hand.iter()
        .enumerate()
        .rev()
        .find(|(_, tile)| !tile.is_bonus())
        .map(|(index, &tile)| PendingDraw { index, tile })
}

/// Pure draw detection.
///
/// - `previous` is `None` on the first observation after a round boundary.
/// - `prior` is the reference returned for `previous`.
pub fn detect_draw(
    previous: Option<&[Tile]>,
    current: &[Tile],
    can_discard: bool,
    prior: Option<PendingDraw>,
) -> Option<PendingDraw> {
    if !can_discard {
        return None;
    }

    match previous {
        None => last_playable(current),
        Some(previous) if previous.len() != current.len() => last_playable(current),
        Some(_) => prior.and_then(|p| match current.get(p.index) {
            // The reference follows the index; the value is re-read from this snapshot.
            Some(&tile) if !tile.is_bonus() => Some(PendingDraw {
                index: p.index,
                tile,
            }),
            _ => None,
        }),
    }
}

/// Owns the "previous hand" slot that draw detection diffs against.
#[derive(Debug, Clone, Default)]
pub struct DrawTracker {
    previous: Option<Vec<Tile>>,
    pending: Option<PendingDraw>,
}

impl DrawTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, hand: &[Tile], can_discard: bool) -> Option<PendingDraw> {
        let next = detect_draw(self.previous.as_deref(), hand, can_discard, self.pending);
        if next != self.pending
            && let Some(draw) = next
        {
            tracing::debug!(index = draw.index, tile = %draw.tile, "drawn tile detected");
        }
        self.pending = next;
        self.previous = Some(hand.to_vec());
        next
    }

    pub fn pending(&self) -> Option<PendingDraw> {
        self.pending
    }

    /// Called as soon as a discard command is queued.
    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    /// Forget everything at a round boundary.
    pub fn reset(&mut self) {
        self.previous = None;
        self.pending = None;
    }
}
