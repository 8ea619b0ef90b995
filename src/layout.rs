//! Screen geometry.
//!
//! Every coordinate is derived from the viewport as a proportion of its width or height
//! (the reference table is 1100 wide). Nothing here keeps state: the same inputs always
//! produce the same coordinates.

use serde::{Deserialize, Serialize};

use crate::actions::Prompt;
use crate::hand::HandView;
use crate::tile::Tile;
use crate::types::{PublicState, RelativeSeat, Seat};

pub const UI_BASE_WIDTH: f64 = 1100.0;

/// Discards shown per seat; older ones scroll off.
pub const MAX_DISCARDS_SHOWN: usize = 40;
/// Opponent tile backs shown per seat.
pub const MAX_BACKS_SHOWN: usize = 18;

const TILE_ASPECT: f64 = 1.30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

/// A tile sprite position. `angle` is in degrees; side seats are turned 90.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
}

fn round(v: f64) -> f64 {
    v.round()
}

/// Named anchors for the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableLayout {
    pub w: f64,
    pub h: f64,
    /// `w / UI_BASE_WIDTH`.
    pub scale: f64,
    pub margin: f64,

    pub title: Point,
    pub hud: Point,
    pub message: Point,

    pub compass: Point,
    pub compass_scale: f64,
    pub compass_label_offset: f64,

    pub hand_y: f64,
    pub hand_tile: Size,
    pub small_tile: Size,

    /// The pass button sits here; claim buttons extend to its left.
    pub action_anchor: Point,
    pub action_gap: f64,

    pub opp_top_y: f64,
    pub opp_top_gap: f64,
    pub opp_side_gap: f64,
    pub opp_side_x_inset: f64,
    pub opp_side_y_top: f64,
    pub opp_tile: Size,

    pub discard_tile: Size,
    pub discard_bottom_y: f64,
    pub discard_top_y: f64,
    pub discard_center_band_y: f64,
    pub discard_cols: usize,
    pub discard_side_rows: usize,
    pub discard_left_x: f64,
    pub discard_right_x: f64,
    pub discard_side_y_top: f64,

    pub wall_count: Point,
    pub wall_font: f64,

    pub ready_button: Point,
    pub ready_button_size: Size,

    pub score_button: Point,
    pub score_button_size: Size,
}

impl TableLayout {
    pub fn compute(viewport: Viewport) -> Self {
        let w = viewport.width;
        let h = viewport.height;
        let s = w / UI_BASE_WIDTH;
        let margin = round(w * 0.03);
        let hand_y = round(h - 28.0 * s);

        let hand_tile_w = round(w * 0.055).max(28.0);
        let small_tile_w = round(hand_tile_w / 2.0).max(14.0);
        let opp_w = round(w * 0.025);
        let discard_w = round(w * 0.03);

        let ready_w = round(w.min(h) * 0.22);
        let score_w = round(w * 0.10);
        let score_h = round(h * 0.05);
        let score_margin = round(w * 0.02);

        Self {
            w,
            h,
            scale: s,
            margin,

            title: Point::new(margin, round(margin * 0.7)),
            hud: Point::new(margin, round(margin * 0.7) + round(36.0 * s)),
            message: Point::new(margin, round(margin * 0.7) + round(66.0 * s)),

            compass: Point::new(round(w / 2.0), round(h / 2.0 - 20.0 * s)),
            compass_scale: (w.min(h) / 900.0).clamp(0.62, 0.9),
            compass_label_offset: 54.0,

            hand_y,
            hand_tile: Size {
                w: hand_tile_w,
                h: round(hand_tile_w * TILE_ASPECT),
            },
            small_tile: Size {
                w: small_tile_w,
                h: round(small_tile_w * TILE_ASPECT),
            },

            action_anchor: Point::new(round(w - margin - 220.0 * s), round(hand_y - 100.0 * s)),
            action_gap: round(110.0 * s),

            opp_top_y: round(margin + 90.0 * s),
            opp_top_gap: round(28.0 * s),
            opp_side_gap: round(20.0 * s),
            opp_side_x_inset: round(margin + 60.0 * s),
            opp_side_y_top: round(h * 0.30),
            opp_tile: Size {
                w: opp_w,
                h: round(opp_w * TILE_ASPECT),
            },

            discard_tile: Size {
                w: discard_w,
                h: round(discard_w * 1.28),
            },
            discard_bottom_y: round(h * 0.67),
            discard_top_y: round(h * 0.34),
            discard_center_band_y: round(h * 0.50),
            discard_cols: 10,
            discard_side_rows: 10,
            discard_left_x: round(w * 0.23),
            discard_right_x: round(w * 0.77),
            discard_side_y_top: round(h * 0.28),

            wall_count: Point::new(0.0, 0.0),
            wall_font: round(w * 0.022),

            ready_button: Point::new(w / 2.0, h / 2.0),
            ready_button_size: Size {
                w: ready_w,
                h: round(ready_w * 0.42),
            },

            score_button: Point::new(
                w - score_margin - score_w / 2.0,
                score_margin + score_h / 2.0,
            ),
            score_button_size: Size {
                w: score_w,
                h: score_h,
            },
        }
    }

    /// Position of the `index`-th shown discard of a seat. Tiles touch; rows wrap at
    /// `discard_cols` (bottom/top) and columns at `discard_side_rows` (left/right).
    pub fn discard_slot(&self, rel: RelativeSeat, index: usize) -> Placement {
        let tile = self.discard_tile;
        match rel {
            RelativeSeat::Bottom | RelativeSeat::Top => {
                let cols = self.discard_cols;
                let start_x = round(self.w / 2.0 - (cols as f64 * tile.w) / 2.0 + tile.w / 2.0);
                let start_y = if rel == RelativeSeat::Bottom {
                    self.discard_bottom_y
                } else {
                    self.discard_top_y
                };
                Placement {
                    x: start_x + (index % cols) as f64 * tile.w,
                    y: start_y + (index / cols) as f64 * tile.h,
                    angle: 0.0,
                }
            }
            RelativeSeat::Left | RelativeSeat::Right => {
                let rows = self.discard_side_rows;
                let start_x = if rel == RelativeSeat::Left {
                    self.discard_left_x
                } else {
                    self.discard_right_x
                };
                // Rotated tiles swap their footprint.
                Placement {
                    x: start_x + (index / rows) as f64 * tile.h,
                    y: self.discard_side_y_top + (index % rows) as f64 * tile.w,
                    angle: 90.0,
                }
            }
        }
    }

    /// Every visible discard sprite, with the most recent discard flagged for the marker.
    pub fn discards(&self, state: &PublicState) -> Vec<DiscardSprite> {
        let Some(viewer) = state.your_seat else {
            return Vec::new();
        };
        let last = state.discards.len().checked_sub(1);

        let mut out = Vec::new();
        for seat in Seat::all() {
            let own: Vec<(usize, Tile)> = state
                .discards
                .iter()
                .enumerate()
                .filter(|(_, d)| d.seat == seat)
                .map(|(i, d)| (i, d.tile))
                .collect();
            let skip = own.len().saturating_sub(MAX_DISCARDS_SHOWN);
            let rel = seat.relative_to(viewer);
            for (slot, (log_index, tile)) in own.into_iter().skip(skip).enumerate() {
                out.push(DiscardSprite {
                    tile,
                    seat,
                    at: self.discard_slot(rel, slot),
                    is_last: Some(log_index) == last,
                });
            }
        }
        out
    }

    /// Where the next discard of `seat` will land; the renderer's fly-to target.
    pub fn next_discard_slot(&self, state: &PublicState, seat: Seat) -> Option<Placement> {
        let viewer = state.your_seat?;
        let count = state.discards.iter().filter(|d| d.seat == seat).count();
        let slot = count.min(MAX_DISCARDS_SHOWN - 1);
        Some(self.discard_slot(seat.relative_to(viewer), slot))
    }

    /// Bottom area: flowers, then flat melds, then the hand with the drawn tile offset.
    pub fn hand_row(&self, view: &HandView) -> HandRowLayout {
        let hand = self.hand_tile;
        let small = self.small_tile;
        let hand_gap = hand.w;
        let small_gap = small.w;

        let span = |count: usize, gap: f64, width: f64| {
            if count == 0 {
                0.0
            } else {
                (count - 1) as f64 * gap + width
            }
        };
        let drawn_extra = if view.has_drawn {
            round(hand_gap * 0.6)
        } else {
            0.0
        };
        let flowers_w = span(view.flowers.len(), small_gap, small.w);
        let melds_w = span(view.meld_tiles.len(), small_gap, small.w);
        let hand_w = if view.tiles.is_empty() {
            0.0
        } else {
            span(view.tiles.len(), hand_gap, hand.w) + drawn_extra
        };

        let has_flowers = !view.flowers.is_empty();
        let has_melds = !view.meld_tiles.is_empty();
        let flower_to_meld = if has_flowers && has_melds {
            round((hand.w * 0.25).max(10.0))
        } else {
            0.0
        };
        let before_hand = if has_flowers || has_melds {
            round((hand.w * 0.35).max(18.0))
        } else {
            0.0
        };
        let whole_w = flowers_w + flower_to_meld + melds_w + before_hand + hand_w;

        // Keep the row fully on screen.
        let bottom = (self.hand_y + hand.h / 2.0).max(self.hand_y + small.h / 2.0);
        let overflow = bottom - (self.h - 2.0);
        let y = if overflow > 0.0 {
            round(self.hand_y - overflow)
        } else {
            self.hand_y
        };

        let x_left = self.margin;
        let avail = (self.w - 2.0 * self.margin).max(0.0);
        let start = if whole_w > avail {
            x_left
        } else {
            x_left + (avail - whole_w) / 2.0
        };
        let meld_start = start + flowers_w + flower_to_meld;
        let hand_start = meld_start + melds_w + before_hand;

        let row = |n: usize, from: f64, gap: f64, width: f64| -> Vec<Point> {
            (0..n)
                .map(|i| Point::new(from + i as f64 * gap + width / 2.0, y))
                .collect()
        };
        let mut tiles = row(view.tiles.len(), hand_start, hand_gap, hand.w);
        if view.has_drawn
            && let Some(last) = tiles.last_mut()
        {
            last.x += drawn_extra;
        }

        HandRowLayout {
            y,
            hand_tile: hand,
            small_tile: small,
            flowers: row(view.flowers.len(), start, small_gap, small.w),
            melds: row(view.meld_tiles.len(), meld_start, small_gap, small.w),
            tiles,
        }
    }

    /// Button positions in display order: pass at the anchor, claims leftwards from it.
    pub fn action_buttons(&self, prompts: &[Prompt]) -> Vec<(Prompt, Point)> {
        let anchor = self.action_anchor;
        let mut claims = 0;
        prompts
            .iter()
            .map(|&prompt| match prompt {
                Prompt::Pass => (prompt, anchor),
                Prompt::Claim(_) => {
                    claims += 1;
                    (
                        prompt,
                        Point::new(anchor.x - self.action_gap * claims as f64, anchor.y),
                    )
                }
            })
            .collect()
    }

    /// Hidden hand of an opponent: tile backs plus revealed melds, centered on their side.
    pub fn opponent_hand(
        &self,
        rel: RelativeSeat,
        hand_count: usize,
        meld_count: usize,
    ) -> OpponentLayout {
        let shown = hand_count.min(MAX_BACKS_SHOWN);
        let meld_gap = round(28.0 * self.scale);
        let between = if shown > 0 && meld_count > 0 {
            round(27.0 * self.scale)
        } else {
            0.0
        };
        let extent = |n: usize, gap: f64| {
            if n == 0 {
                0.0
            } else {
                (n - 1) as f64 * gap
            }
        };

        match rel {
            RelativeSeat::Bottom => OpponentLayout::default(),
            RelativeSeat::Top => {
                let gap = self.opp_top_gap;
                let backs_w = extent(shown, gap);
                let total = backs_w + between + extent(meld_count, meld_gap);
                let start_x = round(self.w / 2.0 - total / 2.0);
                let y = self.opp_top_y;
                OpponentLayout {
                    backs: (0..shown)
                        .map(|i| placement(start_x + i as f64 * gap, y, 0.0))
                        .collect(),
                    melds: (0..meld_count)
                        .map(|i| {
                            placement(start_x + backs_w + between + i as f64 * meld_gap, y, 0.0)
                        })
                        .collect(),
                }
            }
            RelativeSeat::Left | RelativeSeat::Right => {
                let gap = self.opp_side_gap;
                let x = if rel == RelativeSeat::Left {
                    self.opp_side_x_inset
                } else {
                    self.w - self.opp_side_x_inset
                };
                let backs_h = extent(shown, gap);
                let melds_h = extent(meld_count, meld_gap);
                let mid_y = self.opp_side_y_top + backs_h / 2.0;
                let top = round(mid_y - (backs_h + between + melds_h) / 2.0);
                // Left stacks melds above backs, right stacks backs above melds.
                let (backs_top, melds_top) = if rel == RelativeSeat::Left {
                    (top + melds_h + between, top)
                } else {
                    (top, top + backs_h + between)
                };
                OpponentLayout {
                    backs: (0..shown)
                        .map(|i| placement(x, backs_top + i as f64 * gap, 90.0))
                        .collect(),
                    melds: (0..meld_count)
                        .map(|i| placement(x, melds_top + i as f64 * meld_gap, 90.0))
                        .collect(),
                }
            }
        }
    }

    /// Face-up hand of a round winner at an opponent's position.
    pub fn revealed_hand(&self, rel: RelativeSeat, count: usize) -> Vec<Placement> {
        let gap = round(28.0 * self.scale);
        let extent = if count == 0 {
            0.0
        } else {
            (count - 1) as f64 * gap
        };
        match rel {
            RelativeSeat::Bottom => Vec::new(),
            RelativeSeat::Top => {
                let start_x = round(self.w / 2.0 - extent / 2.0);
                (0..count)
                    .map(|i| placement(start_x + i as f64 * gap, self.opp_top_y, 0.0))
                    .collect()
            }
            RelativeSeat::Left | RelativeSeat::Right => {
                let x = if rel == RelativeSeat::Left {
                    self.opp_side_x_inset
                } else {
                    self.w - self.opp_side_x_inset
                };
                (0..count)
                    .map(|i| placement(x, self.opp_side_y_top + i as f64 * gap, 90.0))
                    .collect()
            }
        }
    }

    /// Compass labels around the center, the current turn highlighted.
    pub fn compass_labels(&self, viewer: Option<Seat>, turn: Seat) -> Vec<CompassLabel> {
        let offset = self.compass_label_offset * self.compass_scale;
        let c = self.compass;
        let spots = [
            (RelativeSeat::Bottom, Point::new(c.x, c.y + offset)),
            (RelativeSeat::Right, Point::new(c.x + offset, c.y)),
            (RelativeSeat::Top, Point::new(c.x, c.y - offset)),
            (RelativeSeat::Left, Point::new(c.x - offset, c.y)),
        ];
        spots
            .into_iter()
            .map(|(rel, at)| {
                let seat = viewer
                    .and_then(|v| Seat::all().into_iter().find(|s| s.relative_to(v) == rel));
                CompassLabel {
                    rel,
                    at,
                    text: seat.map_or("-", Seat::wind_name),
                    active: seat == Some(turn),
                }
            })
            .collect()
    }

    /// Chow picker panel: the claimed tile on the left, option pairs in a grid.
    pub fn chow_picker(&self, option_count: usize) -> ChowPickerLayout {
        let panel = Size {
            w: round(self.w * 0.68),
            h: round(self.h * 0.26),
        };
        let center = Point::new(round(self.w / 2.0), round(self.h / 2.0));
        let tile_w = round(self.w * 0.052);
        let tile = Size {
            w: tile_w,
            h: round(tile_w * 1.28),
        };
        let gap = round(tile_w * 0.18);
        let pad_x = 18.0;

        let sep_x = -panel.w / 2.0 + pad_x + tile.w + 18.0;
        let area_x0 = sep_x + 18.0;
        let area_w = panel.w / 2.0 - pad_x - area_x0;
        let item_w = tile.w * 2.0 + gap * 6.0;
        let cols = ((area_w / item_w).floor() as usize).max(1);
        let row_gap = round(tile.h * 0.32) + 16.0;
        let used_cols = cols.min(option_count);
        let start_x = area_x0 + (area_w - used_cols as f64 * item_w) / 2.0 + item_w / 2.0;
        let half = tile.w / 2.0 + gap * 1.6;

        let options = (0..option_count)
            .map(|i| {
                let x = center.x + round(start_x + (i % cols) as f64 * item_w);
                let y = center.y + round((i / cols) as f64 * row_gap);
                ChowOptionLayout {
                    hit: Point::new(x, y),
                    hit_size: Size {
                        w: item_w - 18.0,
                        h: tile.h + 18.0,
                    },
                    a: Point::new(x - half, y),
                    b: Point::new(x + half, y),
                }
            })
            .collect();

        ChowPickerLayout {
            center,
            panel,
            tile,
            claimed: Point::new(center.x - panel.w / 2.0 + pad_x + tile.w / 2.0, center.y),
            options,
        }
    }
}

fn placement(x: f64, y: f64, angle: f64) -> Placement {
    Placement { x, y, angle }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscardSprite {
    pub tile: Tile,
    pub seat: Seat,
    pub at: Placement,
    pub is_last: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandRowLayout {
    pub y: f64,
    pub hand_tile: Size,
    pub small_tile: Size,
    pub flowers: Vec<Point>,
    pub melds: Vec<Point>,
    /// Centers, one per `HandView::tiles` entry.
    pub tiles: Vec<Point>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpponentLayout {
    pub backs: Vec<Placement>,
    pub melds: Vec<Placement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompassLabel {
    pub rel: RelativeSeat,
    pub at: Point,
    pub text: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChowOptionLayout {
    pub hit: Point,
    pub hit_size: Size,
    pub a: Point,
    pub b: Point,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChowPickerLayout {
    pub center: Point,
    pub panel: Size,
    pub tile: Size,
    pub claimed: Point,
    pub options: Vec<ChowOptionLayout>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ClaimAction;
    use crate::tile::parse_tiles;
    use crate::types::Phase;
    use crate::types::fixtures::{discard, state};

    fn base() -> TableLayout {
        TableLayout::compute(Viewport::new(1100.0, 700.0))
    }

    #[test]
    fn layout_is_idempotent() {
        let vp = Viewport::new(1366.0, 768.0);

        assert_eq!(TableLayout::compute(vp), TableLayout::compute(vp));
    }

    #[test]
    fn reference_width_matches_base_metrics() {
        let l = base();

        assert_eq!(l.scale, 1.0);
        assert_eq!(l.margin, 33.0);
        assert_eq!(l.hand_y, 672.0);
        assert_eq!(l.action_anchor, Point::new(847.0, 572.0));
        assert_eq!(l.action_gap, 110.0);
        assert_eq!(l.compass, Point::new(550.0, 330.0));
    }

    #[test]
    fn anchors_scale_with_viewport() {
        let small = TableLayout::compute(Viewport::new(1100.0, 700.0));
        let big = TableLayout::compute(Viewport::new(2200.0, 1400.0));

        assert_eq!(big.compass.x, small.compass.x * 2.0);
        assert_eq!(big.discard_left_x, small.discard_left_x * 2.0);
        assert_eq!(big.discard_bottom_y, small.discard_bottom_y * 2.0);
        assert_eq!(big.action_gap, small.action_gap * 2.0);
    }

    #[test]
    fn bottom_discards_wrap_after_ten() {
        let l = base();
        let first = l.discard_slot(RelativeSeat::Bottom, 0);
        let tenth = l.discard_slot(RelativeSeat::Bottom, 10);

        assert_eq!(tenth.x, first.x);
        assert_eq!(tenth.y, first.y + l.discard_tile.h);
        assert_eq!(first.angle, 0.0);
        assert_eq!(l.discard_slot(RelativeSeat::Left, 3).angle, 90.0);
    }

    #[test]
    fn discards_flag_only_the_latest() {
        let l = base();
        let mut st = state(Phase::Claim, "m1");
        st.discards = vec![discard(0, "m1"), discard(1, "p2"), discard(0, "s3")];
        let sprites = l.discards(&st);

        assert_eq!(sprites.len(), 3);
        assert_eq!(sprites.iter().filter(|s| s.is_last).count(), 1);
        let last = sprites.iter().find(|s| s.is_last).unwrap();
        assert_eq!(last.tile.to_string(), "s3");
        assert_eq!(last.at, l.discard_slot(RelativeSeat::Bottom, 1));
    }

    #[test]
    fn next_discard_lands_where_it_is_drawn() {
        let l = base();
        for count in [0, 39, MAX_DISCARDS_SHOWN, MAX_DISCARDS_SHOWN + 5] {
            let mut st = state(Phase::Discard, "m1");
            st.discards = vec![discard(0, "p1"); count];
            let target = l.next_discard_slot(&st, Seat::EAST).unwrap();

            st.discards.push(discard(0, "s9"));
            let landed = l.discards(&st).into_iter().find(|s| s.is_last).unwrap();
            assert_eq!(target, landed.at, "{count} earlier discards");
        }
    }

    #[test]
    fn action_buttons_extend_left_of_pass() {
        let l = base();
        let prompts = [
            Prompt::Claim(ClaimAction::Win),
            Prompt::Claim(ClaimAction::Pung),
            Prompt::Pass,
        ];
        let buttons = l.action_buttons(&prompts);

        assert_eq!(buttons[2].1, l.action_anchor);
        assert_eq!(buttons[0].1.x, l.action_anchor.x - l.action_gap);
        assert_eq!(buttons[1].1.x, l.action_anchor.x - 2.0 * l.action_gap);
    }

    #[test]
    fn drawn_tile_gets_extra_gap() {
        let l = base();
        let hand = parse_tiles("m1 m2 m3").unwrap();
        let plain = HandView::build(&hand, None, &[]);
        let drawn = HandView::build(
            &hand,
            Some(crate::draw_tracker::PendingDraw {
                index: 2,
                tile: hand[2],
            }),
            &[],
        );
        let a = l.hand_row(&plain);
        let b = l.hand_row(&drawn);

        let gap_plain = a.tiles[2].x - a.tiles[1].x;
        let gap_drawn = b.tiles[2].x - b.tiles[1].x;
        assert_eq!(gap_drawn - gap_plain, (l.hand_tile.w * 0.6).round());
        assert!(b.tiles.iter().all(|p| p.y + l.hand_tile.h / 2.0 <= l.h));
    }

    #[test]
    fn compass_highlights_current_turn() {
        let l = base();
        let labels = l.compass_labels(Some(Seat::SOUTH), Seat::WEST);

        let active: Vec<_> = labels.iter().filter(|c| c.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].rel, RelativeSeat::Right);
        assert_eq!(active[0].text, "西");

        let unseated = l.compass_labels(None, Seat::EAST);
        assert!(unseated.iter().all(|c| c.text == "-" && !c.active));
    }

    #[test]
    fn opponent_backs_are_capped() {
        let l = base();
        let top = l.opponent_hand(RelativeSeat::Top, 25, 3);

        assert_eq!(top.backs.len(), MAX_BACKS_SHOWN);
        assert_eq!(top.melds.len(), 3);
        assert!(top.melds[0].x > top.backs.last().unwrap().x);
        assert!(l.opponent_hand(RelativeSeat::Bottom, 13, 0).backs.is_empty());
    }

    #[test]
    fn picker_options_fit_in_panel() {
        let l = base();
        let picker = l.chow_picker(3);

        assert_eq!(picker.options.len(), 3);
        for opt in &picker.options {
            assert!(opt.hit.x > picker.claimed.x);
            assert!(opt.hit.x < picker.center.x + picker.panel.w / 2.0);
        }
    }
}
