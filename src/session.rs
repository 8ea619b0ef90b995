//! The table client as one owner on the cooperative loop.
//!
//! Snapshots, gestures and the discard-animation callback all come through here one at a
//! time. Outgoing commands are queued and drained by the transport with
//! [`TableSession::take_commands`].

use serde::Serialize;

use crate::actions::{ActionEngine, ChowPicker, Choice, ClaimAction, Offer, Prompt};
use crate::command::Command;
use crate::config::ClientConfig;
use crate::draw_tracker::DrawTracker;
use crate::error::{ClientError, ClientResult};
use crate::fingerprint::Fingerprint;
use crate::hand::HandView;
use crate::layout::{
    ChowPickerLayout, CompassLabel, DiscardSprite, HandRowLayout, OpponentLayout, Placement, Point,
    TableLayout, Viewport,
};
use crate::tile::Tile;
use crate::types::{Phase, PlayerInfo, PublicState, RelativeSeat, RoundRecord, RoundResult, Seat};

/// Scoreboard rows shown, newest first.
pub const MAX_ROUNDS_SHOWN: usize = 12;

const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1100.0,
    height: 700.0,
};

/// A discard whose animation is running. Its command is queued on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlightDiscard {
    original_index: usize,
    tile: Tile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TapOutcome {
    #[serde(rename_all = "camelCase")]
    Selected { display_index: usize },
    /// Animate from `display_index` to `target`, then call `finish_discard`.
    #[serde(rename_all = "camelCase")]
    DiscardStarted {
        display_index: usize,
        original_index: usize,
        tile: Tile,
        target: Option<Placement>,
    },
}

pub struct TableSession {
    config: ClientConfig,
    viewport: Viewport,
    state: Option<PublicState>,
    hand: HandView,
    draw: DrawTracker,
    actions: ActionEngine,
    selected: Option<usize>,
    in_flight: Option<InFlightDiscard>,
    auto_draw_token: Option<Fingerprint>,
    ready_sent: bool,
    last_digest: Option<u32>,
    transport_error: Option<ClientError>,
    advisory: Option<String>,
    outbox: Vec<Command>,
}

impl TableSession {
    pub fn new(config: ClientConfig) -> Self {
        let mut outbox = Vec::new();
        if let Some(name) = &config.display_name {
            outbox.push(Command::SetName { name: name.clone() });
        }
        Self {
            config,
            viewport: DEFAULT_VIEWPORT,
            state: None,
            hand: HandView::build(&[], None, &[]),
            draw: DrawTracker::new(),
            actions: ActionEngine::new(),
            selected: None,
            in_flight: None,
            auto_draw_token: None,
            ready_sent: false,
            last_digest: None,
            transport_error: None,
            advisory: None,
            outbox,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> Option<&PublicState> {
        self.state.as_ref()
    }

    pub fn hand(&self) -> &HandView {
        &self.hand
    }

    pub fn actions(&self) -> &ActionEngine {
        &self.actions
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn layout(&self) -> TableLayout {
        TableLayout::compute(self.viewport)
    }

    /// Applies a raw JSON snapshot. Returns `false` when it is a byte-identical redelivery.
    pub fn apply_state_json(&mut self, raw: &str) -> ClientResult<bool> {
        let digest = crc32fast::hash(raw.as_bytes());
        if self.last_digest == Some(digest) && self.transport_error.is_none() {
            tracing::debug!(digest, "duplicate snapshot skipped");
            return Ok(false);
        }
        let state = PublicState::from_json(raw)?;
        self.apply_state(state);
        self.last_digest = Some(digest);
        Ok(true)
    }

    /// Applies a decoded snapshot. Processing the same snapshot twice is a no-op for
    /// every piece of local state.
    pub fn apply_state(&mut self, state: PublicState) {
        if let Err(err) = state.check_consistency() {
            tracing::warn!(%err, "snapshot inconsistency");
        }

        let boundary = self
            .state
            .as_ref()
            .is_some_and(|prev| is_round_boundary(prev, &state));
        if boundary {
            tracing::info!(wall_count = state.wall_count, "round boundary");
            self.draw.reset();
            self.selected = None;
        }
        let hand_changed = self
            .state
            .as_ref()
            .is_none_or(|prev| prev.your_hand != state.your_hand);
        if hand_changed {
            self.selected = None;
        }

        self.last_digest = None;
        self.transport_error = None;
        self.advisory = None;
        if state.phase != Phase::End {
            self.ready_sent = false;
        }

        let pending = self.draw.observe(&state.your_hand, state.can_discard());
        self.hand = HandView::build(&state.your_hand, pending, &state.your_melds);

        if self.in_flight.is_none() {
            self.actions.update(&state);
        }
        self.auto_draw(&state);
        self.state = Some(state);
    }

    /// Transport-level failure. Shown verbatim until the next snapshot arrives.
    pub fn report_error(&mut self, message: &str) {
        tracing::warn!(error = message, "transport error");
        self.transport_error = Some(ClientError::Transport {
            message: message.to_string(),
        });
    }

    fn auto_draw(&mut self, state: &PublicState) {
        if !(self.config.auto_draw && state.can_draw()) {
            self.auto_draw_token = None;
            return;
        }
        let token = Fingerprint::of(state);
        if self.auto_draw_token != Some(token) {
            tracing::debug!(%token, "auto draw");
            self.auto_draw_token = Some(token);
            self.outbox.push(Command::Draw);
        }
    }

    /// First tap selects a tile; a second tap on the same position starts its discard.
    pub fn tap_tile(&mut self, display_index: usize) -> ClientResult<TapOutcome> {
        if self.in_flight.is_some() {
            return Err(ClientError::DiscardInFlight);
        }
        let entry = *self
            .hand
            .tiles
            .get(display_index)
            .ok_or(ClientError::NoSuchTile { display_index })?;

        if self.selected != Some(display_index) {
            self.selected = Some(display_index);
            return Ok(TapOutcome::Selected { display_index });
        }

        let Some(state) = self.state.as_ref().filter(|st| st.can_discard()) else {
            tracing::warn!(display_index, "discard rejected: not the viewer's turn");
            let err = ClientError::NotYourTurn;
            self.advisory = Some(err.advisory());
            return Err(err);
        };

        let target = state
            .your_seat
            .and_then(|seat| self.layout().next_discard_slot(state, seat));
        self.in_flight = Some(InFlightDiscard {
            original_index: entry.original_index,
            tile: entry.tile,
        });
        Ok(TapOutcome::DiscardStarted {
            display_index,
            original_index: entry.original_index,
            tile: entry.tile,
            target,
        })
    }

    /// Animation completion callback. Queues the discard and releases the busy flag.
    pub fn finish_discard(&mut self) -> ClientResult<Option<Command>> {
        let Some(discard) = self.in_flight.take() else {
            return Ok(None);
        };

        let outcome = match self.state.as_ref() {
            Some(state) if state.can_discard() => {
                let command = Command::Discard {
                    index: discard.original_index,
                };
                tracing::debug!(
                    index = discard.original_index,
                    tile = %discard.tile,
                    "discard sent"
                );
                self.outbox.push(command.clone());
                self.draw.clear_pending();
                self.selected = None;
                self.hand = HandView::build(&state.your_hand, None, &state.your_melds);
                Ok(Some(command))
            }
            _ => {
                let err = ClientError::NotYourTurn;
                self.advisory = Some(err.advisory());
                Err(err)
            }
        };

        if let Some(state) = &self.state {
            self.actions.update(state);
        }
        outcome
    }

    pub fn choose_action(&mut self, action: ClaimAction) -> ClientResult<bool> {
        self.ensure_idle()?;
        match self.actions.choose(action)? {
            Choice::Commit(command) => {
                self.outbox.push(command);
                Ok(false)
            }
            Choice::PickerOpened => Ok(true),
        }
    }

    pub fn pass(&mut self) -> ClientResult<()> {
        self.ensure_idle()?;
        if let Some(command) = self.actions.pass()? {
            self.outbox.push(command);
        }
        Ok(())
    }

    pub fn pick_chow(&mut self, index: usize) -> ClientResult<()> {
        self.ensure_idle()?;
        let command = self.actions.pick_chow(index)?;
        self.outbox.push(command);
        Ok(())
    }

    pub fn cancel_chow(&mut self) -> ClientResult<()> {
        self.actions.cancel_chow()
    }

    /// Ready once per round end; always allowed in the lobby. Returns whether it was queued.
    pub fn mark_ready(&mut self) -> bool {
        let lobby = self.state.as_ref().is_none_or(|st| !st.started);
        let round_over = self
            .state
            .as_ref()
            .is_some_and(|st| st.phase == Phase::End);
        if lobby {
            self.outbox.push(Command::MarkReady);
            return true;
        }
        if round_over && !self.ready_sent {
            self.ready_sent = true;
            self.outbox.push(Command::MarkReady);
            return true;
        }
        false
    }

    pub fn set_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.outbox.push(Command::SetName {
            name: name.to_string(),
        });
        true
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    fn ensure_idle(&self) -> ClientResult<()> {
        if self.in_flight.is_some() {
            Err(ClientError::DiscardInFlight)
        } else {
            Ok(())
        }
    }

    fn status_line(&self) -> String {
        if let Some(err) = &self.transport_error {
            return format!("⚠ {}", err.advisory());
        }
        if let Some(advisory) = &self.advisory {
            return format!("⚠ {}", advisory);
        }
        let Some(state) = &self.state else {
            return "Not connected.".to_string();
        };
        if let Some(result) = &state.result
            && !result.winners.is_empty()
        {
            let winners: Vec<&str> = result.winners.iter().map(|s| s.wind_name()).collect();
            let reason = result
                .reason
                .as_deref()
                .or(state.win_info.as_ref().map(|w| w.reason.as_str()))
                .unwrap_or("-");
            return format!("{} won ({})", winners.join(","), reason);
        }
        state.message.clone()
    }

    pub fn view(&self) -> TableView {
        let st = self.state.as_ref();
        let prompts = self.actions.prompts();
        let prompt_key = match self.actions.offer() {
            Offer::Offered { fingerprint, .. } => Some(fingerprint.digest()),
            Offer::Hidden => None,
        };
        let history = st.map(|s| s.round_history.as_slice()).unwrap_or(&[]);

        TableView {
            connected: st.is_some_and(|s| s.connected) && self.transport_error.is_none(),
            started: st.is_some_and(|s| s.started),
            your_seat: st.and_then(|s| s.your_seat),
            turn: st.map(|s| s.turn),
            phase: st.map(|s| s.phase),
            wall_count: st.map(|s| s.wall_count),
            status: self.status_line(),
            hand: self.hand.clone(),
            selected: self.selected,
            can_draw: st.is_some_and(PublicState::can_draw),
            can_discard: st.is_some_and(PublicState::can_discard),
            busy: self.is_busy(),
            prompts,
            prompt_key,
            chow_picker: self.actions.picker().cloned(),
            show_ready: st.is_some_and(|s| s.phase == Phase::End),
            ready_sent: self.ready_sent,
            players: st.map(|s| s.players.clone()).unwrap_or_default(),
            hand_counts: st.map(|s| s.hand_counts.clone()).unwrap_or_default(),
            scores: st.map(|s| s.scores.clone()).unwrap_or_default(),
            rounds: history
                .iter()
                .rev()
                .take(MAX_ROUNDS_SHOWN)
                .cloned()
                .collect(),
            rounds_hidden: history.len().saturating_sub(MAX_ROUNDS_SHOWN),
            result: st.and_then(|s| s.result.clone()),
        }
    }

    /// Positions for everything on the table under the current viewport.
    pub fn scene(&self) -> TableScene {
        let layout = self.layout();
        let prompts = self.actions.prompts();
        let mut scene = TableScene {
            hand_row: layout.hand_row(&self.hand),
            action_buttons: layout.action_buttons(&prompts),
            chow_picker: self
                .actions
                .picker()
                .map(|picker| layout.chow_picker(picker.options.len())),
            layout,
            discards: Vec::new(),
            opponents: Vec::new(),
            compass: Vec::new(),
        };
        let Some(state) = &self.state else {
            return scene;
        };

        scene.discards = layout.discards(state);
        scene.compass = layout.compass_labels(state.your_seat, state.turn);
        let Some(viewer) = state.your_seat else {
            return scene;
        };
        for seat in Seat::all().into_iter().filter(|&s| s != viewer) {
            let rel = seat.relative_to(viewer);
            let meld_tiles: Vec<Tile> = state
                .melds_of(seat)
                .iter()
                .flat_map(|meld| meld.tiles().iter().copied())
                .collect();
            // Only winners show their hand face up.
            let revealed = match &state.result {
                Some(result) if state.phase == Phase::End && result.is_winner(seat) => result
                    .hand_of(seat)
                    .map(|hand| {
                        hand.iter()
                            .copied()
                            .zip(layout.revealed_hand(rel, hand.len()))
                            .collect()
                    })
                    .unwrap_or_default(),
                _ => Vec::new(),
            };
            let hidden = if revealed.is_empty() {
                state.hand_count(seat) as usize
            } else {
                0
            };
            scene.opponents.push(OpponentScene {
                seat,
                rel,
                sprites: layout.opponent_hand(rel, hidden, meld_tiles.len()),
                meld_tiles,
                revealed,
            });
        }
        scene
    }
}

fn is_round_boundary(prev: &PublicState, next: &PublicState) -> bool {
    (prev.phase == Phase::End && next.phase != Phase::End)
        || (!prev.started && next.started)
        || prev.your_seat != next.your_seat
}

/// Serializable display model handed to the renderer each frame it needs one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub connected: bool,
    pub started: bool,
    pub your_seat: Option<Seat>,
    pub turn: Option<Seat>,
    pub phase: Option<Phase>,
    pub wall_count: Option<u32>,
    pub status: String,
    pub hand: HandView,
    pub selected: Option<usize>,
    pub can_draw: bool,
    pub can_discard: bool,
    pub busy: bool,
    pub prompts: Vec<Prompt>,
    /// Changes whenever a different decision point is offered.
    pub prompt_key: Option<u32>,
    pub chow_picker: Option<ChowPicker>,
    pub show_ready: bool,
    pub ready_sent: bool,
    pub players: Vec<Option<PlayerInfo>>,
    pub hand_counts: Vec<u32>,
    pub scores: Vec<i32>,
    pub rounds: Vec<RoundRecord>,
    pub rounds_hidden: usize,
    pub result: Option<RoundResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpponentScene {
    pub seat: Seat,
    pub rel: RelativeSeat,
    pub sprites: OpponentLayout,
    /// Face-up meld tiles, one per `sprites.melds` entry.
    pub meld_tiles: Vec<Tile>,
    pub revealed: Vec<(Tile, Placement)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableScene {
    pub layout: TableLayout,
    pub hand_row: HandRowLayout,
    pub action_buttons: Vec<(Prompt, Point)>,
    pub chow_picker: Option<ChowPickerLayout>,
    pub discards: Vec<DiscardSprite>,
    pub opponents: Vec<OpponentScene>,
    pub compass: Vec<CompassLabel>,
}
