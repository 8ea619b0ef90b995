use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::tile::Tile;

pub const SEAT_COUNT: u8 = 4;

/// Absolute seat index, numbered clockwise from East.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Seat(u8);

impl Seat {
    pub const EAST: Seat = Seat(0);
    pub const SOUTH: Seat = Seat(1);
    pub const WEST: Seat = Seat(2);
    pub const NORTH: Seat = Seat(3);

    pub fn new(value: u8) -> Result<Self, ClientError> {
        if value < SEAT_COUNT {
            Ok(Seat(value))
        } else {
            Err(ClientError::InvalidSeat { value })
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> [Seat; 4] {
        [Seat(0), Seat(1), Seat(2), Seat(3)]
    }

    /// Where `self` sits on screen when `viewer` is at the bottom.
    pub fn relative_to(self, viewer: Seat) -> RelativeSeat {
        match (viewer.0 + SEAT_COUNT - self.0) % SEAT_COUNT {
            0 => RelativeSeat::Bottom,
            1 => RelativeSeat::Left,
            2 => RelativeSeat::Top,
            _ => RelativeSeat::Right,
        }
    }

    pub fn wind_name(self) -> &'static str {
        match self.0 {
            0 => "东",
            1 => "南",
            2 => "西",
            _ => "北",
        }
    }
}

impl TryFrom<u8> for Seat {
    type Error = ClientError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Seat::new(value)
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> Self {
        seat.0
    }
}

/// Screen position of a seat relative to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeSeat {
    Bottom,
    Left,
    Top,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Draw,
    Discard,
    Claim,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscardEvent {
    pub seat: Seat,
    pub tile: Tile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KongKind {
    Discard,
    Concealed,
    Add,
}

/// A revealed meld. Wire names follow the server (`peng`, `chi`, `gang`, `flower`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Meld {
    #[serde(rename = "peng")]
    Pung {
        tiles: [Tile; 3],
        #[serde(rename = "fromSeat")]
        from_seat: Seat,
    },
    #[serde(rename = "chi")]
    Chow {
        tiles: [Tile; 3],
        #[serde(rename = "fromSeat")]
        from_seat: Seat,
    },
    #[serde(rename = "gang")]
    Kong {
        tiles: [Tile; 4],
        #[serde(rename = "fromSeat", default)]
        from_seat: Option<Seat>,
        kind: KongKind,
    },
    Flower { tiles: [Tile; 1] },
}

impl Meld {
    pub fn tiles(&self) -> &[Tile] {
        match self {
            Meld::Pung { tiles, .. } | Meld::Chow { tiles, .. } => tiles,
            Meld::Kong { tiles, .. } => tiles,
            Meld::Flower { tiles } => tiles,
        }
    }

    pub fn is_flower(&self) -> bool {
        matches!(self, Meld::Flower { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub seat: Seat,
    pub name: String,
    #[serde(default)]
    pub ready: bool,
}

/// End-of-round outcome.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoundResult {
    pub winners: Vec<Seat>,
    /// Revealed hands keyed by seat number as the server sends it (`"0"`..`"3"`).
    pub hands_by_seat: HashMap<String, Vec<Tile>>,
    pub reason: Option<String>,
}

impl RoundResult {
    pub fn hand_of(&self, seat: Seat) -> Option<&[Tile]> {
        self.hands_by_seat
            .get(&u8::from(seat).to_string())
            .map(Vec::as_slice)
    }

    pub fn is_winner(&self, seat: Seat) -> bool {
        self.winners.contains(&seat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinInfo {
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinType {
    #[serde(rename = "self")]
    SelfDrawn,
    Discard,
}

/// One finished round in the scoreboard history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub round: u32,
    #[serde(default)]
    pub winners: Vec<Seat>,
    #[serde(default)]
    pub win_tile: Option<Tile>,
    #[serde(default)]
    pub win_type: Option<WinType>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub delta_by_seat: Vec<i32>,
}

/// Two hand tiles that complete a chow with the claimed discard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChowPair {
    pub a: Tile,
    pub b: Tile,
}

impl From<[Tile; 2]> for ChowPair {
    fn from([a, b]: [Tile; 2]) -> Self {
        Self { a, b }
    }
}

fn default_true() -> bool {
    true
}

/// Full table snapshot as broadcast by the server.
///
/// Contract:
/// - Self-contained: every authoritative fact is readable without a prior snapshot.
/// - `your_hand` order is whatever the server reports and carries no meaning.
/// - The four `*_available` flags are authoritative; the client never re-derives legality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicState {
    #[serde(default = "default_true")]
    pub connected: bool,
    #[serde(default)]
    pub players: Vec<Option<PlayerInfo>>,
    #[serde(default = "default_true")]
    pub started: bool,
    pub wall_count: u32,
    #[serde(default)]
    pub discards: Vec<DiscardEvent>,
    pub turn: Seat,
    pub phase: Phase,
    #[serde(default)]
    pub your_seat: Option<Seat>,
    #[serde(default)]
    pub your_hand: Vec<Tile>,
    #[serde(default)]
    pub your_melds: Vec<Meld>,
    #[serde(default)]
    pub melds_by_seat: Vec<Vec<Meld>>,
    #[serde(default)]
    pub hand_counts: Vec<u32>,
    #[serde(default)]
    pub win_available: bool,
    #[serde(default, rename = "gangAvailable")]
    pub kong_available: bool,
    #[serde(default, rename = "pengAvailable")]
    pub pung_available: bool,
    #[serde(default, rename = "chiAvailable")]
    pub chow_available: bool,
    #[serde(default, rename = "chiOptions")]
    pub chow_options: Vec<[Tile; 2]>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: Option<RoundResult>,
    #[serde(default)]
    pub win_info: Option<WinInfo>,
    #[serde(default)]
    pub scores: Vec<i32>,
    #[serde(default)]
    pub round_history: Vec<RoundRecord>,
}

impl PublicState {
    pub fn from_json(raw: &str) -> Result<Self, ClientError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn last_discard(&self) -> Option<DiscardEvent> {
        self.discards.last().copied()
    }

    pub fn is_viewer_turn(&self) -> bool {
        self.connected && self.started && self.your_seat == Some(self.turn)
    }

    pub fn can_draw(&self) -> bool {
        self.is_viewer_turn() && self.phase == Phase::Draw
    }

    pub fn can_discard(&self) -> bool {
        self.is_viewer_turn() && self.phase == Phase::Discard
    }

    pub fn hand_count(&self, seat: Seat) -> u32 {
        self.hand_counts.get(seat.index()).copied().unwrap_or(0)
    }

    pub fn melds_of(&self, seat: Seat) -> &[Meld] {
        self.melds_by_seat
            .get(seat.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Reports self-contradictions. The server stays authoritative, so callers log and continue.
    pub fn check_consistency(&self) -> Result<(), ClientError> {
        let invalid = |message: String| Err(ClientError::InvalidSnapshot { message });

        if self.players.len() > SEAT_COUNT as usize {
            return invalid(format!("{} player slots", self.players.len()));
        }
        if self.hand_counts.len() > SEAT_COUNT as usize {
            return invalid(format!("{} hand counts", self.hand_counts.len()));
        }
        if let Some(seat) = self.your_seat
            && let Some(&count) = self.hand_counts.get(seat.index())
            && count as usize != self.your_hand.len()
        {
            return invalid(format!(
                "viewer hand has {} tiles but handCounts says {}",
                self.your_hand.len(),
                count
            ));
        }
        if self.phase == Phase::Discard && self.started && self.your_seat.is_none() {
            return invalid("discard phase without a seated viewer".to_string());
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::state;
    use super::*;

    const SNAPSHOT: &str = r#"{
        "connected": true,
        "players": [{"seat":0,"name":"a","ready":true}, null, {"seat":2,"name":"c","ready":false}, null],
        "started": true,
        "wallCount": 70,
        "discards": [{"seat":1,"tile":"p3"}],
        "turn": 2,
        "phase": "claim",
        "yourSeat": 0,
        "yourHand": ["m1","m2","f1"],
        "yourMelds": [{"type":"flower","tiles":["f2"],"fromSeat":null,"kind":"flower"}],
        "meldsBySeat": [[], [{"type":"gang","tiles":["s1","s1","s1","s1"],"fromSeat":null,"kind":"concealed"}], [], []],
        "handCounts": [3, 10, 13, 13],
        "winAvailable": false,
        "gangAvailable": false,
        "pengAvailable": true,
        "chiAvailable": true,
        "chiOptions": [["p1","p2"],["p2","p4"]],
        "message": "claim window",
        "result": {"winners":[2],"handsBySeat":{"2":["m1","m1"]},"reason":"self draw"},
        "someFutureField": 1
    }"#;

    #[test]
    fn decodes_server_snapshot() {
        let st = PublicState::from_json(SNAPSHOT).unwrap();

        assert_eq!(st.phase, Phase::Claim);
        assert_eq!(st.turn, Seat::WEST);
        assert_eq!(st.your_hand.len(), 3);
        assert!(st.your_melds[0].is_flower());
        assert!(matches!(
            st.melds_of(Seat::SOUTH)[0],
            Meld::Kong {
                from_seat: None,
                kind: KongKind::Concealed,
                ..
            }
        ));
        assert!(st.pung_available && st.chow_available && !st.kong_available);
        assert_eq!(st.chow_options.len(), 2);
        let result = st.result.as_ref().unwrap();
        assert!(result.is_winner(Seat::WEST));
        assert_eq!(result.hand_of(Seat::WEST).map(<[Tile]>::len), Some(2));
        assert_eq!(st.last_discard().unwrap().tile.to_string(), "p3");
        assert!(st.check_consistency().is_ok());
    }

    #[test]
    fn rejects_seat_out_of_range() {
        let raw = SNAPSHOT.replace(r#""turn": 2"#, r#""turn": 4"#);

        assert!(PublicState::from_json(&raw).is_err());
    }

    #[test]
    fn relative_seats_go_clockwise_from_viewer() {
        let you = Seat::SOUTH;

        assert_eq!(Seat::SOUTH.relative_to(you), RelativeSeat::Bottom);
        assert_eq!(Seat::EAST.relative_to(you), RelativeSeat::Left);
        assert_eq!(Seat::NORTH.relative_to(you), RelativeSeat::Top);
        assert_eq!(Seat::WEST.relative_to(you), RelativeSeat::Right);
    }

    #[test]
    fn turn_predicates_follow_phase_and_seat() {
        let mut st = state(Phase::Discard, "m1 m2");
        assert!(st.can_discard());
        assert!(!st.can_draw());

        st.turn = Seat::SOUTH;
        assert!(!st.can_discard());

        st.turn = Seat::EAST;
        st.connected = false;
        assert!(!st.can_discard());
    }

    #[test]
    fn hand_count_mismatch_is_reported() {
        let mut st = state(Phase::Discard, "m1 m2");
        st.hand_counts = vec![5, 13, 13, 13];

        assert!(matches!(
            st.check_consistency(),
            Err(ClientError::InvalidSnapshot { .. })
        ));
    }
}
