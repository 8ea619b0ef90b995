use serde::Serialize;

use crate::types::ChowPair;

/// Outbound command. Fire-and-forget: no acknowledgement is tracked.
///
/// Serialized as `{"event": <socket event>, "payload": {...}}`; unit commands carry no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "payload")]
pub enum Command {
    #[serde(rename = "setName")]
    SetName { name: String },
    #[serde(rename = "ready")]
    MarkReady,
    #[serde(rename = "draw")]
    Draw,
    /// `index` is the tile's position in the snapshot's hand array, not on screen.
    #[serde(rename = "discard")]
    Discard { index: usize },
    #[serde(rename = "checkWin")]
    DeclareWin,
    #[serde(rename = "gang")]
    DeclareKong,
    #[serde(rename = "peng")]
    DeclarePung,
    #[serde(rename = "chi")]
    DeclareChow { choice: Option<ChowPair> },
    #[serde(rename = "passClaim")]
    PassClaim,
}

impl Command {
    pub fn event_name(&self) -> &'static str {
        match self {
            Command::SetName { .. } => "setName",
            Command::MarkReady => "ready",
            Command::Draw => "draw",
            Command::Discard { .. } => "discard",
            Command::DeclareWin => "checkWin",
            Command::DeclareKong => "gang",
            Command::DeclarePung => "peng",
            Command::DeclareChow { .. } => "chi",
            Command::PassClaim => "passClaim",
        }
    }
}
