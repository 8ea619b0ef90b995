use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Connection refused or lost. The message is shown to the user verbatim.
    Transport { message: String },
    /// Discard attempted outside the viewer's own discard phase.
    NotYourTurn,
    /// A discard animation is still running; its command has not been queued yet.
    DiscardInFlight,
    /// Display position outside the current hand row.
    NoSuchTile { display_index: usize },
    /// Action not among the prompts currently offered.
    ActionNotOffered { action: String },
    /// Chow pick or cancel without an open picker.
    PickerClosed,
    NoSuchChowOption { index: usize },
    InvalidTile { input: String },
    InvalidSeat { value: u8 },
    /// Snapshot could not be decoded, or disagrees with itself.
    InvalidSnapshot { message: String },
    InvalidConfig { message: String },
}

impl ClientError {
    /// Text for the status line. Transport failures are surfaced as-is.
    pub fn advisory(&self) -> String {
        match self {
            ClientError::Transport { message } => message.clone(),
            ClientError::NotYourTurn => "It is not your turn to discard.".to_string(),
            ClientError::DiscardInFlight => "Discard already in progress.".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport { message } => write!(f, "transport error: {}", message),
            ClientError::NotYourTurn => write!(f, "it is not the viewer's turn to discard"),
            ClientError::DiscardInFlight => write!(f, "a discard is already in flight"),
            ClientError::NoSuchTile { display_index } => {
                write!(f, "no hand tile at display position {}", display_index)
            }
            ClientError::ActionNotOffered { action } => {
                write!(f, "action '{}' is not currently offered", action)
            }
            ClientError::PickerClosed => write!(f, "chow picker is not open"),
            ClientError::NoSuchChowOption { index } => {
                write!(f, "no chow option at index {}", index)
            }
            ClientError::InvalidTile { input } => write!(f, "invalid tile code '{}'", input),
            ClientError::InvalidSeat { value } => write!(f, "invalid seat {}", value),
            ClientError::InvalidSnapshot { message } => write!(f, "invalid snapshot: {}", message),
            ClientError::InvalidConfig { message } => write!(f, "invalid config: {}", message),
        }
    }
}

impl std::error::Error for ClientError {}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::InvalidSnapshot {
            message: err.to_string(),
        }
    }
}

impl From<ClientError> for wasm_bindgen::JsValue {
    fn from(err: ClientError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
