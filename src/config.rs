use serde::Deserialize;

use crate::error::{ClientError, ClientResult};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5174";
pub const DEFAULT_ROOM_ID: &str = "main";

/// Client settings handed over by the page. Every field is optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    pub server_url: String,
    pub room_id: String,
    pub display_name: Option<String>,
    /// Queue `draw()` automatically when it is the viewer's draw phase.
    pub auto_draw: bool,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            room_id: DEFAULT_ROOM_ID.to_string(),
            display_name: None,
            auto_draw: true,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> ClientResult<Self> {
        let config: Self = serde_json::from_str(raw).map_err(|err| ClientError::InvalidConfig {
            message: err.to_string(),
        })?;
        config.normalized()
    }

    /// Trims names, falls back to defaults for blanks, and validates the server URL.
    pub fn normalized(mut self) -> ClientResult<Self> {
        self.server_url = self.server_url.trim().to_string();
        if self.server_url.is_empty() {
            self.server_url = DEFAULT_SERVER_URL.to_string();
        }
        let room = self.room_id.trim();
        self.room_id = if room.is_empty() {
            DEFAULT_ROOM_ID.to_string()
        } else {
            room.to_string()
        };
        self.display_name = self
            .display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> ClientResult<()> {
        const SCHEMES: [&str; 4] = ["http://", "https://", "ws://", "wss://"];
        if !SCHEMES.iter().any(|s| self.server_url.starts_with(s)) {
            return Err(ClientError::InvalidConfig {
                message: format!("unsupported server url '{}'", self.server_url),
            });
        }
        if self.log_level.parse::<tracing::Level>().is_err() {
            return Err(ClientError::InvalidConfig {
                message: format!("unknown log level '{}'", self.log_level),
            });
        }
        Ok(())
    }
}
