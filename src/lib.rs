use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod actions;
pub mod command;
pub mod config;
pub mod draw_tracker;
pub mod error;
pub mod fingerprint;
pub mod hand;
pub mod layout;
pub mod logging;
pub mod session;
pub mod tile;
pub mod types;

use crate::actions::ClaimAction;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::layout::{TableLayout, Viewport};
use crate::session::TableSession;
use crate::tile::ALL_TILES;
use crate::types::PublicState;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: &str) {
    logging::init(level);
}

#[wasm_bindgen(js_name = computeLayout)]
pub fn compute_layout(width: f64, height: f64) -> Result<JsValue, JsValue> {
    to_js(&TableLayout::compute(Viewport::new(width, height)))
}

/// Every tile code the renderer needs a texture for.
#[wasm_bindgen(js_name = allTileCodes)]
pub fn all_tile_codes() -> Vec<String> {
    ALL_TILES.iter().map(|tile| tile.to_string()).collect()
}

#[wasm_bindgen(js_name = textureKeys)]
pub fn texture_keys() -> Vec<String> {
    tile::texture_keys()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Plain objects instead of JS `Map`s for the seat-keyed maps.
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

#[wasm_bindgen]
pub struct MahjongTable {
    session: TableSession,
}

#[wasm_bindgen]
impl MahjongTable {
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<MahjongTable, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            ClientConfig::default()
        } else {
            serde_wasm_bindgen::from_value::<ClientConfig>(config)
                .map_err(|err| ClientError::InvalidConfig {
                    message: err.to_string(),
                })?
                .normalized()?
        };
        logging::init(&config.log_level);
        tracing::info!(server = %config.server_url, room = %config.room_id, "table client ready");
        Ok(MahjongTable {
            session: TableSession::new(config),
        })
    }

    #[wasm_bindgen(js_name = applyState)]
    pub fn apply_state(&mut self, state: JsValue) -> Result<(), JsValue> {
        let state: PublicState =
            serde_wasm_bindgen::from_value(state).map_err(|err| ClientError::InvalidSnapshot {
                message: err.to_string(),
            })?;
        self.session.apply_state(state);
        Ok(())
    }

    /// Returns `false` when the payload is identical to the last one applied.
    #[wasm_bindgen(js_name = applyStateJson)]
    pub fn apply_state_json(&mut self, raw: &str) -> Result<bool, JsValue> {
        Ok(self.session.apply_state_json(raw)?)
    }

    #[wasm_bindgen(js_name = reportError)]
    pub fn report_error(&mut self, message: &str) {
        self.session.report_error(message);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.session.resize(Viewport::new(width, height));
    }

    #[wasm_bindgen(js_name = tapTile)]
    pub fn tap_tile(&mut self, display_index: usize) -> Result<JsValue, JsValue> {
        let outcome = self.session.tap_tile(display_index)?;
        to_js(&outcome)
    }

    #[wasm_bindgen(js_name = finishDiscard)]
    pub fn finish_discard(&mut self) -> Result<JsValue, JsValue> {
        let command = self.session.finish_discard()?;
        to_js(&command)
    }

    /// Returns `true` when a chow picker opened instead of a command being queued.
    #[wasm_bindgen(js_name = chooseAction)]
    pub fn choose_action(&mut self, name: &str) -> Result<bool, JsValue> {
        let action = ClaimAction::from_name(name).ok_or_else(|| ClientError::ActionNotOffered {
            action: name.to_string(),
        })?;
        Ok(self.session.choose_action(action)?)
    }

    pub fn pass(&mut self) -> Result<(), JsValue> {
        Ok(self.session.pass()?)
    }

    #[wasm_bindgen(js_name = pickChow)]
    pub fn pick_chow(&mut self, index: usize) -> Result<(), JsValue> {
        Ok(self.session.pick_chow(index)?)
    }

    #[wasm_bindgen(js_name = cancelChow)]
    pub fn cancel_chow(&mut self) -> Result<(), JsValue> {
        Ok(self.session.cancel_chow()?)
    }

    #[wasm_bindgen(js_name = setName)]
    pub fn set_name(&mut self, name: &str) -> bool {
        self.session.set_name(name)
    }

    #[wasm_bindgen(js_name = markReady)]
    pub fn mark_ready(&mut self) -> bool {
        self.session.mark_ready()
    }

    /// Drains queued commands as `{event, payload}` objects for the socket.
    #[wasm_bindgen(js_name = takeCommands)]
    pub fn take_commands(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.session.take_commands())
    }

    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.view())
    }

    pub fn scene(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.scene())
    }
}
