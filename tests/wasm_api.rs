#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Reflect};
use mahjong_client::{MahjongTable, all_tile_codes, compute_layout};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap()
}

const DISCARD_SNAPSHOT: &str = r#"{
    "wallCount": 60, "turn": 0, "phase": "discard", "yourSeat": 0,
    "yourHand": ["p9", "m1", "z5"], "handCounts": [3, 13, 13, 13]
}"#;

#[wasm_bindgen_test]
fn layout_is_plain_object() {
    let layout = compute_layout(1100.0, 700.0).unwrap();

    assert_eq!(get(&layout, "handY").as_f64(), Some(672.0));
}

#[wasm_bindgen_test]
fn tile_codes_cover_every_suit() {
    let codes = all_tile_codes();

    assert!(codes.iter().any(|c| c == "m1"));
    assert!(codes.iter().any(|c| c == "f8"));
}

#[wasm_bindgen_test]
fn discard_through_js_surface() {
    let mut table = MahjongTable::new(JsValue::UNDEFINED).unwrap();
    assert!(table.apply_state_json(DISCARD_SNAPSHOT).unwrap());

    let first = table.tap_tile(0).unwrap();
    assert_eq!(get(&first, "kind").as_string().as_deref(), Some("selected"));
    let second = table.tap_tile(0).unwrap();
    assert_eq!(
        get(&second, "kind").as_string().as_deref(),
        Some("discardStarted")
    );
    table.finish_discard().unwrap();

    let commands = Array::from(&table.take_commands().unwrap());
    assert_eq!(commands.length(), 1);
    let discard = commands.get(0);
    assert_eq!(get(&discard, "event").as_string().as_deref(), Some("discard"));
    assert_eq!(get(&get(&discard, "payload"), "index").as_f64(), Some(1.0));
}

#[wasm_bindgen_test]
fn rejections_surface_as_errors() {
    let mut table = MahjongTable::new(JsValue::UNDEFINED).unwrap();
    table.apply_state_json(DISCARD_SNAPSHOT).unwrap();

    assert!(table.choose_action("pung").is_err());
    assert!(table.choose_action("riichi").is_err());
    assert!(table.tap_tile(9).is_err());

    let view = table.view().unwrap();
    assert_eq!(get(&view, "canDiscard").as_bool(), Some(true));
}
