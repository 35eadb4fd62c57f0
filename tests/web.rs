// Browser smoke tests. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn start_game_creates_sized_canvas() {
    ember_run::start_game().unwrap();
    let doc = web_sys::window().unwrap().document().unwrap();
    let canvas = doc.get_element_by_id("ember-canvas").expect("canvas appended to body");
    assert!(canvas.get_attribute("style").is_some());
}

#[wasm_bindgen_test]
fn switching_variant_reuses_canvas() {
    ember_run::start_game().unwrap();
    ember_run::start_game_variant("coin-run").unwrap();
    let doc = web_sys::window().unwrap().document().unwrap();
    let canvas = doc.get_element_by_id("ember-canvas").expect("canvas still present");
    assert!(canvas.next_element_sibling().map_or(true, |el| el.id() != "ember-canvas"));
}

#[wasm_bindgen_test]
fn bad_variant_reports_error() {
    let err = ember_run::start_game_variant("nope").unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("unknown preset 'nope'"));
}
