use crate::json;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Main WASM API: check whether a hand wins
///
/// # Arguments
/// * `hand_tiles` - JSON array of tile strings, bonus tiles and quads included
///   (e.g., ["m1", "m2", "m3", "we", "we", "f1"])
///
/// # Returns
/// JSON string with the evaluation: `is_win`, the decomposition when the hand
/// wins, the bonus tiles and quads that were set aside, or an error
#[wasm_bindgen]
pub fn check_hand(hand_tiles: &str) -> String {
    json::check_hand_json(hand_tiles)
}

/// Get the git commit hash that this WASM module was built from
///
/// Returns the first 8 characters of the commit hash, or "unknown" if not available
#[wasm_bindgen]
pub fn get_build_commit() -> String {
    env!("BUILD_COMMIT").to_string()
}
