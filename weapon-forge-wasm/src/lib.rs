//! WASM bindings for weapon-forge — powers the web item viewer.

use std::sync::OnceLock;

use wasm_bindgen::prelude::*;

use weapon_forge::core::pipeline::WeaponEngine;
use weapon_forge::schema::rarity::Rarity;
use weapon_forge::schema::weapon::WeaponView;

// ---------------------------------------------------------------------------
// Shared engine, built on first use
// ---------------------------------------------------------------------------
static ENGINE: OnceLock<Result<WeaponEngine, String>> = OnceLock::new();

fn engine() -> Result<&'static WeaponEngine, JsError> {
    ENGINE
        .get_or_init(|| WeaponEngine::builder().build().map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|e| JsError::new(&format!("Engine build error: {e}")))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

fn forge(id: &str, version: f64, rarity: Option<Rarity>) -> Result<WeaponView, JsError> {
    engine()?
        .forge_with_rarity(id, version, rarity)
        .map_err(|e| JsError::new(&format!("Forge error: {e}")))
}

// ---------------------------------------------------------------------------
// Exported functions
// ---------------------------------------------------------------------------

/// Build the weapon for `id` at `version`. Returns the weapon as JSON.
///
/// `version` arrives as a JS number; fractional, negative and out-of-range
/// values are rejected.
#[wasm_bindgen]
pub fn generate(id: &str, version: f64) -> Result<String, JsError> {
    to_json(&forge(id, version, None)?)
}

/// Build with a forced rarity tier ("common" .. "legendary").
#[wasm_bindgen]
pub fn generate_with_rarity(id: &str, version: f64, rarity: &str) -> Result<String, JsError> {
    let rarity =
        Rarity::parse(rarity).ok_or_else(|| JsError::new(&format!("Unknown rarity: {rarity}")))?;
    to_json(&forge(id, version, Some(rarity))?)
}

/// All five rarity variants of `id`, lowest first, as a JSON array.
#[wasm_bindgen]
pub fn generate_variants(id: &str, version: f64) -> Result<String, JsError> {
    let views = engine()?
        .forge_variants(id, version)
        .map_err(|e| JsError::new(&format!("Forge error: {e}")))?;
    to_json(&views)
}

/// The newest catalog version number.
#[wasm_bindgen]
pub fn latest_version() -> Result<u32, JsError> {
    let latest = engine()?.latest_version_num();
    u32::try_from(latest).map_err(|e| JsError::new(&format!("Version overflow: {e}")))
}

/// JSON array of rarity tier names, lowest first.
#[wasm_bindgen]
pub fn rarities() -> String {
    let names: Vec<&str> = Rarity::ALL.iter().map(|r| r.name()).collect();
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}
