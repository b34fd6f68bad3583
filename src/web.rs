//! Browser bindings
//!
//! Thin wasm-bindgen facade over [`Session`]. The JS front end owns the DOM,
//! physics bodies, audio and the one-second interval; it calls in with
//! discrete actions and reads JSON snapshots back.

use wasm_bindgen::prelude::*;

use crate::catalog::{ItemKind, LevelCatalog};
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::ItemId;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Market Sort (web) loaded");
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Game handle exported to JS
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
}

#[wasm_bindgen]
impl WebGame {
    /// `settings_json` and `levels_json` are optional overrides
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>, levels_json: Option<String>) -> Result<WebGame, JsValue> {
        let mut settings = match settings_json {
            Some(json) => Settings::from_json(&json).map_err(to_js)?,
            None => Settings::default(),
        };
        if settings.seed == 0 {
            settings.seed = js_sys::Date::now() as u64;
        }
        let catalog = match levels_json {
            Some(json) => LevelCatalog::from_json(&json).map_err(to_js)?,
            None => LevelCatalog::standard(),
        };
        Ok(WebGame {
            session: Session::new(settings, catalog),
        })
    }

    pub fn start_game(&mut self) {
        self.session.start_game();
    }

    pub fn restart_game(&mut self) {
        self.session.restart_game();
    }

    pub fn next_level(&mut self) {
        self.session.next_level();
    }

    pub fn retry_level(&mut self) {
        self.session.retry_level();
    }

    /// Call once per `tick_interval_ms` while `timer_running()` is true
    pub fn tick(&mut self) {
        self.session.tick();
    }

    pub fn timer_running(&self) -> bool {
        self.session.timer_running()
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.session.settings().tick_interval_ms
    }

    /// "accept", "not_in_order", "quota_met" or "unavailable"
    pub fn select_item(&mut self, id: u32) -> String {
        self.session
            .select_item(ItemId(id))
            .map(|verdict| verdict.as_str())
            .unwrap_or("unavailable")
            .to_string()
    }

    /// Whether more items of the named type are still wanted
    pub fn quota_met(&self, kind: &str) -> bool {
        ItemKind::from_str(kind)
            .map(|kind| self.session.quota_met(kind))
            .unwrap_or(true)
    }

    /// Match result as JSON, or `null` when not playing
    pub fn check_order(&mut self) -> Result<String, JsValue> {
        let result = self.session.check_order();
        serde_json::to_string(&result).map_err(to_js)
    }

    pub fn remove_item(&mut self, id: u32) {
        self.session.remove_item(ItemId(id));
    }

    /// Id of the spawned item, if one dropped
    pub fn advance_spawner(&mut self, elapsed_ms: u32) -> Option<u32> {
        self.session.advance_spawner(elapsed_ms).map(|id| id.0)
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session.snapshot()).map_err(to_js)
    }

    /// Item catalog keyed by type id, for the renderer and physics
    pub fn item_catalog_json() -> Result<String, JsValue> {
        let catalog: std::collections::BTreeMap<&str, _> = ItemKind::ALL
            .iter()
            .map(|kind| (kind.as_str(), kind.info()))
            .collect();
        serde_json::to_string(&catalog).map_err(to_js)
    }
}
