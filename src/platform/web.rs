//! Browser bindings (wasm32 only)

use wasm_bindgen::prelude::*;

use crate::error::StoreError;
use crate::persistence::SettingsStore;
use crate::settings::ExerciseKind;
use crate::sim::{Input, ItemId, Session};

/// `window.localStorage`, or nothing when the browser refuses access
pub struct LocalStorageStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStorageStore {
    pub fn open() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, progress will not be saved");
        }
        Self { storage }
    }
}

impl SettingsStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage
            .remove_item(key)
            .map_err(|e| StoreError::Backend(format!("{:?}", e)))
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by a previous module instance
        return;
    }
    log::info!("CP Games core loaded");
}

/// Exercise catalogue as JSON (`[{ id, title }]`)
#[wasm_bindgen]
pub fn exercises() -> String {
    super::catalogue_json()
}

/// One running exercise, driven by the page
#[wasm_bindgen]
pub struct ExerciseHandle {
    session: Session<LocalStorageStore>,
}

#[wasm_bindgen]
impl ExerciseHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str, seed: Option<f64>) -> Result<ExerciseHandle, JsError> {
        let kind = ExerciseKind::from_str(kind)
            .ok_or_else(|| JsError::new(&format!("unknown exercise: {}", kind)))?;
        let seed = seed.map(|s| s as u64).unwrap_or_else(super::random_seed);
        Ok(Self {
            session: Session::new(kind, LocalStorageStore::open(), seed),
        })
    }

    pub fn select(&mut self, id: u32) {
        self.session.handle(Input::Select { id: ItemId(id) });
    }

    pub fn verify(&mut self) {
        self.session.handle(Input::Verify);
    }

    pub fn pointer_down(&mut self, id: u32) {
        self.session.handle(Input::PointerDown { id: ItemId(id) });
    }

    pub fn pointer_up(&mut self, in_drop_zone: bool) {
        self.session.handle(Input::PointerUp { in_drop_zone });
    }

    pub fn pointer_cancel(&mut self) {
        self.session.handle(Input::PointerCancel);
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    /// Apply a partial settings object (JSON) from the settings page
    pub fn change_settings(&mut self, json: &str) -> Result<(), JsError> {
        let partial: serde_json::Value = serde_json::from_str(json)?;
        self.session.change_settings(&partial);
        Ok(())
    }

    /// Current sanitized settings as JSON
    pub fn settings(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.session.settings().to_value())?)
    }

    /// Advance logical time by `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f64) {
        let dt = dt_ms.clamp(0.0, u32::MAX as f64) as u32;
        self.session.tick(dt);
    }

    pub fn snapshot(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.session.snapshot())?)
    }

    /// Events since the last call, as a JSON array
    pub fn take_events(&mut self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.session.take_events())?)
    }
}
