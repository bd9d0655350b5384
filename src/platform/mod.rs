//! Platform glue
//!
//! Browser bindings live in `web` (wasm32 only): LocalStorage-backed store,
//! logger setup and the exported exercise handle. What is shared with
//! native builds stays here.

#[cfg(target_arch = "wasm32")]
pub mod web;

use serde::Serialize;

use crate::settings::ExerciseKind;

/// Seed for a new session
#[cfg(target_arch = "wasm32")]
pub fn random_seed() -> u64 {
    let time = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    time ^ (noise << 32)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn random_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

#[derive(Debug, Clone, Serialize)]
struct CatalogueEntry {
    id: &'static str,
    title: &'static str,
}

/// JSON list of `{ id, title }` for the home screen
pub fn catalogue_json() -> String {
    let entries: Vec<CatalogueEntry> = ExerciseKind::ALL
        .iter()
        .map(|kind| CatalogueEntry {
            id: kind.as_str(),
            title: kind.title(),
        })
        .collect();
    serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_lists_every_exercise() {
        let value: serde_json::Value = serde_json::from_str(&catalogue_json()).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), ExerciseKind::ALL.len());
        assert_eq!(entries[0]["id"], "letter-find");
        assert_eq!(entries[0]["title"], "Trouve la lettre");
    }

    #[test]
    fn test_seeds_vary() {
        let a = random_seed();
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert_ne!(a, random_seed());
    }
}
