//! Key/value persistence
//!
//! Settings and counters are stored as JSON strings under fixed keys, the
//! way the browser's LocalStorage holds them. The store is injected so the
//! game core can be driven natively with [`MemoryStore`].
//!
//! Reads never fail: a missing or unreadable entry yields defaults.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::StoreError;
use crate::settings::{ExerciseKind, ExerciseSettings};

/// String key/value store
pub trait SettingsStore {
    /// Raw value under `key`, if any
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for native use and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used to seed a store with a raw entry
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Load the settings of one exercise, merged onto defaults
pub fn load_settings(store: &impl SettingsStore, kind: ExerciseKind) -> ExerciseSettings {
    let key = kind.storage_key();
    let Some(raw) = store.get(key) else {
        log::info!("No stored settings for {}, using defaults", kind.as_str());
        return ExerciseSettings::defaults(kind);
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => {
            log::info!("Loaded settings for {}", kind.as_str());
            ExerciseSettings::from_value(kind, &value)
        }
        Err(e) => {
            log::warn!("Ignoring unreadable settings under {}: {}", key, e);
            ExerciseSettings::defaults(kind)
        }
    }
}

/// Persist sanitized settings under the exercise's key
pub fn save_settings(
    store: &mut impl SettingsStore,
    settings: &ExerciseSettings,
) -> Result<(), StoreError> {
    let kind = settings.kind();
    let json = serde_json::to_string(&settings.to_value())?;
    store.set(kind.storage_key(), &json)?;
    log::info!("Settings saved for {}", kind.as_str());
    Ok(())
}

/// Small integer counter; missing or non-numeric entries read as 0
pub fn load_counter(store: &impl SettingsStore, key: &str) -> u32 {
    store
        .get(key)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n > 0.0)
        .map(|n| n.floor().min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}

pub fn save_counter(store: &mut impl SettingsStore, key: &str, value: u32) -> Result<(), StoreError> {
    store.set(key, &value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{LetterFindSettings, LetterStyle};
    use proptest::prelude::*;

    #[test]
    fn test_missing_settings_are_defaults() {
        let store = MemoryStore::new();
        for kind in ExerciseKind::ALL {
            assert_eq!(load_settings(&store, kind), ExerciseSettings::defaults(kind));
        }
    }

    #[test]
    fn test_malformed_settings_are_defaults() {
        let store = MemoryStore::new().with_entry("settings_letters_v1", "{not json");
        assert_eq!(
            load_settings(&store, ExerciseKind::LetterFind),
            ExerciseSettings::defaults(ExerciseKind::LetterFind)
        );
    }

    #[test]
    fn test_partial_record_merges_onto_defaults() {
        let store = MemoryStore::new()
            .with_entry("settings_letters_v1", r#"{"targetLetter":"m","itemsCount":"3"}"#);
        match load_settings(&store, ExerciseKind::LetterFind) {
            ExerciseSettings::LetterFind(s) => {
                assert_eq!(s.target_letter, 'M');
                assert_eq!(s.items_count, 8);
                assert_eq!(s.letter_style, LetterStyle::Baton);
            }
            other => panic!("unexpected kind {:?}", other.kind()),
        }
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let settings = ExerciseSettings::LetterFind(LetterFindSettings {
            target_letter: 'U',
            distractor_letters: "ABCDE".to_string(),
            items_count: 16,
            target_ratio: 0.45,
            letter_style: LetterStyle::Cursif,
        });
        save_settings(&mut store, &settings).unwrap();
        assert_eq!(load_settings(&store, ExerciseKind::LetterFind), settings);
    }

    #[test]
    fn test_counter_round_trip() {
        let mut store = MemoryStore::new().with_entry("stars", "garbage");
        assert_eq!(load_counter(&store, "stars"), 0);
        save_counter(&mut store, "stars", 7).unwrap();
        assert_eq!(load_counter(&store, "stars"), 7);
        store.remove("stars").unwrap();
        assert_eq!(load_counter(&store, "stars"), 0);
        assert!(store.is_empty());
    }

    proptest! {
        #[test]
        fn prop_persisted_settings_reload_identically(
            letter in proptest::char::range('A', 'Z'),
            items in 0u32..60,
            ratio in 0.0f64..1.5,
            words in proptest::collection::vec("[a-z ]{0,8}", 0..6),
        ) {
            let mut store = MemoryStore::new();
            let saved = ExerciseSettings::from_value(
                ExerciseKind::LetterFind,
                &serde_json::json!({
                    "targetLetter": letter.to_string(),
                    "itemsCount": items,
                    "targetRatio": ratio,
                }),
            );
            save_settings(&mut store, &saved).unwrap();
            prop_assert_eq!(load_settings(&store, ExerciseKind::LetterFind), saved);

            let saved = ExerciseSettings::from_value(
                ExerciseKind::WordRecompose,
                &serde_json::json!({ "words": words }),
            );
            save_settings(&mut store, &saved).unwrap();
            prop_assert_eq!(load_settings(&store, ExerciseKind::WordRecompose), saved);
        }
    }
}
