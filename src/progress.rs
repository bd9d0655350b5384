//! Cumulative star counter
//!
//! The only progress that survives a reload. Persisted as a plain integer,
//! saturating at the goal.

use serde::{Deserialize, Serialize};

use crate::consts::STAR_GOAL;
use crate::error::StoreError;
use crate::persistence::{SettingsStore, load_counter, save_counter};

/// Stars earned across sessions, bounded by `goal`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarCounter {
    pub stars: u32,
    pub goal: u32,
}

impl Default for StarCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl StarCounter {
    /// Store key (shared by every exercise that awards stars)
    pub const STORAGE_KEY: &'static str = "cp_mvp_stars";

    pub fn new() -> Self {
        Self {
            stars: 0,
            goal: STAR_GOAL,
        }
    }

    pub fn with_stars(stars: u32) -> Self {
        Self {
            stars: stars.min(STAR_GOAL),
            goal: STAR_GOAL,
        }
    }

    /// Add one star; returns false when the goal was already reached
    pub fn award(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.stars += 1;
        true
    }

    pub fn is_full(&self) -> bool {
        self.stars >= self.goal
    }

    /// Fill ratio for the progress bar
    pub fn fraction(&self) -> f32 {
        if self.goal == 0 {
            return 1.0;
        }
        self.stars as f32 / self.goal as f32
    }

    pub fn load(store: &impl SettingsStore) -> Self {
        let counter = Self::with_stars(load_counter(store, Self::STORAGE_KEY));
        log::info!("Loaded {} / {} stars", counter.stars, counter.goal);
        counter
    }

    pub fn save(&self, store: &mut impl SettingsStore) -> Result<(), StoreError> {
        save_counter(store, Self::STORAGE_KEY, self.stars.min(self.goal))?;
        log::info!("Stars saved ({})", self.stars);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_award_saturates() {
        let mut counter = StarCounter::with_stars(9);
        assert!(counter.award());
        assert_eq!(counter.stars, 10);
        assert!(!counter.award());
        assert_eq!(counter.stars, 10);
        assert!(counter.is_full());
        assert_eq!(counter.fraction(), 1.0);
    }

    #[test]
    fn test_load_clamps() {
        let store = MemoryStore::new().with_entry(StarCounter::STORAGE_KEY, "57");
        assert_eq!(StarCounter::load(&store).stars, STAR_GOAL);

        let store = MemoryStore::new().with_entry(StarCounter::STORAGE_KEY, "-3");
        assert_eq!(StarCounter::load(&store).stars, 0);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut counter = StarCounter::load(&store);
        counter.award();
        counter.award();
        counter.save(&mut store).unwrap();
        assert_eq!(store.get(StarCounter::STORAGE_KEY).as_deref(), Some("2"));
        assert_eq!(StarCounter::load(&store), counter);
    }
}
