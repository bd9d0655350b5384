//! CP Games - early reading and counting exercises
//!
//! Core modules:
//! - `sim`: Deterministic round logic (placement, round generation, state machine)
//! - `settings`: Per-exercise preferences with sanitization
//! - `persistence`: Key/value store seam (memory or LocalStorage)
//! - `progress`: Persisted star counter
//! - `platform`: Seeding, exercise catalogue and browser bindings

pub mod error;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod settings;
pub mod sim;

pub use error::StoreError;
pub use persistence::{MemoryStore, SettingsStore};
pub use progress::StarCounter;
pub use settings::{ExerciseKind, ExerciseSettings};
pub use sim::{Input, Session, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Play area is expressed in percent of its width/height
    pub const AREA_EXTENT: f32 = 100.0;
    /// Distance kept between cards and the edge of the play area
    pub const SCATTER_MARGIN: f32 = 8.0;
    /// Total sampling attempts before falling back to unconstrained placement
    pub const SCATTER_MAX_ATTEMPTS: u32 = 2500;
    /// Relax the minimum distance every N failed attempts
    pub const SCATTER_RELAX_EVERY: u32 = 200;
    /// Multiplicative relaxation factor
    pub const SCATTER_RELAX_FACTOR: f32 = 0.92;
    /// Relaxation never goes below this distance
    pub const SCATTER_MIN_FLOOR: f32 = 6.0;

    /// Stars needed to fill the progress bar
    pub const STAR_GOAL: u32 = 10;

    /// Letter find: delay before a new round after success (ms)
    pub const LETTER_FIND_ADVANCE_MS: u32 = 900;
    /// Letter find: wrong card stays red for this long (ms)
    pub const LETTER_FIND_REVERT_MS: u32 = 600;
    /// Letter sound: delay before next letter after success (ms)
    pub const LETTER_SOUND_ADVANCE_MS: u32 = 1200;
    /// Word recompose: delay before next word (ms)
    pub const WORD_ADVANCE_MS: u32 = 900;
    /// Word recompose: wrong letter stays red for this long (ms)
    pub const WORD_REVERT_MS: u32 = 500;
    /// Number match: extra pause added to the animation duration (ms)
    pub const NUMBER_MATCH_EXTRA_MS: u32 = 1000;
    /// Feeding: delay before a new target after success (ms)
    pub const FEEDING_ADVANCE_MS: u32 = 1400;
    /// Feeding: surplus carrots go back to the table after this long (ms)
    pub const FEEDING_RESET_MS: u32 = 1200;
    /// Feed rabbit: number of draggable carrots
    pub const RABBIT_CARROTS: usize = 6;
}

/// Round half away from zero and clamp into `[min, max]`
#[inline]
pub fn clamp_round(value: f64, min: i64, max: i64) -> i64 {
    if !value.is_finite() {
        return min;
    }
    (value.round() as i64).clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_round() {
        assert_eq!(clamp_round(7.2, 1, 15), 7);
        assert_eq!(clamp_round(7.5, 1, 15), 8);
        assert_eq!(clamp_round(-3.0, 1, 15), 1);
        assert_eq!(clamp_round(99.0, 1, 15), 15);
        assert_eq!(clamp_round(f64::NAN, 1, 15), 1);
    }
}
