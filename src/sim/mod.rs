//! Deterministic round logic
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Logical time only (the host calls `tick`)
//! - Stable item order and ids
//! - No rendering or platform dependencies

pub mod generate;
pub mod input;
pub mod round;
pub mod rules;
pub mod scatter;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod timer;

pub use generate::{compose_find_items, generate_round, target_count};
pub use input::{DragTracker, Input};
pub use round::{Item, ItemId, ItemState, Payload, Round, Target};
pub use rules::{CountJudge, Mode, RecoveryPolicy, RoundRules};
pub use scatter::{Scatter, ScatterConfig, initial_min_distance, scatter};
pub use snapshot::{FeedbackView, Snapshot};
pub use state::{Feedback, Phase, Progress, Session, SessionEvent};
pub use timer::{Deferred, TimerId, Timers};
