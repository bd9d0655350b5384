//! Session state and core types
//!
//! A session owns everything one exercise screen needs: its settings and
//! rules, the seeded RNG, the current round, progress, pending timers and
//! the event queue the UI drains.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::generate::generate_round;
use super::input::DragTracker;
use super::round::{ItemId, ItemIds, Round};
use super::rules::{RecoveryPolicy, RoundRules};
use super::timer::{TimerId, Timers};
use crate::persistence::{SettingsStore, load_settings};
use crate::progress::StarCounter;
use crate::settings::{ExerciseKind, ExerciseSettings};

/// Lifecycle of the current trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Round just generated, nothing marked
    Presenting,
    /// Some progress, round not won yet
    InProgress,
    /// Won; waiting for the advance delay
    RoundComplete,
    /// Last input was wrong
    Error,
    /// Trial budget used up
    SessionComplete,
}

/// Trial and score bookkeeping. Only stars outlive the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Trials finished so far (0-based index of the current trial)
    pub trial_index: u32,
    /// Correct trials this session
    pub score: u32,
    pub trials_per_session: Option<u32>,
    pub stars: u32,
    pub star_goal: u32,
    pub session_complete: bool,
}

impl Progress {
    pub fn new(trials_per_session: Option<u32>, stars: &StarCounter) -> Self {
        Self {
            trial_index: 0,
            score: 0,
            trials_per_session,
            stars: stars.stars,
            star_goal: stars.goal,
            session_complete: false,
        }
    }
}

/// Message shown to the child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Feedback {
    Success,
    /// Won round that earned a star
    SuccessStar,
    /// Plate holds exactly the requested carrots
    CountSuccess,
    TryAgain,
    /// Rabbit got more than asked
    TooMany,
    /// Plate is short by `count`
    Missing { count: u32 },
    /// Plate holds `count` too many
    Surplus { count: u32 },
    SessionComplete,
    /// End of a scored session
    SessionSummary { score: u32, total: u32 },
}

impl Feedback {
    pub fn message(&self) -> String {
        match self {
            Feedback::Success => "Bravo !".to_string(),
            Feedback::SuccessStar => "Bravo ! ⭐".to_string(),
            Feedback::CountSuccess => "Bravo ! Tu as donné le bon nombre de carottes.".to_string(),
            Feedback::TryAgain => "Essaie encore.".to_string(),
            Feedback::TooMany => "Oh non, c'est trop !".to_string(),
            Feedback::Missing { count: 1 } => {
                "Il manque encore une carotte dans l'assiette.".to_string()
            }
            Feedback::Missing { count } => {
                format!("Il manque encore {} carottes dans l'assiette.", count)
            }
            Feedback::Surplus { count: 1 } => {
                "Il y a une carotte de trop dans la mangeoire.".to_string()
            }
            Feedback::Surplus { count } => {
                format!("Il y a {} carottes de trop dans la mangeoire.", count)
            }
            Feedback::SessionComplete => "Bravo ! La session est terminée !".to_string(),
            Feedback::SessionSummary { score, total } => {
                format!("Terminé ! Tu as {} bonnes réponses sur {}.", score, total)
            }
        }
    }

    /// Green (true) or red (false) styling
    pub fn is_positive(&self) -> bool {
        !matches!(
            self,
            Feedback::TryAgain
                | Feedback::TooMany
                | Feedback::Missing { .. }
                | Feedback::Surplus { .. }
        )
    }
}

/// Things the UI may react to with sounds or speech (drained each frame)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SessionEvent {
    RoundStarted { round_id: u32, trial_index: u32 },
    ItemAccepted { id: ItemId },
    ItemRejected { id: ItemId },
    ItemReverted { id: ItemId },
    TokenGiven { id: ItemId, given: u32 },
    TokenReturned { id: ItemId, given: u32 },
    /// Verify pressed with too few tokens
    Shortfall { given: u32, target: u32 },
    Overshoot { given: u32, target: u32 },
    GivenReset,
    RoundReset,
    RoundWon { round_id: u32, star_awarded: bool },
    SettingsChanged,
    SessionFinished { score: u32, total: u32 },
}

/// One running exercise
#[derive(Debug)]
pub struct Session<S: SettingsStore> {
    pub(super) kind: ExerciseKind,
    pub(super) store: S,
    pub(super) settings: ExerciseSettings,
    pub(super) rules: RoundRules,
    /// Replaces the exercise's default recovery, kept across settings changes
    pub(super) recovery_override: Option<RecoveryPolicy>,
    pub(super) seed: u64,
    pub(super) rng: Pcg32,
    pub(super) ids: ItemIds,
    pub(super) next_round_id: u32,
    pub(super) round: Round,
    pub(super) phase: Phase,
    pub(super) progress: Progress,
    pub(super) stars: StarCounter,
    pub(super) feedback: Option<Feedback>,
    pub(super) timers: Timers,
    pub(super) pending_advance: Option<TimerId>,
    pub(super) pending_reset: Option<TimerId>,
    pub(super) drag: DragTracker,
    pub(super) events: Vec<SessionEvent>,
}

impl<S: SettingsStore> Session<S> {
    /// Load settings and stars from `store` and generate the first round
    pub fn new(kind: ExerciseKind, store: S, seed: u64) -> Self {
        let settings = load_settings(&store, kind);
        let stars = StarCounter::load(&store);
        let rules = RoundRules::for_settings(&settings);
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut ids = ItemIds::default();
        let round = generate_round(&settings, 1, &mut ids, &mut rng);

        log::info!("Starting {} session (seed {})", kind.as_str(), seed);

        Self {
            kind,
            store,
            settings,
            rules,
            recovery_override: None,
            seed,
            rng,
            ids,
            next_round_id: 2,
            progress: Progress::new(rules.trials_per_session, &stars),
            round,
            phase: Phase::Presenting,
            stars,
            feedback: None,
            timers: Timers::new(),
            pending_advance: None,
            pending_reset: None,
            drag: DragTracker::default(),
            events: vec![SessionEvent::RoundStarted {
                round_id: 1,
                trial_index: 0,
            }],
        }
    }

    /// Use a different wrong-answer policy than the exercise's default
    pub fn with_recovery(mut self, policy: RecoveryPolicy) -> Self {
        self.recovery_override = Some(policy);
        self.rules.recovery = policy;
        self
    }

    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &ExerciseSettings {
        &self.settings
    }

    pub fn rules(&self) -> &RoundRules {
        &self.rules
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn stars(&self) -> &StarCounter {
        &self.stars
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Timers waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn dragging(&self) -> Option<ItemId> {
        self.drag.active()
    }

    /// Take the events queued since the last call
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rebuild the rules from the current settings, keeping any override
    pub(super) fn refresh_rules(&mut self) {
        self.rules = RoundRules::for_settings(&self.settings);
        if let Some(policy) = self.recovery_override {
            self.rules.recovery = policy;
        }
        self.progress.trials_per_session = self.rules.trials_per_session;
    }

    /// Drop the current round and present a fresh one. Every pending
    /// transition belongs to the old round and is cancelled.
    pub(super) fn start_round(&mut self) {
        self.timers.cancel_all();
        self.pending_advance = None;
        self.pending_reset = None;
        self.drag.cancel();

        let round_id = self.next_round_id;
        self.next_round_id += 1;
        self.round = generate_round(&self.settings, round_id, &mut self.ids, &mut self.rng);
        self.phase = Phase::Presenting;
        self.feedback = None;

        log::debug!(
            "Round {} ({}): {:?}, {} items",
            round_id,
            self.kind.as_str(),
            self.round.target,
            self.round.items.len()
        );
        self.events.push(SessionEvent::RoundStarted {
            round_id,
            trial_index: self.progress.trial_index,
        });
    }

    /// Reset trial and score (stars are kept) and start over
    pub(super) fn reset_progress(&mut self) {
        self.progress = Progress::new(self.rules.trials_per_session, &self.stars);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_new_session_presents_first_round() {
        let mut session = Session::new(ExerciseKind::LetterFind, MemoryStore::new(), 1);
        assert_eq!(session.phase(), Phase::Presenting);
        assert_eq!(session.round().items.len(), 12);
        assert_eq!(session.progress().trial_index, 0);
        assert_eq!(
            session.take_events(),
            vec![SessionEvent::RoundStarted {
                round_id: 1,
                trial_index: 0
            }]
        );
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn test_stars_loaded_from_store() {
        let store = MemoryStore::new().with_entry(StarCounter::STORAGE_KEY, "4");
        let session = Session::new(ExerciseKind::LetterFind, store, 1);
        assert_eq!(session.progress().stars, 4);
        assert_eq!(session.progress().star_goal, 10);
    }

    #[test]
    fn test_same_seed_same_round() {
        let a = Session::new(ExerciseKind::WordRecompose, MemoryStore::new(), 77);
        let b = Session::new(ExerciseKind::WordRecompose, MemoryStore::new(), 77);
        assert_eq!(a.round(), b.round());
    }

    #[test]
    fn test_feedback_messages() {
        assert_eq!(Feedback::Missing { count: 1 }.message(), "Il manque encore une carotte dans l'assiette.");
        assert_eq!(Feedback::Missing { count: 2 }.message(), "Il manque encore 2 carottes dans l'assiette.");
        assert_eq!(Feedback::Surplus { count: 3 }.message(), "Il y a 3 carottes de trop dans la mangeoire.");
        assert_eq!(
            Feedback::SessionSummary { score: 7, total: 10 }.message(),
            "Terminé ! Tu as 7 bonnes réponses sur 10."
        );
        assert!(!Feedback::TooMany.is_positive());
        assert!(Feedback::SuccessStar.is_positive());
    }

    #[test]
    fn test_recovery_override() {
        let session = Session::new(ExerciseKind::WordRecompose, MemoryStore::new(), 3)
            .with_recovery(RecoveryPolicy::ResetRound);
        assert_eq!(session.rules().recovery, RecoveryPolicy::ResetRound);
    }
}
