//! Per-exercise round rules
//!
//! Every exercise runs on the same state machine; what differs is how a
//! round is won, what happens after a wrong answer and how long feedback
//! stays on screen.

use serde::{Deserialize, Serialize};

use super::state::Feedback;
use crate::consts::*;
use crate::settings::ExerciseSettings;

/// When a count round is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CountJudge {
    /// After every token given
    OnGive,
    /// Only when the child presses "verify"
    OnVerify,
}

/// How a round is won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mode {
    /// Every target item must be found, in any order
    FindAll,
    /// Letters must fill the word's slots left to right
    InOrder,
    /// Exactly the requested number of tokens must be given
    ExactCount {
        judge: CountJudge,
        /// Given tokens leave the table (and may be taken back)
        consume_tokens: bool,
    },
}

/// What happens after a wrong answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecoveryPolicy {
    /// The wrong item reverts after the error delay; progress is kept
    SoftRevert,
    /// The wrong item stays marked for the rest of the round
    LockWrong,
    /// The whole round's progress is cleared after the error delay
    ResetRound,
    /// Too many tokens: the given count (not the target) goes back to zero
    /// after the error delay. Too few only informs.
    OvershootReset,
    /// Any answer ends the trial; only correct ones score
    MoveOn,
}

impl RecoveryPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryPolicy::SoftRevert => "softRevert",
            RecoveryPolicy::LockWrong => "lockWrong",
            RecoveryPolicy::ResetRound => "resetRound",
            RecoveryPolicy::OvershootReset => "overshootReset",
            RecoveryPolicy::MoveOn => "moveOn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRules {
    pub mode: Mode,
    pub recovery: RecoveryPolicy,
    /// Pause between a won round and the next one (ms)
    pub success_delay_ms: u32,
    /// How long a wrong answer stays visible before recovery (ms)
    pub error_delay_ms: u32,
    /// Trials before the session ends; `None` plays forever
    pub trials_per_session: Option<u32>,
    /// Won rounds add a persisted star
    pub awards_stars: bool,
    /// Settings are read again from the store before each new round
    pub reload_settings_on_advance: bool,
    /// Message for a won round
    pub success_feedback: Feedback,
    /// Tokens given while the win is on screen still count; one too many
    /// takes the win back
    pub gives_during_success: bool,
    /// End of session reports the score instead of a plain "bravo"
    pub scored_summary: bool,
}

impl RoundRules {
    pub fn for_settings(settings: &ExerciseSettings) -> Self {
        match settings {
            ExerciseSettings::LetterFind(_) => Self {
                mode: Mode::FindAll,
                recovery: RecoveryPolicy::SoftRevert,
                success_delay_ms: LETTER_FIND_ADVANCE_MS,
                error_delay_ms: LETTER_FIND_REVERT_MS,
                trials_per_session: None,
                awards_stars: true,
                reload_settings_on_advance: false,
                success_feedback: Feedback::SuccessStar,
                gives_during_success: false,
                scored_summary: false,
            },
            ExerciseSettings::LetterSound(_) => Self {
                mode: Mode::FindAll,
                recovery: RecoveryPolicy::LockWrong,
                success_delay_ms: LETTER_SOUND_ADVANCE_MS,
                error_delay_ms: 0,
                trials_per_session: None,
                awards_stars: false,
                reload_settings_on_advance: false,
                success_feedback: Feedback::Success,
                gives_during_success: false,
                scored_summary: false,
            },
            ExerciseSettings::WordRecompose(_) => Self {
                mode: Mode::InOrder,
                recovery: RecoveryPolicy::SoftRevert,
                success_delay_ms: WORD_ADVANCE_MS,
                error_delay_ms: WORD_REVERT_MS,
                trials_per_session: None,
                awards_stars: false,
                reload_settings_on_advance: true,
                success_feedback: Feedback::Success,
                gives_during_success: false,
                scored_summary: false,
            },
            ExerciseSettings::NumberMatch(s) => Self {
                mode: Mode::FindAll,
                recovery: RecoveryPolicy::MoveOn,
                success_delay_ms: s.advance_delay_ms(),
                error_delay_ms: s.advance_delay_ms(),
                trials_per_session: Some(s.trials_per_session),
                awards_stars: false,
                reload_settings_on_advance: false,
                success_feedback: Feedback::Success,
                gives_during_success: false,
                scored_summary: true,
            },
            ExerciseSettings::FeedRabbit(s) => Self {
                mode: Mode::ExactCount {
                    judge: CountJudge::OnGive,
                    consume_tokens: false,
                },
                recovery: RecoveryPolicy::OvershootReset,
                success_delay_ms: s.animation_speed.duration_ms(),
                error_delay_ms: s.animation_speed.duration_ms(),
                trials_per_session: Some(s.trials_per_session),
                awards_stars: false,
                reload_settings_on_advance: false,
                success_feedback: Feedback::Success,
                gives_during_success: true,
                scored_summary: false,
            },
            ExerciseSettings::Feeding(_) => Self {
                mode: Mode::ExactCount {
                    judge: CountJudge::OnVerify,
                    consume_tokens: true,
                },
                recovery: RecoveryPolicy::OvershootReset,
                success_delay_ms: FEEDING_ADVANCE_MS,
                error_delay_ms: FEEDING_RESET_MS,
                trials_per_session: None,
                awards_stars: false,
                reload_settings_on_advance: false,
                success_feedback: Feedback::CountSuccess,
                gives_during_success: false,
                scored_summary: false,
            },
        }
    }

    pub fn is_count_mode(&self) -> bool {
        matches!(self.mode, Mode::ExactCount { .. })
    }
}
