//! Input handling and timed transitions
//!
//! Every transition happens synchronously inside [`Session::handle`],
//! [`Session::tick`] or [`Session::change_settings`]. Delayed effects go
//! through the session's logical timers.

use serde_json::Value;

use super::input::Input;
use super::round::{ItemId, ItemState};
use super::rules::{CountJudge, Mode, RecoveryPolicy};
use super::state::{Feedback, Phase, Session, SessionEvent};
use super::timer::Deferred;
use crate::persistence::{SettingsStore, load_settings, save_settings};

impl<S: SettingsStore> Session<S> {
    /// Apply one user action. Invalid actions are ignored.
    pub fn handle(&mut self, input: Input) {
        if let Input::Restart = input {
            self.restart();
            return;
        }
        if !self.accepts_input() && !self.accepts_late_give(&input) {
            log::debug!("Ignoring {:?} in {:?}", input, self.phase);
            return;
        }

        match input {
            Input::Select { id } => self.select(id),
            Input::Verify => self.verify(),
            Input::PointerDown { id } => {
                let is_free_token = self
                    .round
                    .item(id)
                    .is_some_and(|item| item.is_token() && item.state == ItemState::Idle);
                if is_free_token && !self.drag.begin(id) {
                    log::debug!("Drag of {:?} rejected, another drag is active", id);
                }
            }
            Input::PointerUp { in_drop_zone } => {
                if let Some(id) = self.drag.finish() {
                    if in_drop_zone {
                        self.give(id);
                    }
                }
            }
            Input::PointerCancel => self.drag.cancel(),
            Input::Restart => {}
        }
    }

    /// Advance logical time by `dt_ms` and run every transition that falls due
    pub fn tick(&mut self, dt_ms: u32) {
        self.timers.advance(dt_ms);
        while let Some((id, action)) = self.timers.pop_due() {
            match action {
                Deferred::Advance => {
                    if self.pending_advance == Some(id) {
                        self.advance();
                    }
                }
                Deferred::RevertItem(item) => self.revert_item(item),
                Deferred::ResetRound => {
                    self.pending_reset = None;
                    self.round.reset_progress();
                    self.phase = Phase::Presenting;
                    self.feedback = None;
                    self.events.push(SessionEvent::RoundReset);
                }
                Deferred::ResetGiven => {
                    self.pending_reset = None;
                    self.round.reset_given();
                    self.phase = Phase::Presenting;
                    self.feedback = None;
                    self.events.push(SessionEvent::GivenReset);
                }
            }
        }
    }

    /// Apply a partial settings update, persist it and start a new session
    pub fn change_settings(&mut self, partial: &Value) {
        let settings = self.settings.merged(partial);
        if let Err(e) = save_settings(&mut self.store, &settings) {
            log::warn!("Could not save {} settings: {}", self.kind.as_str(), e);
        }
        self.settings = settings;
        self.refresh_rules();
        self.reset_progress();
        self.events.push(SessionEvent::SettingsChanged);
        self.start_round();
    }

    /// New session with the same settings; stars are kept
    pub fn restart(&mut self) {
        log::info!("Restarting {} session", self.kind.as_str());
        self.reset_progress();
        self.start_round();
    }

    fn accepts_input(&self) -> bool {
        self.phase != Phase::SessionComplete
            && self.pending_advance.is_none()
            && self.pending_reset.is_none()
    }

    /// Token gestures while a won count round waits to advance
    fn accepts_late_give(&self, input: &Input) -> bool {
        self.rules.gives_during_success
            && self.phase == Phase::RoundComplete
            && self.pending_advance.is_some()
            && self.pending_reset.is_none()
            && !matches!(input, Input::Verify)
    }

    fn select(&mut self, id: ItemId) {
        let Some(item) = self.round.item(id) else {
            return;
        };
        let state = item.state;

        match self.rules.mode {
            Mode::FindAll if state == ItemState::Idle => self.find(id),
            Mode::InOrder if state == ItemState::Idle => self.place_letter(id),
            Mode::ExactCount { consume_tokens, .. } => match state {
                ItemState::Idle => self.give(id),
                ItemState::Used if consume_tokens => self.take_back(id),
                _ => {}
            },
            // Locked, used or wrong items do nothing
            _ => {}
        }
    }

    fn find(&mut self, id: ItemId) {
        let Some(item) = self.round.item_mut(id) else {
            return;
        };
        if !item.is_target {
            self.wrong_answer(id);
            return;
        }

        item.state = ItemState::Locked;
        self.events.push(SessionEvent::ItemAccepted { id });
        if self.round.all_targets_locked() {
            self.win_round();
        } else {
            self.phase = Phase::InProgress;
        }
    }

    fn place_letter(&mut self, id: ItemId) {
        let (Some(letter), Some(slot), Some(expected)) = (
            self.round.item(id).and_then(|item| item.letter()),
            self.round.next_slot(),
            self.round.expected_letter(),
        ) else {
            return;
        };
        if !letters_match(letter, expected) {
            self.wrong_answer(id);
            return;
        }

        if let Some(item) = self.round.item_mut(id) {
            item.state = ItemState::Used;
        }
        self.round.slots[slot] = Some(letter);
        self.events.push(SessionEvent::ItemAccepted { id });
        if self.round.slots_filled() {
            self.win_round();
        } else {
            self.phase = Phase::InProgress;
        }
    }

    /// Hand one token over (tap or drop)
    fn give(&mut self, id: ItemId) {
        let Mode::ExactCount {
            judge,
            consume_tokens,
        } = self.rules.mode
        else {
            return;
        };
        let Some(item) = self.round.item_mut(id) else {
            return;
        };
        if !item.is_token() || item.state != ItemState::Idle {
            return;
        }
        if consume_tokens {
            item.state = ItemState::Used;
        }

        self.round.given += 1;
        self.events.push(SessionEvent::TokenGiven {
            id,
            given: self.round.given,
        });

        match judge {
            CountJudge::OnGive => self.judge_count(judge),
            CountJudge::OnVerify => {
                self.phase = Phase::InProgress;
                self.feedback = None;
            }
        }
    }

    /// Put a consumed token back on the table
    fn take_back(&mut self, id: ItemId) {
        let Some(item) = self.round.item_mut(id) else {
            return;
        };
        item.state = ItemState::Idle;
        self.round.given = self.round.given.saturating_sub(1);
        self.events.push(SessionEvent::TokenReturned {
            id,
            given: self.round.given,
        });
        self.feedback = None;
        self.phase = if self.round.given > 0 {
            Phase::InProgress
        } else {
            Phase::Presenting
        };
    }

    fn verify(&mut self) {
        if let Mode::ExactCount {
            judge: CountJudge::OnVerify,
            ..
        } = self.rules.mode
        {
            self.judge_count(CountJudge::OnVerify);
        }
    }

    fn judge_count(&mut self, judge: CountJudge) {
        let Some(target) = self.round.target_count() else {
            return;
        };
        let given = self.round.given;

        if given == target {
            self.win_round();
        } else if given < target {
            if judge == CountJudge::OnVerify {
                self.phase = Phase::Error;
                self.feedback = Some(Feedback::Missing {
                    count: target - given,
                });
                self.events.push(SessionEvent::Shortfall { given, target });
            } else {
                self.phase = Phase::InProgress;
            }
        } else {
            self.phase = Phase::Error;
            self.feedback = Some(match judge {
                CountJudge::OnGive => Feedback::TooMany,
                CountJudge::OnVerify => Feedback::Surplus {
                    count: given - target,
                },
            });
            self.events.push(SessionEvent::Overshoot { given, target });
            if let Some(advance) = self.pending_advance.take() {
                // A token dropped after the win takes it back
                self.timers.cancel(advance);
                self.progress.score = self.progress.score.saturating_sub(1);
            }
            match self.rules.recovery {
                RecoveryPolicy::OvershootReset => {
                    self.pending_reset =
                        Some(self.timers.schedule(self.rules.error_delay_ms, Deferred::ResetGiven));
                }
                RecoveryPolicy::ResetRound => {
                    self.pending_reset =
                        Some(self.timers.schedule(self.rules.error_delay_ms, Deferred::ResetRound));
                }
                // The child takes tokens back by hand
                _ => {}
            }
        }
    }

    fn wrong_answer(&mut self, id: ItemId) {
        if let Some(item) = self.round.item_mut(id) {
            item.state = ItemState::Error;
        }
        self.phase = Phase::Error;
        self.feedback = Some(Feedback::TryAgain);
        self.events.push(SessionEvent::ItemRejected { id });

        match self.rules.recovery {
            RecoveryPolicy::SoftRevert | RecoveryPolicy::OvershootReset => {
                self.timers
                    .schedule(self.rules.error_delay_ms, Deferred::RevertItem(id));
            }
            RecoveryPolicy::LockWrong => {}
            RecoveryPolicy::ResetRound => {
                self.pending_reset =
                    Some(self.timers.schedule(self.rules.error_delay_ms, Deferred::ResetRound));
            }
            RecoveryPolicy::MoveOn => {
                self.pending_advance =
                    Some(self.timers.schedule(self.rules.error_delay_ms, Deferred::Advance));
            }
        }
    }

    fn revert_item(&mut self, id: ItemId) {
        let Some(item) = self.round.item_mut(id) else {
            return;
        };
        if item.state != ItemState::Error {
            return;
        }
        item.state = ItemState::Idle;
        self.events.push(SessionEvent::ItemReverted { id });

        let still_wrong = self
            .round
            .items
            .iter()
            .any(|item| item.state == ItemState::Error);
        if self.phase == Phase::Error && !still_wrong {
            self.feedback = None;
            self.phase = if self.round.has_progress() {
                Phase::InProgress
            } else {
                Phase::Presenting
            };
        }
    }

    fn win_round(&mut self) {
        self.phase = Phase::RoundComplete;
        self.progress.score += 1;

        let mut star_awarded = false;
        if self.rules.awards_stars {
            star_awarded = self.stars.award();
            self.progress.stars = self.stars.stars;
            if let Err(e) = self.stars.save(&mut self.store) {
                log::warn!("Could not save stars: {}", e);
            }
        }

        self.feedback = Some(self.rules.success_feedback);
        self.events.push(SessionEvent::RoundWon {
            round_id: self.round.id,
            star_awarded,
        });
        log::debug!("Round {} won (score {})", self.round.id, self.progress.score);

        self.pending_advance =
            Some(self.timers.schedule(self.rules.success_delay_ms, Deferred::Advance));
    }

    /// End the current trial: next round, or the end of the session
    fn advance(&mut self) {
        self.pending_advance = None;
        self.progress.trial_index += 1;

        if let Some(total) = self.rules.trials_per_session {
            if self.progress.trial_index >= total {
                self.finish_session(total);
                return;
            }
        }

        if self.rules.reload_settings_on_advance {
            self.settings = load_settings(&self.store, self.kind);
            self.refresh_rules();
        }
        self.start_round();
    }

    fn finish_session(&mut self, total: u32) {
        self.timers.cancel_all();
        self.pending_reset = None;
        self.drag.cancel();
        self.phase = Phase::SessionComplete;
        self.progress.session_complete = true;

        let score = self.progress.score;
        self.feedback = Some(if self.rules.scored_summary {
            Feedback::SessionSummary { score, total }
        } else {
            Feedback::SessionComplete
        });
        self.events.push(SessionEvent::SessionFinished { score, total });
        log::info!(
            "{} session finished: {}/{}",
            self.kind.as_str(),
            score,
            total
        );
    }
}

/// Case-insensitive letter comparison (handles accented capitals)
fn letters_match(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
