//! Logical timers for delayed transitions
//!
//! The host advances the clock; nothing here reads wall time. Pending
//! actions are dropped with [`Timers::cancel_all`] whenever a round is
//! superseded.

use serde::{Deserialize, Serialize};

use super::round::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(pub u64);

/// A transition waiting for its delay to elapse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "item", rename_all = "camelCase")]
pub enum Deferred {
    /// Move to the next round (or end the session)
    Advance,
    /// Clear the error marker of one item
    RevertItem(ItemId),
    /// Clear all progress of the current round
    ResetRound,
    /// Zero the given count, keeping the target
    ResetGiven,
}

#[derive(Debug, Clone)]
struct Pending {
    id: TimerId,
    due_ms: u64,
    action: Deferred,
}

#[derive(Debug, Clone, Default)]
pub struct Timers {
    now_ms: u64,
    next_id: u64,
    pending: Vec<Pending>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed logical time (ms)
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule(&mut self, delay_ms: u32, action: Deferred) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push(Pending {
            id,
            due_ms: self.now_ms + delay_ms as u64,
            action,
        });
        id
    }

    /// Returns false if the timer already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("Cancelling {} pending timers", self.pending.len());
        }
        self.pending.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Move the clock forward
    pub fn advance(&mut self, dt_ms: u32) {
        self.now_ms += dt_ms as u64;
    }

    /// Next action whose delay has elapsed, earliest due first (ties in
    /// scheduling order). Popped one at a time so a fired action may cancel
    /// the ones behind it.
    pub fn pop_due(&mut self) -> Option<(TimerId, Deferred)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= self.now_ms)
            .min_by_key(|(_, p)| (p.due_ms, p.id.0))
            .map(|(i, _)| i)?;
        let pending = self.pending.remove(index);
        Some((pending.id, pending.action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_order() {
        let mut timers = Timers::new();
        let late = timers.schedule(900, Deferred::Advance);
        let early = timers.schedule(500, Deferred::RevertItem(ItemId(3)));

        timers.advance(499);
        assert_eq!(timers.pop_due(), None);

        timers.advance(1);
        assert_eq!(timers.pop_due(), Some((early, Deferred::RevertItem(ItemId(3)))));
        assert_eq!(timers.pop_due(), None);
        assert!(timers.is_pending(late));

        timers.advance(400);
        assert_eq!(timers.pop_due(), Some((late, Deferred::Advance)));
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut timers = Timers::new();
        let id = timers.schedule(10, Deferred::ResetGiven);
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        timers.advance(100);
        assert_eq!(timers.pop_due(), None);
    }

    #[test]
    fn test_cancel_all() {
        let mut timers = Timers::new();
        timers.schedule(10, Deferred::ResetRound);
        timers.schedule(20, Deferred::Advance);
        timers.cancel_all();
        timers.advance(1000);
        assert_eq!(timers.pop_due(), None);
        assert_eq!(timers.now_ms(), 1000);
    }

    #[test]
    fn test_zero_delay_fires_on_next_pop() {
        let mut timers = Timers::new();
        let id = timers.schedule(0, Deferred::Advance);
        assert_eq!(timers.pop_due(), Some((id, Deferred::Advance)));
    }
}
