//! Round data: the target and the items offered to the child

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable item identifier, unique within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

/// Allocates item ids for the whole session, so ids from a discarded round
/// never alias items of the current one
#[derive(Debug, Clone)]
pub struct ItemIds {
    next_id: u32,
}

impl Default for ItemIds {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl ItemIds {
    pub fn next_item_id(&mut self) -> ItemId {
        let id = self.next_id;
        self.next_id += 1;
        ItemId(id)
    }
}

/// What the child has to find or produce
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Target {
    Letter(char),
    Word(String),
    Count(u32),
}

/// What an item shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Payload {
    Letter(char),
    /// A quantity card
    Number(u32),
    /// A draggable token
    Carrot,
}

/// Visual state of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    #[default]
    Idle,
    /// Correctly found
    Locked,
    /// Consumed (letter placed in a slot, carrot on the plate)
    Used,
    /// Wrong answer marker
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub payload: Payload,
    pub is_target: bool,
    /// Position in percent of the play area (spatial exercises only)
    pub position: Option<Vec2>,
    pub state: ItemState,
}

impl Item {
    pub fn new(id: ItemId, payload: Payload, is_target: bool) -> Self {
        Self {
            id,
            payload,
            is_target,
            position: None,
            state: ItemState::Idle,
        }
    }

    pub fn letter(&self) -> Option<char> {
        match self.payload {
            Payload::Letter(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_token(&self) -> bool {
        self.payload == Payload::Carrot
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub id: u32,
    pub target: Target,
    pub items: Vec<Item>,
    /// One per letter of the word (in-order rounds only)
    pub slots: Vec<Option<char>>,
    /// Tokens given so far (count rounds only)
    pub given: u32,
}

impl Round {
    pub fn new(id: u32, target: Target, items: Vec<Item>) -> Self {
        Self {
            id,
            target,
            items,
            slots: Vec::new(),
            given: 0,
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn target_total(&self) -> usize {
        self.items.iter().filter(|item| item.is_target).count()
    }

    pub fn targets_locked(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.is_target && item.state == ItemState::Locked)
            .count()
    }

    pub fn all_targets_locked(&self) -> bool {
        self.items
            .iter()
            .filter(|item| item.is_target)
            .all(|item| item.state == ItemState::Locked)
    }

    /// Index of the first empty slot
    pub fn next_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Letter the next empty slot expects
    pub fn expected_letter(&self) -> Option<char> {
        let Target::Word(word) = &self.target else {
            return None;
        };
        word.chars().nth(self.next_slot()?)
    }

    pub fn slots_filled(&self) -> bool {
        !self.slots.is_empty() && self.slots.iter().all(Option::is_some)
    }

    /// Requested quantity (count rounds only)
    pub fn target_count(&self) -> Option<u32> {
        match self.target {
            Target::Count(n) => Some(n),
            _ => None,
        }
    }

    /// How much is still missing before the round can be won
    pub fn remaining(&self) -> u32 {
        match &self.target {
            Target::Count(n) => n.saturating_sub(self.given),
            Target::Word(_) => self.slots.iter().filter(|s| s.is_none()).count() as u32,
            Target::Letter(_) => (self.target_total() - self.targets_locked()) as u32,
        }
    }

    /// True once the child has done anything in this round
    pub fn has_progress(&self) -> bool {
        self.given > 0
            || self.slots.iter().any(Option::is_some)
            || self
                .items
                .iter()
                .any(|item| matches!(item.state, ItemState::Locked | ItemState::Used))
    }

    /// Put every item back to idle and clear slots and given count
    pub fn reset_progress(&mut self) {
        for item in &mut self.items {
            item.state = ItemState::Idle;
        }
        for slot in &mut self.slots {
            *slot = None;
        }
        self.given = 0;
    }

    /// Return every consumed token and zero the given count
    pub fn reset_given(&mut self) {
        for item in self.items.iter_mut().filter(|item| item.is_token()) {
            item.state = ItemState::Idle;
        }
        self.given = 0;
    }
}
