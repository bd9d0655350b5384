//! Semantic input events forwarded by the UI

use serde::{Deserialize, Serialize};

use super::round::ItemId;

/// One user action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Input {
    /// Click/tap on an item
    Select { id: ItemId },
    /// "Verify" button of batch-judged exercises
    Verify,
    /// Start dragging a token
    PointerDown { id: ItemId },
    /// Release the dragged token
    PointerUp { in_drop_zone: bool },
    PointerCancel,
    /// Start a new session with the same settings
    Restart,
}

/// Tracks the single drag gesture allowed at a time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragTracker {
    active: Option<ItemId>,
}

impl DragTracker {
    /// Start dragging `id`. Rejected while another drag is active.
    pub fn begin(&mut self, id: ItemId) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// End the gesture, returning the dragged item
    pub fn finish(&mut self) -> Option<ItemId> {
        self.active.take()
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<ItemId> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_drag_rejected() {
        let mut drag = DragTracker::default();
        assert!(drag.begin(ItemId(1)));
        assert!(!drag.begin(ItemId(2)));
        assert_eq!(drag.active(), Some(ItemId(1)));
        assert_eq!(drag.finish(), Some(ItemId(1)));
        assert_eq!(drag.finish(), None);
        assert!(drag.begin(ItemId(2)));
    }

    #[test]
    fn test_input_json() {
        let input: Input = serde_json::from_str(r#"{"type":"pointerUp","inDropZone":true}"#).unwrap();
        assert_eq!(input, Input::PointerUp { in_drop_zone: true });
        let input: Input = serde_json::from_str(r#"{"type":"select","id":4}"#).unwrap();
        assert_eq!(input, Input::Select { id: ItemId(4) });
    }
}
