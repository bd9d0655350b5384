//! Read-only view handed to the UI after every transition

use serde::{Deserialize, Serialize};

use super::round::{Item, ItemId, Round, Target};
use super::state::{Feedback, Phase, Progress, Session};
use crate::persistence::SettingsStore;
use crate::settings::{ExerciseKind, ExerciseSettings};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackView {
    pub kind: Feedback,
    pub message: String,
    pub positive: bool,
}

impl From<Feedback> for FeedbackView {
    fn from(feedback: Feedback) -> Self {
        Self {
            message: feedback.message(),
            positive: feedback.is_positive(),
            kind: feedback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub kind: ExerciseKind,
    pub phase: Phase,
    pub round_id: u32,
    pub target: Target,
    /// Instruction shown (and spoken) to the child
    pub prompt: String,
    pub items: Vec<Item>,
    pub slots: Vec<Option<char>>,
    pub given: u32,
    /// Targets, letters or carrots still missing
    pub remaining: u32,
    pub progress: Progress,
    pub feedback: Option<FeedbackView>,
    pub session_complete: bool,
    pub dragging: Option<ItemId>,
}

impl<S: SettingsStore> Session<S> {
    pub fn snapshot(&self) -> Snapshot {
        let round = self.round();
        Snapshot {
            kind: self.kind(),
            phase: self.phase(),
            round_id: round.id,
            target: round.target.clone(),
            prompt: prompt(self.settings(), round),
            items: round.items.clone(),
            slots: round.slots.clone(),
            given: round.given,
            remaining: round.remaining(),
            progress: *self.progress(),
            feedback: self.feedback().map(FeedbackView::from),
            session_complete: self.progress().session_complete,
            dragging: self.dragging(),
        }
    }
}

fn carrots(n: u32) -> String {
    if n > 1 {
        format!("{} carottes", n)
    } else {
        format!("{} carotte", n)
    }
}

/// French instruction for the current round
pub fn prompt(settings: &ExerciseSettings, round: &Round) -> String {
    match (settings, &round.target) {
        (ExerciseSettings::LetterSound(_), _) => "Écoute et choisis la lettre".to_string(),
        (_, Target::Letter(letter)) => format!("Trouve la lettre {}", letter),
        (_, Target::Word(word)) => format!("Recompose le mot {}", word),
        (ExerciseSettings::FeedRabbit(_), Target::Count(n)) => {
            format!("Donne {} au lapin", carrots(*n))
        }
        (ExerciseSettings::Feeding(_), Target::Count(n)) => {
            format!("Place {} dans l'assiette", carrots(*n))
        }
        (_, Target::Count(n)) => format!("Trouve {}", n),
    }
}
