//! Letter find settings

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{number, text};
use crate::clamp_round;

pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const MIN_ITEMS: u32 = 8;
pub const MAX_ITEMS: u32 = 30;
pub const MIN_TARGET_RATIO: f64 = 0.1;
pub const MAX_TARGET_RATIO: f64 = 0.9;

/// Letter shape used to draw the cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LetterStyle {
    /// Block capitals
    #[default]
    Baton,
    Cursif,
    Script,
    Serif,
}

impl LetterStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterStyle::Baton => "baton",
            LetterStyle::Cursif => "cursif",
            LetterStyle::Script => "script",
            LetterStyle::Serif => "serif",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "baton" => Some(LetterStyle::Baton),
            "cursif" => Some(LetterStyle::Cursif),
            "script" => Some(LetterStyle::Script),
            "serif" => Some(LetterStyle::Serif),
            _ => None,
        }
    }

    /// CSS font stack for this style
    pub fn font_family(&self) -> &'static str {
        match self {
            LetterStyle::Baton => "\"Segoe UI\", \"Inter\", sans-serif",
            LetterStyle::Cursif => "\"Comic Sans MS\", \"Comic Neue\", cursive",
            LetterStyle::Script => "\"Pacifico\", \"Brush Script MT\", cursive",
            LetterStyle::Serif => "\"Georgia\", \"Times New Roman\", serif",
        }
    }
}

/// Settings of the "find every target letter" exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterFindSettings {
    /// Letter the child must find
    pub target_letter: char,
    /// Letters used for the other cards (never contains the target)
    pub distractor_letters: String,
    /// Number of cards on the play area
    pub items_count: u32,
    /// Share of cards showing the target letter
    pub target_ratio: f64,
    pub letter_style: LetterStyle,
}

impl Default for LetterFindSettings {
    fn default() -> Self {
        Self {
            target_letter: 'A',
            distractor_letters: "BCDGH".to_string(),
            items_count: 12,
            target_ratio: 0.35,
            letter_style: LetterStyle::Baton,
        }
    }
}

impl LetterFindSettings {
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let target_letter = text(value, "targetLetter")
            .and_then(|s| first_letter(&s))
            .unwrap_or(defaults.target_letter);
        let distractor_letters =
            text(value, "distractorLetters").unwrap_or(defaults.distractor_letters);
        // Zero counts as "unset", like an empty form field
        let items_count = number(value, "itemsCount")
            .filter(|n| *n != 0.0)
            .map(|n| clamp_round(n, MIN_ITEMS as i64, MAX_ITEMS as i64) as u32)
            .unwrap_or(defaults.items_count);
        let target_ratio = number(value, "targetRatio")
            .filter(|n| *n != 0.0)
            .unwrap_or(defaults.target_ratio);
        let letter_style = text(value, "letterStyle")
            .and_then(|s| LetterStyle::from_str(&s))
            .unwrap_or_default();

        Self {
            target_letter,
            distractor_letters,
            items_count,
            target_ratio,
            letter_style,
        }
        .sanitize()
    }

    pub fn sanitize(self) -> Self {
        let defaults = Self::default();
        let target_letter = first_letter(&self.target_letter.to_string()).unwrap_or(defaults.target_letter);
        let items_count = if self.items_count == 0 {
            defaults.items_count
        } else {
            self.items_count.clamp(MIN_ITEMS, MAX_ITEMS)
        };
        let target_ratio = if self.target_ratio.is_finite() && self.target_ratio != 0.0 {
            self.target_ratio
        } else {
            defaults.target_ratio
        };
        let target_ratio = target_ratio.clamp(MIN_TARGET_RATIO, MAX_TARGET_RATIO);

        Self {
            target_letter,
            distractor_letters: build_distractors(&self.distractor_letters, target_letter),
            items_count,
            target_ratio,
            letter_style: self.letter_style,
        }
    }

    /// Distractor pool as characters
    pub fn distractor_pool(&self) -> Vec<char> {
        self.distractor_letters.chars().collect()
    }
}

/// First A-Z letter of the input, upper-cased
fn first_letter(s: &str) -> Option<char> {
    s.chars()
        .map(|c| c.to_ascii_uppercase())
        .find(|c| c.is_ascii_uppercase())
}

/// Upper-case, A-Z only, unique, target excluded. Falls back to the whole
/// alphabet minus the target when nothing is left.
fn build_distractors(raw: &str, target: char) -> String {
    let mut letters = String::new();
    for c in raw.chars().map(|c| c.to_ascii_uppercase()) {
        if c.is_ascii_uppercase() && c != target && !letters.contains(c) {
            letters.push(c);
        }
    }
    if letters.is_empty() {
        ALPHABET.chars().filter(|&c| c != target).collect()
    } else {
        letters
    }
}
