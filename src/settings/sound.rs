//! Letter sound settings

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ALPHABET, array, number};

pub const MIN_CHOICES: u32 = 2;
pub const MAX_CHOICES: u32 = 12;
pub const DEFAULT_CHOICES: u32 = 6;

/// Settings of the "hear a letter, pick it" exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterSoundSettings {
    /// Letters that may be asked. May be empty after "clear all"; rounds
    /// then use the whole alphabet.
    pub enabled_letters: Vec<char>,
    /// Buttons shown per round, target included
    pub choices_per_round: u32,
}

impl Default for LetterSoundSettings {
    fn default() -> Self {
        Self {
            enabled_letters: ALPHABET.chars().collect(),
            choices_per_round: DEFAULT_CHOICES,
        }
    }
}

impl LetterSoundSettings {
    pub fn from_value(value: &Value) -> Self {
        let enabled_letters = match array(value, "enabledLetters") {
            Some(items) => items
                .iter()
                .filter_map(|item| single_letter(item.as_str()?))
                .collect(),
            None => Self::default().enabled_letters,
        };
        let choices_per_round = number(value, "choicesPerRound")
            .map(|n| n.floor().clamp(MIN_CHOICES as f64, MAX_CHOICES as f64) as u32)
            .unwrap_or(DEFAULT_CHOICES);

        Self {
            enabled_letters,
            choices_per_round,
        }
        .sanitize()
    }

    pub fn sanitize(self) -> Self {
        let mut enabled_letters: Vec<char> = Vec::with_capacity(self.enabled_letters.len());
        for letter in self.enabled_letters.into_iter().map(|c| c.to_ascii_uppercase()) {
            if letter.is_ascii_uppercase() && !enabled_letters.contains(&letter) {
                enabled_letters.push(letter);
            }
        }
        Self {
            enabled_letters,
            choices_per_round: self.choices_per_round.clamp(MIN_CHOICES, MAX_CHOICES),
        }
    }

    /// Letters a round may draw from
    pub fn effective_letters(&self) -> Vec<char> {
        if self.enabled_letters.is_empty() {
            ALPHABET.chars().collect()
        } else {
            self.enabled_letters.clone()
        }
    }

    /// Letters switched off in the settings (shown as a reminder)
    pub fn disabled_letters(&self) -> Vec<char> {
        ALPHABET
            .chars()
            .filter(|c| !self.enabled_letters.contains(c))
            .collect()
    }
}

/// A string holding exactly one letter
fn single_letter(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    (chars.next().is_none() && letter.is_ascii_uppercase()).then_some(letter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_letters_are_normalized() {
        let settings = LetterSoundSettings::from_value(&json!({
            "enabledLetters": ["a", "B", "a", "ch", 3, "é", "z"],
            "choicesPerRound": 4.7,
        }));
        assert_eq!(settings.enabled_letters, vec!['A', 'B', 'Z']);
        assert_eq!(settings.choices_per_round, 4);
    }

    #[test]
    fn test_choices_are_clamped() {
        let low = LetterSoundSettings::from_value(&json!({ "choicesPerRound": 0 }));
        assert_eq!(low.choices_per_round, MIN_CHOICES);
        let high = LetterSoundSettings::from_value(&json!({ "choicesPerRound": 50 }));
        assert_eq!(high.choices_per_round, MAX_CHOICES);
        let bad = LetterSoundSettings::from_value(&json!({ "choicesPerRound": "many" }));
        assert_eq!(bad.choices_per_round, DEFAULT_CHOICES);
    }

    #[test]
    fn test_empty_selection_is_kept_but_rounds_use_alphabet() {
        let settings = LetterSoundSettings::from_value(&json!({ "enabledLetters": [] }));
        assert!(settings.enabled_letters.is_empty());
        assert_eq!(settings.effective_letters().len(), 26);
        assert_eq!(settings.disabled_letters().len(), 26);
    }

    #[test]
    fn test_missing_letters_enable_all() {
        let settings = LetterSoundSettings::from_value(&json!({}));
        assert_eq!(settings, LetterSoundSettings::default());
    }

    #[test]
    fn test_sanitize_is_fixed_point() {
        let once = LetterSoundSettings {
            enabled_letters: vec!['q', 'Q', '1', 'x'],
            choices_per_round: 99,
        }
        .sanitize();
        assert_eq!(once.enabled_letters, vec!['Q', 'X']);
        assert_eq!(once.clone().sanitize(), once);
    }
}
