//! Exercise settings and preferences
//!
//! One flat record per exercise, persisted as camelCase JSON under a
//! versioned key. Loading never fails: stored objects are merged onto the
//! defaults field by field and sanitized, so out-of-range or malformed values
//! are clamped or replaced.

mod feeding;
mod letters;
mod number_match;
mod rabbit;
mod sound;
mod words;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use feeding::FeedingSettings;
pub use letters::{ALPHABET, LetterFindSettings, LetterStyle};
pub use number_match::{NumberMatchSettings, TransitionSpeed, VisualStyle};
pub use rabbit::{AnimationSpeed, DisplayMode, FeedRabbitSettings};
pub use sound::LetterSoundSettings;
pub use words::{DEFAULT_WORDS, WordRecomposeSettings};

/// The exercises available in the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    LetterFind,
    LetterSound,
    WordRecompose,
    NumberMatch,
    FeedRabbit,
    Feeding,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 6] = [
        ExerciseKind::LetterFind,
        ExerciseKind::LetterSound,
        ExerciseKind::WordRecompose,
        ExerciseKind::NumberMatch,
        ExerciseKind::FeedRabbit,
        ExerciseKind::Feeding,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::LetterFind => "letter-find",
            ExerciseKind::LetterSound => "letter-sound",
            ExerciseKind::WordRecompose => "word-recompose",
            ExerciseKind::NumberMatch => "number-match",
            ExerciseKind::FeedRabbit => "feed-rabbit",
            ExerciseKind::Feeding => "feeding",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Title shown on the home screen
    pub fn title(&self) -> &'static str {
        match self {
            ExerciseKind::LetterFind => "Trouve la lettre",
            ExerciseKind::LetterSound => "Écoute la lettre",
            ExerciseKind::WordRecompose => "Recompose le mot",
            ExerciseKind::NumberMatch => "Correspondance de quantités",
            ExerciseKind::FeedRabbit => "Nourrir le lapin",
            ExerciseKind::Feeding => "Mangeoire fantôme",
        }
    }

    /// Key of the settings record in the key/value store
    pub fn storage_key(&self) -> &'static str {
        match self {
            ExerciseKind::LetterFind => "settings_letters_v1",
            ExerciseKind::LetterSound => "settings_letter_sound_v1",
            ExerciseKind::WordRecompose => "settings_words_v1",
            ExerciseKind::NumberMatch => "settings_number_match_v1",
            ExerciseKind::FeedRabbit => "settings_feed_rabbit_v1",
            ExerciseKind::Feeding => "settings_feeding_v1",
        }
    }
}

/// Settings of any exercise
#[derive(Debug, Clone, PartialEq)]
pub enum ExerciseSettings {
    LetterFind(LetterFindSettings),
    LetterSound(LetterSoundSettings),
    WordRecompose(WordRecomposeSettings),
    NumberMatch(NumberMatchSettings),
    FeedRabbit(FeedRabbitSettings),
    Feeding(FeedingSettings),
}

impl ExerciseSettings {
    pub fn defaults(kind: ExerciseKind) -> Self {
        match kind {
            ExerciseKind::LetterFind => Self::LetterFind(LetterFindSettings::default()),
            ExerciseKind::LetterSound => Self::LetterSound(LetterSoundSettings::default()),
            ExerciseKind::WordRecompose => Self::WordRecompose(WordRecomposeSettings::default()),
            ExerciseKind::NumberMatch => Self::NumberMatch(NumberMatchSettings::default()),
            ExerciseKind::FeedRabbit => Self::FeedRabbit(FeedRabbitSettings::default()),
            ExerciseKind::Feeding => Self::Feeding(FeedingSettings::default()),
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        match self {
            Self::LetterFind(_) => ExerciseKind::LetterFind,
            Self::LetterSound(_) => ExerciseKind::LetterSound,
            Self::WordRecompose(_) => ExerciseKind::WordRecompose,
            Self::NumberMatch(_) => ExerciseKind::NumberMatch,
            Self::FeedRabbit(_) => ExerciseKind::FeedRabbit,
            Self::Feeding(_) => ExerciseKind::Feeding,
        }
    }

    /// Build sanitized settings from an arbitrary (possibly partial or
    /// malformed) JSON value
    pub fn from_value(kind: ExerciseKind, value: &Value) -> Self {
        match kind {
            ExerciseKind::LetterFind => Self::LetterFind(LetterFindSettings::from_value(value)),
            ExerciseKind::LetterSound => Self::LetterSound(LetterSoundSettings::from_value(value)),
            ExerciseKind::WordRecompose => {
                Self::WordRecompose(WordRecomposeSettings::from_value(value))
            }
            ExerciseKind::NumberMatch => Self::NumberMatch(NumberMatchSettings::from_value(value)),
            ExerciseKind::FeedRabbit => Self::FeedRabbit(FeedRabbitSettings::from_value(value)),
            ExerciseKind::Feeding => Self::Feeding(FeedingSettings::from_value(value)),
        }
    }

    pub fn to_value(&self) -> Value {
        let value = match self {
            Self::LetterFind(s) => serde_json::to_value(s),
            Self::LetterSound(s) => serde_json::to_value(s),
            Self::WordRecompose(s) => serde_json::to_value(s),
            Self::NumberMatch(s) => serde_json::to_value(s),
            Self::FeedRabbit(s) => serde_json::to_value(s),
            Self::Feeding(s) => serde_json::to_value(s),
        };
        // Plain structs of strings/numbers/bools always serialize
        value.unwrap_or(Value::Null)
    }

    pub fn sanitize(self) -> Self {
        match self {
            Self::LetterFind(s) => Self::LetterFind(s.sanitize()),
            Self::LetterSound(s) => Self::LetterSound(s.sanitize()),
            Self::WordRecompose(s) => Self::WordRecompose(s.sanitize()),
            Self::NumberMatch(s) => Self::NumberMatch(s.sanitize()),
            Self::FeedRabbit(s) => Self::FeedRabbit(s.sanitize()),
            Self::Feeding(s) => Self::Feeding(s.sanitize()),
        }
    }

    /// Apply a partial update (as sent by a settings form) on top of these
    /// settings. Unknown keys are ignored, bad values auto-corrected.
    pub fn merged(&self, partial: &Value) -> Self {
        let mut merged = match self.to_value() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if let Value::Object(patch) = partial {
            for (key, value) in patch {
                merged.insert(key.clone(), value.clone());
            }
        }
        Self::from_value(self.kind(), &Value::Object(merged))
    }
}

// === Lenient field access ===
//
// Stored records may come from older versions or hand-edited storage, so
// every field is read on its own and a bad field only resets that field.

/// Numeric field; numeric strings are accepted too
pub(crate) fn number(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

/// Text field; numbers are stringified
pub(crate) fn text(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn boolean(value: &Value, key: &str) -> Option<bool> {
    value.get(key)?.as_bool()
}

pub(crate) fn array<'a>(value: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    value.get(key)?.as_array()
}

/// Parse a list of small integers, ignoring anything else
pub(crate) fn numbers_in(items: &[Value]) -> Vec<f64> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .collect()
}

/// Keep enabled quantities in 1..=3, unique and sorted; empty means all
pub(crate) fn sanitize_quantities(numbers: Vec<u32>) -> Vec<u32> {
    let mut kept: Vec<u32> = numbers.into_iter().filter(|n| (1..=3).contains(n)).collect();
    kept.sort_unstable();
    kept.dedup();
    if kept.is_empty() { vec![1, 2, 3] } else { kept }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_round_trip() {
        for kind in ExerciseKind::ALL {
            assert_eq!(ExerciseKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ExerciseKind::from_str(" Letter-Find "), Some(ExerciseKind::LetterFind));
        assert_eq!(ExerciseKind::from_str("pong"), None);
    }

    #[test]
    fn test_storage_keys_are_distinct() {
        let mut keys: Vec<_> = ExerciseKind::ALL.iter().map(|k| k.storage_key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ExerciseKind::ALL.len());
    }

    #[test]
    fn test_from_value_of_defaults_is_identity() {
        for kind in ExerciseKind::ALL {
            let defaults = ExerciseSettings::defaults(kind);
            assert_eq!(ExerciseSettings::from_value(kind, &defaults.to_value()), defaults);
        }
    }

    #[test]
    fn test_from_non_object_gives_defaults() {
        for kind in ExerciseKind::ALL {
            assert_eq!(
                ExerciseSettings::from_value(kind, &json!(42)),
                ExerciseSettings::defaults(kind)
            );
        }
    }

    #[test]
    fn test_merged_partial_update() {
        let settings = ExerciseSettings::defaults(ExerciseKind::LetterFind);
        let merged = settings.merged(&json!({ "itemsCount": 100, "unknown": true }));
        match merged {
            ExerciseSettings::LetterFind(s) => {
                assert_eq!(s.items_count, 30);
                assert_eq!(s.target_letter, 'A');
            }
            other => panic!("unexpected kind {:?}", other.kind()),
        }
    }

    #[test]
    fn test_lenient_number() {
        let value = json!({ "a": 3, "b": "4.5", "c": "x", "d": null });
        assert_eq!(number(&value, "a"), Some(3.0));
        assert_eq!(number(&value, "b"), Some(4.5));
        assert_eq!(number(&value, "c"), None);
        assert_eq!(number(&value, "d"), None);
        assert_eq!(number(&value, "missing"), None);
    }

    #[test]
    fn test_sanitize_quantities() {
        assert_eq!(sanitize_quantities(vec![3, 1, 3, 9, 0]), vec![1, 3]);
        assert_eq!(sanitize_quantities(vec![]), vec![1, 2, 3]);
        assert_eq!(sanitize_quantities(vec![7]), vec![1, 2, 3]);
    }
}
