//! Quantity matching settings

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{array, boolean, number, numbers_in, sanitize_quantities, text};

pub const MIN_TRIALS: u32 = 5;
pub const MAX_TRIALS: u32 = 30;
pub const DEFAULT_TRIALS: u32 = 10;

/// Objects drawn to represent quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VisualStyle {
    #[default]
    Apples,
    Balls,
    Stars,
    Hearts,
}

impl VisualStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualStyle::Apples => "apples",
            VisualStyle::Balls => "balls",
            VisualStyle::Stars => "stars",
            VisualStyle::Hearts => "hearts",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "apples" => Some(VisualStyle::Apples),
            "balls" => Some(VisualStyle::Balls),
            "stars" => Some(VisualStyle::Stars),
            "hearts" => Some(VisualStyle::Hearts),
            _ => None,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            VisualStyle::Apples => "🍎",
            VisualStyle::Balls => "⚽",
            VisualStyle::Stars => "⭐",
            VisualStyle::Hearts => "❤️",
        }
    }
}

/// Pause between an answer and the next trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransitionSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl TransitionSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionSpeed::Slow => "slow",
            TransitionSpeed::Normal => "normal",
            TransitionSpeed::Fast => "fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(TransitionSpeed::Slow),
            "normal" => Some(TransitionSpeed::Normal),
            "fast" => Some(TransitionSpeed::Fast),
            _ => None,
        }
    }

    /// Answer animation length (ms)
    pub fn duration_ms(&self) -> u32 {
        match self {
            TransitionSpeed::Slow => 1000,
            TransitionSpeed::Normal => 600,
            TransitionSpeed::Fast => 300,
        }
    }
}

/// Settings of the "find the matching quantity" exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberMatchSettings {
    pub enabled_numbers: Vec<u32>,
    pub visual_style: VisualStyle,
    pub trials_per_session: u32,
    /// Speak the instruction aloud
    pub enable_voice: bool,
    pub animation_speed: TransitionSpeed,
}

impl Default for NumberMatchSettings {
    fn default() -> Self {
        Self {
            enabled_numbers: vec![1, 2, 3],
            visual_style: VisualStyle::Apples,
            trials_per_session: DEFAULT_TRIALS,
            enable_voice: true,
            animation_speed: TransitionSpeed::Normal,
        }
    }
}

impl NumberMatchSettings {
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let enabled_numbers = array(value, "enabledNumbers")
            .map(|items| {
                numbers_in(items)
                    .into_iter()
                    .filter(|n| n.fract() == 0.0 && (1.0..=3.0).contains(n))
                    .map(|n| n as u32)
                    .collect()
            })
            .unwrap_or(defaults.enabled_numbers);
        // Out-of-range trial counts are replaced, not clamped
        let trials_per_session = number(value, "trialsPerSession")
            .filter(|n| (MIN_TRIALS as f64..=MAX_TRIALS as f64).contains(n))
            .map(|n| n.floor() as u32)
            .unwrap_or(DEFAULT_TRIALS);

        Self {
            enabled_numbers,
            visual_style: text(value, "visualStyle")
                .and_then(|s| VisualStyle::from_str(&s))
                .unwrap_or_default(),
            trials_per_session,
            enable_voice: boolean(value, "enableVoice").unwrap_or(defaults.enable_voice),
            animation_speed: text(value, "animationSpeed")
                .and_then(|s| TransitionSpeed::from_str(&s))
                .unwrap_or_default(),
        }
        .sanitize()
    }

    pub fn sanitize(self) -> Self {
        let trials_per_session = if (MIN_TRIALS..=MAX_TRIALS).contains(&self.trials_per_session) {
            self.trials_per_session
        } else {
            DEFAULT_TRIALS
        };
        Self {
            enabled_numbers: sanitize_quantities(self.enabled_numbers),
            trials_per_session,
            ..self
        }
    }

    /// Delay between an answer and the next trial (ms)
    pub fn advance_delay_ms(&self) -> u32 {
        self.animation_speed.duration_ms() + crate::consts::NUMBER_MATCH_EXTRA_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_out_of_range_trials_reset_to_default() {
        let settings = NumberMatchSettings::from_value(&json!({ "trialsPerSession": 31 }));
        assert_eq!(settings.trials_per_session, DEFAULT_TRIALS);
        let settings = NumberMatchSettings::from_value(&json!({ "trialsPerSession": 30 }));
        assert_eq!(settings.trials_per_session, 30);
        let settings = NumberMatchSettings::from_value(&json!({ "trialsPerSession": 2 }));
        assert_eq!(settings.trials_per_session, DEFAULT_TRIALS);
    }

    #[test]
    fn test_style_and_speed() {
        let settings = NumberMatchSettings::from_value(&json!({
            "visualStyle": "hearts",
            "animationSpeed": "slow",
            "enableVoice": false,
            "enabledNumbers": [2],
        }));
        assert_eq!(settings.visual_style, VisualStyle::Hearts);
        assert_eq!(settings.visual_style.emoji(), "❤️");
        assert_eq!(settings.advance_delay_ms(), 2000);
        assert!(!settings.enable_voice);
        assert_eq!(settings.enabled_numbers, vec![2]);
    }

    #[test]
    fn test_unknown_style_uses_default() {
        let settings = NumberMatchSettings::from_value(&json!({ "visualStyle": "cars" }));
        assert_eq!(settings.visual_style, VisualStyle::Apples);
    }

    #[test]
    fn test_sanitize_is_fixed_point() {
        let once = NumberMatchSettings {
            trials_per_session: 300,
            enabled_numbers: vec![],
            ..NumberMatchSettings::default()
        }
        .sanitize();
        assert_eq!(once.trials_per_session, DEFAULT_TRIALS);
        assert_eq!(once.enabled_numbers, vec![1, 2, 3]);
        assert_eq!(once.clone().sanitize(), once);
    }
}
