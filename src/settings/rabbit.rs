//! Feed the rabbit settings

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{array, boolean, number, numbers_in, sanitize_quantities, text};

pub const MIN_TRIALS: u32 = 5;
pub const MAX_TRIALS: u32 = 20;
pub const DEFAULT_TRIALS: u32 = 10;

/// How the requested quantity is announced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Spoken instruction only
    Vocal,
    /// Carrot pictures only
    Graphic,
    #[default]
    Both,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Vocal => "vocal",
            DisplayMode::Graphic => "graphic",
            DisplayMode::Both => "both",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "vocal" => Some(DisplayMode::Vocal),
            "graphic" => Some(DisplayMode::Graphic),
            "both" => Some(DisplayMode::Both),
            _ => None,
        }
    }

    pub fn speaks(&self) -> bool {
        matches!(self, DisplayMode::Vocal | DisplayMode::Both)
    }

    pub fn shows_pictures(&self) -> bool {
        matches!(self, DisplayMode::Graphic | DisplayMode::Both)
    }
}

/// Pace of the reaction animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    #[default]
    Normal,
    Fast,
}

impl AnimationSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationSpeed::Normal => "normal",
            AnimationSpeed::Fast => "fast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(AnimationSpeed::Normal),
            "fast" => Some(AnimationSpeed::Fast),
            _ => None,
        }
    }

    /// How long the rabbit reacts before the next step (ms)
    pub fn duration_ms(&self) -> u32 {
        match self {
            AnimationSpeed::Normal => 2000,
            AnimationSpeed::Fast => 1000,
        }
    }
}

/// Settings of the "give the rabbit exactly N carrots" exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRabbitSettings {
    /// Quantities that may be requested (subset of 1..=3)
    pub enabled_numbers: Vec<u32>,
    pub display_mode: DisplayMode,
    /// Show the digit next to the carrot pictures
    pub show_digit: bool,
    pub trials_per_session: u32,
    pub animation_speed: AnimationSpeed,
}

impl Default for FeedRabbitSettings {
    fn default() -> Self {
        Self {
            enabled_numbers: vec![1, 2, 3],
            display_mode: DisplayMode::Both,
            show_digit: false,
            trials_per_session: DEFAULT_TRIALS,
            animation_speed: AnimationSpeed::Normal,
        }
    }
}

impl FeedRabbitSettings {
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
        let trials_per_session = number(value, "trialsPerSession")
            .map(|n| n.floor().clamp(MIN_TRIALS as f64, MAX_TRIALS as f64) as u32)
            .unwrap_or(DEFAULT_TRIALS);

        Self {
            enabled_numbers,
            display_mode: text(value, "displayMode")
                .and_then(|s| DisplayMode::from_str(&s))
                .unwrap_or_default(),
            show_digit: boolean(value, "showDigit").unwrap_or(defaults.show_digit),
            trials_per_session,
            animation_speed: text(value, "animationSpeed")
                .and_then(|s| AnimationSpeed::from_str(&s))
                .unwrap_or_default(),
        }
        .sanitize()
    }

    pub fn sanitize(self) -> Self {
        Self {
            enabled_numbers: sanitize_quantities(self.enabled_numbers),
            trials_per_session: self.trials_per_session.clamp(MIN_TRIALS, MAX_TRIALS),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_from_empty_object() {
        assert_eq!(FeedRabbitSettings::from_value(&json!({})), FeedRabbitSettings::default());
    }

    #[test]
    fn test_values_are_sanitized() {
        let settings = FeedRabbitSettings::from_value(&json!({
            "enabledNumbers": [3, 3, 7, 1.5, "2"],
            "displayMode": "GRAPHIC",
            "showDigit": "yes",
            "trialsPerSession": 42.9,
            "animationSpeed": "fast",
        }));
        assert_eq!(settings.enabled_numbers, vec![2, 3]);
        assert_eq!(settings.display_mode, DisplayMode::Graphic);
        assert!(!settings.show_digit);
        assert_eq!(settings.trials_per_session, MAX_TRIALS);
        assert_eq!(settings.animation_speed, AnimationSpeed::Fast);
        assert_eq!(settings.animation_speed.duration_ms(), 1000);
    }

    #[test]
    fn test_no_enabled_numbers_means_all() {
        let settings = FeedRabbitSettings::from_value(&json!({ "enabledNumbers": [] }));
        assert_eq!(settings.enabled_numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_display_mode_flags() {
        assert!(DisplayMode::Vocal.speaks());
        assert!(!DisplayMode::Vocal.shows_pictures());
        assert!(DisplayMode::Both.speaks() && DisplayMode::Both.shows_pictures());
    }

    #[test]
    fn test_sanitize_is_fixed_point() {
        let once = FeedRabbitSettings {
            enabled_numbers: vec![0, 2, 2],
            trials_per_session: 1,
            ..FeedRabbitSettings::default()
        }
        .sanitize();
        assert_eq!(once.enabled_numbers, vec![2]);
        assert_eq!(once.trials_per_session, MIN_TRIALS);
        assert_eq!(once.clone().sanitize(), once);
    }
}
