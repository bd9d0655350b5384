//! Ghost feeder settings

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::number;
use crate::clamp_round;

pub const MIN_TARGET: u32 = 1;
pub const MAX_TARGET: u32 = 5;
pub const MAX_POOL: u32 = 10;

/// Settings of the "fill the plate, then check" exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingSettings {
    /// Largest quantity that may be requested
    pub max_target: u32,
    /// Carrots available on the table (never fewer than `max_target`)
    pub pool_size: u32,
}

impl Default for FeedingSettings {
    fn default() -> Self {
        Self {
            max_target: 3,
            pool_size: 6,
        }
    }
}

impl FeedingSettings {
    pub fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let max_target = number(value, "maxTarget")
            .map(|n| clamp_round(n, MIN_TARGET as i64, MAX_TARGET as i64) as u32)
            .unwrap_or(defaults.max_target);
        let pool_size = number(value, "poolSize")
            .map(|n| clamp_round(n, 0, MAX_POOL as i64) as u32)
            .unwrap_or(defaults.pool_size);
        Self {
            max_target,
            pool_size,
        }
        .sanitize()
    }

    pub fn sanitize(self) -> Self {
        let max_target = self.max_target.clamp(MIN_TARGET, MAX_TARGET);
        Self {
            max_target,
            pool_size: self.pool_size.clamp(max_target, MAX_POOL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pool_never_smaller_than_target() {
        let settings = FeedingSettings::from_value(&json!({ "maxTarget": 5, "poolSize": 2 }));
        assert_eq!(settings.max_target, 5);
        assert_eq!(settings.pool_size, 5);
    }

    #[test]
    fn test_clamped_and_fixed_point() {
        let once = FeedingSettings::from_value(&json!({ "maxTarget": 0, "poolSize": 99 }));
        assert_eq!(once, FeedingSettings { max_target: 1, pool_size: 10 });
        assert_eq!(once.clone().sanitize(), once);
    }
}
