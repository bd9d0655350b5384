//! Non-overlapping random placement
//!
//! Rejection sampling over the play area with a minimum pairwise distance
//! that relaxes every few hundred attempts. After the attempt budget runs
//! out, any missing points are drawn without constraint, so the result
//! always has exactly the requested length.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// Placement parameters, in percent of the play area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterConfig {
    /// Keep points this far from every edge
    pub margin: f32,
    /// Starting minimum distance between two points
    pub min_distance: f32,
    /// Total candidate draws before falling back
    pub max_attempts: u32,
    /// Relax the threshold after every `relax_every` draws
    pub relax_every: u32,
    pub relax_factor: f32,
    /// Relaxation stops here
    pub min_floor: f32,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            margin: SCATTER_MARGIN,
            min_distance: initial_min_distance(0),
            max_attempts: SCATTER_MAX_ATTEMPTS,
            relax_every: SCATTER_RELAX_EVERY,
            relax_factor: SCATTER_RELAX_FACTOR,
            min_floor: SCATTER_MIN_FLOOR,
        }
    }
}

impl ScatterConfig {
    /// Default tuning with a starting distance suited to `n` points
    pub fn for_count(n: usize) -> Self {
        Self {
            min_distance: initial_min_distance(n),
            ..Self::default()
        }
    }
}

/// Starting distance; the more cards, the closer they may sit
pub fn initial_min_distance(n: usize) -> f32 {
    match n {
        0..=10 => 22.0,
        11..=14 => 18.0,
        15..=18 => 15.0,
        19..=22 => 13.0,
        23..=26 => 11.0,
        _ => 9.0,
    }
}

/// Result of a placement run
#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    pub points: Vec<Vec2>,
    /// Threshold in force when sampling stopped
    pub min_distance: f32,
    /// True when the attempt budget ran out and some points were placed
    /// without the distance constraint
    pub exhausted: bool,
}

/// Place `n` points inside `[margin, 100 - margin]²`
pub fn scatter(n: usize, config: &ScatterConfig, rng: &mut impl Rng) -> Scatter {
    let lo = config.margin.clamp(0.0, AREA_EXTENT / 2.0);
    let hi = AREA_EXTENT - lo;

    let mut points: Vec<Vec2> = Vec::with_capacity(n);
    let mut min_distance = config.min_distance.max(0.0);
    let mut attempts = 0u32;

    while points.len() < n && attempts < config.max_attempts {
        let candidate = sample(rng, lo, hi);
        if points.iter().all(|p| p.distance(candidate) >= min_distance) {
            points.push(candidate);
        }
        attempts += 1;
        if config.relax_every > 0 && attempts % config.relax_every == 0 {
            // Never raise the threshold, even when starting below the floor
            min_distance = (min_distance * config.relax_factor)
                .max(config.min_floor)
                .min(min_distance);
        }
    }

    let exhausted = points.len() < n;
    if exhausted {
        log::debug!(
            "Scatter budget exhausted: placed {}/{} at distance {:.1}",
            points.len(),
            n,
            min_distance
        );
    }
    while points.len() < n {
        points.push(sample(rng, lo, hi));
    }

    Scatter {
        points,
        min_distance,
        exhausted,
    }
}

fn sample(rng: &mut impl Rng, lo: f32, hi: f32) -> Vec2 {
    if hi <= lo {
        return Vec2::splat(lo);
    }
    Vec2::new(rng.random_range(lo..hi), rng.random_range(lo..hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn min_pairwise(points: &[Vec2]) -> f32 {
        let mut min = f32::INFINITY;
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                min = min.min(a.distance(*b));
            }
        }
        min
    }

    #[test]
    fn test_initial_distance_table() {
        assert_eq!(initial_min_distance(8), 22.0);
        assert_eq!(initial_min_distance(12), 18.0);
        assert_eq!(initial_min_distance(16), 15.0);
        assert_eq!(initial_min_distance(20), 13.0);
        assert_eq!(initial_min_distance(25), 11.0);
        assert_eq!(initial_min_distance(30), 9.0);
    }

    #[test]
    fn test_points_stay_inside_margins() {
        let mut rng = Pcg32::seed_from_u64(7);
        let result = scatter(30, &ScatterConfig::for_count(30), &mut rng);
        assert_eq!(result.points.len(), 30);
        for p in &result.points {
            assert!(p.x >= SCATTER_MARGIN && p.x <= AREA_EXTENT - SCATTER_MARGIN);
            assert!(p.y >= SCATTER_MARGIN && p.y <= AREA_EXTENT - SCATTER_MARGIN);
        }
    }

    #[test]
    fn test_zero_points() {
        let mut rng = Pcg32::seed_from_u64(1);
        let result = scatter(0, &ScatterConfig::default(), &mut rng);
        assert!(result.points.is_empty());
        assert!(!result.exhausted);
    }

    #[test]
    fn test_tiny_budget_still_fills() {
        let mut rng = Pcg32::seed_from_u64(3);
        let config = ScatterConfig {
            max_attempts: 5,
            min_distance: 80.0,
            ..ScatterConfig::default()
        };
        let result = scatter(20, &config, &mut rng);
        assert_eq!(result.points.len(), 20);
        assert!(result.exhausted);
    }

    #[test]
    fn test_threshold_never_below_floor() {
        let mut rng = Pcg32::seed_from_u64(11);
        let config = ScatterConfig {
            min_distance: 60.0,
            ..ScatterConfig::default()
        };
        let result = scatter(30, &config, &mut rng);
        assert!(result.min_distance >= SCATTER_MIN_FLOOR);
        assert!(result.min_distance < 60.0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = ScatterConfig::for_count(16);
        let a = scatter(16, &config, &mut Pcg32::seed_from_u64(42));
        let b = scatter(16, &config, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_spacing_or_exhausted(n in 0usize..=30, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let result = scatter(n, &ScatterConfig::for_count(n), &mut rng);
            prop_assert_eq!(result.points.len(), n);
            if !result.exhausted && n > 1 {
                prop_assert!(min_pairwise(&result.points) >= result.min_distance);
            }
        }

        #[test]
        fn prop_low_budget_returns_exactly_n(n in 4usize..=30, budget in 0u32..4, seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let config = ScatterConfig { max_attempts: budget, ..ScatterConfig::for_count(n) };
            let result = scatter(n, &config, &mut rng);
            prop_assert_eq!(result.points.len(), n);
            prop_assert!(result.exhausted);
        }
    }
}
