use serde::Deserialize;

use crate::error::{SiteError, SiteResult};

/// Tuning for the spinning logo. Speeds are in degrees per tick.
///
/// Deserializes from a partial camelCase object, so the page can override a
/// single field (`{ maxSpeed: 6 }`) and keep the defaults for the rest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RotationConfig {
    pub base_speed: f32,
    pub hover_multiplier: f32,
    pub move_multiplier: f32,
    pub touch_base_multiplier: f32,
    pub max_speed: f32,
    pub touch_sensitivity: f32,
    pub dead_zone_pixels: f32,
    pub velocity_decay: f32,
    /// Fraction of the speed gap closed per tick while uncontrolled
    pub return_easing: f32,

    /// Minimum horizontal pointer delta that counts as directional movement
    pub pointer_move_threshold: f32,
    /// Horizontal touch movement must exceed this fraction of the vertical
    pub horizontal_dominance: f32,
    /// Floor for the time between touch samples (timer coalescing)
    pub min_sample_interval_ms: f64,
    /// Applied oldest to newest over the velocity history
    pub velocity_weights: [f32; 3],
    pub touch_velocity_gain: f32,
    /// Bound on the speed a swipe can add on top of the touch base speed
    pub touch_boost_limit: f32,

    pub fast_threshold: f32,
    pub medium_threshold: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            base_speed: 1.0,
            hover_multiplier: 2.0,
            move_multiplier: 3.0,
            touch_base_multiplier: 1.8,
            max_speed: 4.0,
            touch_sensitivity: 0.05,
            dead_zone_pixels: 2.0,
            velocity_decay: 0.82,
            return_easing: 0.1,

            pointer_move_threshold: 0.5,
            horizontal_dominance: 0.6,
            min_sample_interval_ms: 16.0,
            velocity_weights: [0.2, 0.3, 0.5],
            touch_velocity_gain: 4.0,
            touch_boost_limit: 2.5,

            fast_threshold: 0.65,
            medium_threshold: 0.35,
        }
    }
}

impl RotationConfig {
    pub fn hover_speed(&self) -> f32 {
        self.base_speed * self.hover_multiplier
    }

    pub fn move_speed(&self) -> f32 {
        self.base_speed * self.move_multiplier
    }

    pub fn touch_speed(&self) -> f32 {
        self.base_speed * self.touch_base_multiplier
    }

    pub fn clamp_speed(&self, speed: f32) -> f32 {
        speed.clamp(-self.max_speed, self.max_speed)
    }

    /// Every tunable as `(camelCase name, value)`, for validation messages
    fn numeric_fields(&self) -> [(&'static str, f64); 16] {
        [
            ("baseSpeed", self.base_speed as f64),
            ("hoverMultiplier", self.hover_multiplier as f64),
            ("moveMultiplier", self.move_multiplier as f64),
            ("touchBaseMultiplier", self.touch_base_multiplier as f64),
            ("maxSpeed", self.max_speed as f64),
            ("touchSensitivity", self.touch_sensitivity as f64),
            ("deadZonePixels", self.dead_zone_pixels as f64),
            ("velocityDecay", self.velocity_decay as f64),
            ("returnEasing", self.return_easing as f64),
            ("pointerMoveThreshold", self.pointer_move_threshold as f64),
            ("horizontalDominance", self.horizontal_dominance as f64),
            ("minSampleIntervalMs", self.min_sample_interval_ms),
            ("touchVelocityGain", self.touch_velocity_gain as f64),
            ("touchBoostLimit", self.touch_boost_limit as f64),
            ("fastThreshold", self.fast_threshold as f64),
            ("mediumThreshold", self.medium_threshold as f64),
        ]
    }

    /// Reject values that would make a speed NaN, panic a clamp or stall
    /// the easing.
    pub fn validate(&self) -> SiteResult<()> {
        fn invalid(message: String) -> SiteResult<()> {
            Err(SiteError::InvalidConfig(message))
        }

        if let Some((name, value)) = self
            .numeric_fields()
            .into_iter()
            .find(|(_, value)| !value.is_finite())
        {
            return invalid(format!("{name} must be finite, got {value}"));
        }
        if self.velocity_weights.iter().any(|w| !w.is_finite()) {
            return invalid(format!("velocityWeights must be finite, got {:?}", self.velocity_weights));
        }

        if self.max_speed <= 0.0 {
            return invalid(format!("maxSpeed must be positive, got {}", self.max_speed));
        }
        if self.base_speed <= 0.0 {
            return invalid(format!("baseSpeed must be positive, got {}", self.base_speed));
        }
        if !(0.0..=1.0).contains(&self.velocity_decay) {
            return invalid(format!("velocityDecay must be within [0, 1], got {}", self.velocity_decay));
        }
        if !(self.return_easing > 0.0 && self.return_easing <= 1.0) {
            return invalid(format!("returnEasing must be within (0, 1], got {}", self.return_easing));
        }
        if self.touch_boost_limit < 0.0 {
            return invalid(format!("touchBoostLimit must not be negative, got {}", self.touch_boost_limit));
        }
        if self.dead_zone_pixels < 0.0 {
            return invalid(format!("deadZonePixels must not be negative, got {}", self.dead_zone_pixels));
        }
        if self.min_sample_interval_ms <= 0.0 {
            return invalid(format!(
                "minSampleIntervalMs must be positive, got {}",
                self.min_sample_interval_ms
            ));
        }
        if !(0.0 <= self.medium_threshold && self.medium_threshold <= self.fast_threshold) {
            return invalid(format!(
                "thresholds must satisfy 0 <= medium <= fast, got {} and {}",
                self.medium_threshold, self.fast_threshold
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_speeds() {
        let config = RotationConfig::default();
        assert_eq!(config.hover_speed(), 2.0);
        assert_eq!(config.move_speed(), 3.0);
        assert!((config.touch_speed() - 1.8).abs() < 1e-6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clamp_speed() {
        let config = RotationConfig::default();
        assert_eq!(config.clamp_speed(9.0), 4.0);
        assert_eq!(config.clamp_speed(-9.0), -4.0);
        assert_eq!(config.clamp_speed(1.5), 1.5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = RotationConfig { max_speed: 0.0, ..Default::default() };
        assert!(matches!(config.validate(), Err(SiteError::InvalidConfig(_))));

        let config = RotationConfig { return_easing: 0.0, ..Default::default() };
        assert!(config.validate().is_err(), "zero easing never returns to rest");

        let config = RotationConfig { velocity_decay: 1.5, ..Default::default() };
        assert!(config.validate().is_err(), "decay above one grows velocity");
    }

    #[test]
    fn test_validate_rejects_non_finite_fields() {
        let nan = [
            RotationConfig { hover_multiplier: f32::NAN, ..Default::default() },
            RotationConfig { move_multiplier: f32::NAN, ..Default::default() },
            RotationConfig { touch_base_multiplier: f32::NAN, ..Default::default() },
            RotationConfig { touch_sensitivity: f32::NAN, ..Default::default() },
            RotationConfig { touch_velocity_gain: f32::INFINITY, ..Default::default() },
            RotationConfig { touch_boost_limit: f32::NAN, ..Default::default() },
            RotationConfig { velocity_decay: f32::NAN, ..Default::default() },
            RotationConfig { return_easing: f32::NAN, ..Default::default() },
            RotationConfig { min_sample_interval_ms: f64::NAN, ..Default::default() },
            RotationConfig { velocity_weights: [0.2, f32::NAN, 0.5], ..Default::default() },
            RotationConfig { fast_threshold: f32::NAN, ..Default::default() },
        ];
        for config in nan {
            assert!(
                matches!(config.validate(), Err(SiteError::InvalidConfig(_))),
                "non-finite value accepted: {config:?}"
            );
        }
    }

    #[test]
    fn test_validate_rejects_out_of_range_limits() {
        let config = RotationConfig { touch_boost_limit: -1.0, ..Default::default() };
        assert!(config.validate().is_err(), "negative boost limit inverts the clamp");

        let config = RotationConfig { dead_zone_pixels: -0.5, ..Default::default() };
        assert!(config.validate().is_err(), "negative dead zone");

        let config = RotationConfig { min_sample_interval_ms: 0.0, ..Default::default() };
        assert!(config.validate().is_err(), "zero sample interval divides by zero");

        let config = RotationConfig { medium_threshold: -0.1, ..Default::default() };
        assert!(config.validate().is_err(), "negative medium threshold");

        let config = RotationConfig { medium_threshold: 0.7, fast_threshold: 0.6, ..Default::default() };
        assert!(config.validate().is_err(), "medium above fast");

        // Zero boost limit and equal thresholds are still usable
        let config = RotationConfig {
            touch_boost_limit: 0.0,
            medium_threshold: 0.5,
            fast_threshold: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
