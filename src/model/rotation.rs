use glam::Vec2;

use super::RotationConfig;

/// Stable handle for a tracked element, assigned by the page layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

/// Number of raw touch velocities kept for smoothing
pub const VELOCITY_SAMPLES: usize = 3;

/// Most recent raw touch velocities, oldest first
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityHistory([f32; VELOCITY_SAMPLES]);

impl VelocityHistory {
    /// Append a sample, dropping the oldest
    pub fn push(&mut self, velocity: f32) {
        self.0.rotate_left(1);
        self.0[VELOCITY_SAMPLES - 1] = velocity;
    }

    pub fn clear(&mut self) {
        self.0 = [0.0; VELOCITY_SAMPLES];
    }

    pub fn weighted_average(&self, weights: &[f32; VELOCITY_SAMPLES]) -> f32 {
        self.0.iter().zip(weights).map(|(v, w)| v * w).sum()
    }

    pub fn samples(&self) -> &[f32; VELOCITY_SAMPLES] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinIntensity {
    #[default]
    Idle,
    Medium,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinDirection {
    #[default]
    Forward,
    Reverse,
}

/// Discrete visual feedback derived from the current speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpinFeedback {
    pub intensity: SpinIntensity,
    pub direction: SpinDirection,
}

impl SpinFeedback {
    pub fn from_speed(speed: f32, config: &RotationConfig) -> Self {
        let intensity = (speed.abs() / config.max_speed).clamp(0.0, 1.0);
        let intensity = if intensity > config.fast_threshold {
            SpinIntensity::Fast
        } else if intensity > config.medium_threshold {
            SpinIntensity::Medium
        } else {
            SpinIntensity::Idle
        };
        let direction = if speed > 0.0 {
            SpinDirection::Forward
        } else {
            SpinDirection::Reverse
        };
        Self { intensity, direction }
    }
}

/// What one tick hands to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationFrame {
    pub angle: f32,
    pub feedback: SpinFeedback,
}

impl RotationFrame {
    /// Angle rounded to one decimal, as applied to the element
    pub fn display_angle(&self) -> f32 {
        (self.angle * 10.0).round() / 10.0
    }

    pub fn css_transform(&self) -> String {
        format!("rotate({:.1}deg)", self.angle)
    }
}

/// Per-element spin state, owned by the controller
#[derive(Debug, Clone, PartialEq)]
pub struct RotationState {
    pub current_angle: f32,
    pub current_speed: f32,
    pub target_speed: f32,
    pub is_controlled: bool,
    pub velocity_history: VelocityHistory,
    pub touch_velocity: f32,
    pub last_pointer: Vec2,
    pub last_sample_ms: f64,
    pub feedback: SpinFeedback,
}

impl RotationState {
    pub fn new(config: &RotationConfig) -> Self {
        Self {
            current_angle: 0.0,
            current_speed: config.base_speed,
            target_speed: config.base_speed,
            is_controlled: false,
            velocity_history: VelocityHistory::default(),
            touch_velocity: 0.0,
            last_pointer: Vec2::ZERO,
            last_sample_ms: 0.0,
            feedback: SpinFeedback::from_speed(config.base_speed, config),
        }
    }

    pub fn frame(&self) -> RotationFrame {
        RotationFrame {
            angle: self.current_angle,
            feedback: self.feedback,
        }
    }
}

/// Wrap an angle into [0, 360)
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_drops_oldest() {
        let mut history = VelocityHistory::default();
        history.push(1.0);
        history.push(2.0);
        history.push(3.0);
        history.push(4.0);
        assert_eq!(history.samples(), &[2.0, 3.0, 4.0]);

        history.clear();
        assert_eq!(history.samples(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_weighted_average_favours_newest() {
        let mut history = VelocityHistory::default();
        history.push(1.0);
        let avg = history.weighted_average(&[0.2, 0.3, 0.5]);
        assert!((avg - 0.5).abs() < 1e-6);

        history.push(0.0);
        let avg = history.weighted_average(&[0.2, 0.3, 0.5]);
        assert!((avg - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_feedback_buckets() {
        let config = RotationConfig::default();
        let idle = SpinFeedback::from_speed(1.0, &config);
        assert_eq!(idle.intensity, SpinIntensity::Idle);
        assert_eq!(idle.direction, SpinDirection::Forward);

        let medium = SpinFeedback::from_speed(-2.0, &config);
        assert_eq!(medium.intensity, SpinIntensity::Medium);
        assert_eq!(medium.direction, SpinDirection::Reverse);

        let fast = SpinFeedback::from_speed(3.0, &config);
        assert_eq!(fast.intensity, SpinIntensity::Fast);

        // Stopped counts as reverse: only positive speed is forward
        assert_eq!(SpinFeedback::from_speed(0.0, &config).direction, SpinDirection::Reverse);
    }

    #[test]
    fn test_normalize_angle() {
        assert_eq!(normalize_angle(361.0), 1.0);
        assert_eq!(normalize_angle(-1.0), 359.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        let tiny = normalize_angle(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_css_transform_one_decimal() {
        let frame = RotationFrame { angle: 12.345, feedback: SpinFeedback::default() };
        assert_eq!(frame.css_transform(), "rotate(12.3deg)");
        assert!((frame.display_angle() - 12.3).abs() < 1e-4);
    }
}
