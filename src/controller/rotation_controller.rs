//! Spin state machine for the hero logo.
//!
//! Pointer and touch handlers only move `target_speed`; the per-frame tick
//! moves `current_speed` toward it (instantly while controlled, eased
//! otherwise) and advances the angle by a fixed amount per tick.

use std::collections::BTreeMap;

use glam::Vec2;

use super::input::{InputSource, SpinInput};
use crate::model::rotation::normalize_angle;
use crate::model::{ElementId, RotationConfig, RotationFrame, RotationState, SpinFeedback};

/// State changes reported to an observer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinTransition {
    Registered,
    Unregistered,
    ControlGained(InputSource),
    ControlReleased(InputSource),
    TargetChanged { from: f32, to: f32 },
    FeedbackChanged { from: SpinFeedback, to: SpinFeedback },
}

pub type SpinObserver = Box<dyn FnMut(ElementId, &SpinTransition)>;

/// Owns one `RotationState` per registered element
pub struct RotationController {
    config: RotationConfig,
    states: BTreeMap<ElementId, RotationState>,
    observer: Option<SpinObserver>,
}

impl RotationController {
    pub fn new(config: RotationConfig) -> Self {
        Self {
            config,
            states: BTreeMap::new(),
            observer: None,
        }
    }

    /// Build a controller with every element already registered
    pub fn init(elements: impl IntoIterator<Item = ElementId>, config: RotationConfig) -> Self {
        let mut controller = Self::new(config);
        for id in elements {
            controller.register(id);
        }
        controller
    }

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    pub fn set_observer(&mut self, observer: SpinObserver) {
        self.observer = Some(observer);
    }

    pub fn state(&self, id: ElementId) -> Option<&RotationState> {
        self.states.get(&id)
    }

    pub fn is_registered(&self, id: ElementId) -> bool {
        self.states.contains_key(&id)
    }

    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.states.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Start tracking `id`, replacing any previous state
    pub fn register(&mut self, id: ElementId) {
        self.states.insert(id, RotationState::new(&self.config));
        tracing::debug!(element = id.0, "spin element registered");
        self.notify(id, SpinTransition::Registered);
    }

    pub fn unregister(&mut self, id: ElementId) {
        if self.states.remove(&id).is_some() {
            tracing::debug!(element = id.0, "spin element unregistered");
            self.notify(id, SpinTransition::Unregistered);
        }
    }

    /// Route a platform-independent input to its handler
    pub fn apply(&mut self, id: ElementId, input: &SpinInput) {
        match *input {
            SpinInput::PointerEnter { position } => self.on_pointer_enter(id, position),
            SpinInput::PointerMove { position } => self.on_pointer_move(id, position),
            SpinInput::PointerLeave => self.on_pointer_leave(id),
            SpinInput::TouchStart { position, timestamp_ms } => {
                self.on_touch_start(id, position, timestamp_ms)
            }
            SpinInput::TouchMove { position, timestamp_ms } => {
                self.on_touch_move(id, position, timestamp_ms)
            }
            SpinInput::TouchEnd => self.on_touch_end(id),
        }
    }

    pub fn on_pointer_enter(&mut self, id: ElementId, position: Vec2) {
        let hover = self.config.hover_speed();
        let Some(state) = self.states.get_mut(&id) else { return };
        state.is_controlled = true;
        state.last_pointer = position;
        let from = std::mem::replace(&mut state.target_speed, hover);

        self.notify(id, SpinTransition::ControlGained(InputSource::Pointer));
        self.notify_target(id, from, hover);
    }

    pub fn on_pointer_move(&mut self, id: ElementId, position: Vec2) {
        let config = &self.config;
        let Some(state) = self.states.get_mut(&id) else { return };
        if !state.is_controlled {
            return;
        }

        let delta_x = position.x - state.last_pointer.x;
        let target = if delta_x.abs() > config.pointer_move_threshold {
            delta_x.signum() * config.move_speed()
        } else {
            config.hover_speed()
        };
        state.last_pointer = position;
        let from = std::mem::replace(&mut state.target_speed, target);

        self.notify_target(id, from, target);
    }

    /// Release pointer control, keeping the current spin direction
    pub fn on_pointer_leave(&mut self, id: ElementId) {
        let base = self.config.base_speed;
        let Some(state) = self.states.get_mut(&id) else { return };
        state.is_controlled = false;
        let target = if state.current_speed < 0.0 { -base } else { base };
        let from = std::mem::replace(&mut state.target_speed, target);

        self.notify(id, SpinTransition::ControlReleased(InputSource::Pointer));
        self.notify_target(id, from, target);
    }

    pub fn on_touch_start(&mut self, id: ElementId, position: Vec2, timestamp_ms: f64) {
        let touch = self.config.touch_speed();
        let Some(state) = self.states.get_mut(&id) else { return };
        state.is_controlled = true;
        state.velocity_history.clear();
        state.touch_velocity = 0.0;
        state.last_pointer = position;
        state.last_sample_ms = timestamp_ms;
        let from = std::mem::replace(&mut state.target_speed, touch);

        self.notify(id, SpinTransition::ControlGained(InputSource::Touch));
        self.notify_target(id, from, touch);
    }

    pub fn on_touch_move(&mut self, id: ElementId, position: Vec2, timestamp_ms: f64) {
        let config = &self.config;
        let Some(state) = self.states.get_mut(&id) else { return };
        if !state.is_controlled {
            return;
        }

        let delta = position - state.last_pointer;
        let elapsed = (timestamp_ms - state.last_sample_ms).max(config.min_sample_interval_ms) as f32;

        let horizontal = delta.x.abs() > config.dead_zone_pixels
            && delta.x.abs() > config.horizontal_dominance * delta.y.abs();
        if horizontal {
            let raw_velocity = (delta.x / elapsed) * config.touch_sensitivity;
            state.velocity_history.push(raw_velocity);
            state.touch_velocity = state.velocity_history.weighted_average(&config.velocity_weights);
        } else {
            // Vertical scroll or jitter: bleed off horizontal velocity
            state.touch_velocity *= config.velocity_decay;
        }

        let boost = (state.touch_velocity * config.touch_velocity_gain)
            .clamp(-config.touch_boost_limit, config.touch_boost_limit);
        let target = config.clamp_speed(config.touch_speed() + boost);

        state.last_pointer = position;
        state.last_sample_ms = timestamp_ms;
        let from = std::mem::replace(&mut state.target_speed, target);

        self.notify_target(id, from, target);
    }

    /// Release touch control; always returns to the default forward spin
    pub fn on_touch_end(&mut self, id: ElementId) {
        let base = self.config.base_speed;
        let Some(state) = self.states.get_mut(&id) else { return };
        state.is_controlled = false;
        state.touch_velocity = 0.0;
        state.velocity_history.clear();
        let from = std::mem::replace(&mut state.target_speed, base);

        self.notify(id, SpinTransition::ControlReleased(InputSource::Touch));
        self.notify_target(id, from, base);
    }

    /// Advance one frame. `delta_ms` is informational: the angle moves by a
    /// fixed amount per tick regardless of frame timing.
    pub fn tick(&mut self, id: ElementId, delta_ms: f64) -> Option<RotationFrame> {
        let config = &self.config;
        let state = self.states.get_mut(&id)?;

        if state.is_controlled {
            state.current_speed = state.target_speed;
        } else {
            state.current_speed += (state.target_speed - state.current_speed) * config.return_easing;
        }
        state.current_speed = config.clamp_speed(state.current_speed);
        state.current_angle = normalize_angle(state.current_angle + state.current_speed);

        let feedback = SpinFeedback::from_speed(state.current_speed, config);
        let previous = std::mem::replace(&mut state.feedback, feedback);
        let frame = state.frame();

        tracing::trace!(
            element = id.0,
            delta_ms,
            angle = frame.angle,
            speed = state.current_speed,
            "spin tick"
        );
        if previous != feedback {
            self.notify(id, SpinTransition::FeedbackChanged { from: previous, to: feedback });
        }
        Some(frame)
    }

    /// Tick every element in id order, handing each frame to `sink`
    pub fn tick_all(&mut self, delta_ms: f64, mut sink: impl FnMut(ElementId, RotationFrame)) {
        let ids: Vec<ElementId> = self.states.keys().copied().collect();
        for id in ids {
            if let Some(frame) = self.tick(id, delta_ms) {
                sink(id, frame);
            }
        }
    }

    fn notify_target(&mut self, id: ElementId, from: f32, to: f32) {
        if from != to {
            self.notify(id, SpinTransition::TargetChanged { from, to });
        }
    }

    fn notify(&mut self, id: ElementId, transition: SpinTransition) {
        tracing::debug!(element = id.0, ?transition, "spin transition");
        if let Some(observer) = self.observer.as_mut() {
            observer(id, &transition);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SpinDirection, SpinIntensity};
    use std::cell::RefCell;
    use std::rc::Rc;

    const E: ElementId = ElementId(1);

    fn controller() -> RotationController {
        RotationController::init([E], RotationConfig::default())
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_first_tick_at_rest() {
        let mut c = controller();
        let frame = c.tick(E, 16.0).unwrap();
        let state = c.state(E).unwrap();
        assert_eq!(state.current_angle, 1.0);
        assert_eq!(state.current_speed, 1.0);
        assert_eq!(frame.angle, 1.0);
        assert_eq!(frame.feedback.intensity, SpinIntensity::Idle);
        assert_eq!(frame.feedback.direction, SpinDirection::Forward);
    }

    #[test]
    fn test_tick_at_rest_is_steady() {
        let mut c = controller();
        for n in 1..=5 {
            c.tick(E, 16.0);
            let state = c.state(E).unwrap();
            assert_eq!(state.current_speed, 1.0);
            assert_eq!(state.current_angle, n as f32);
        }
    }

    #[test]
    fn test_pointer_enter_snaps_to_hover() {
        let mut c = controller();
        c.on_pointer_enter(E, Vec2::new(100.0, 50.0));
        let state = c.state(E).unwrap();
        assert!(state.is_controlled);
        assert_eq!(state.target_speed, 2.0);

        let frame = c.tick(E, 16.0).unwrap();
        assert_eq!(c.state(E).unwrap().current_speed, 2.0);
        assert_eq!(frame.feedback.intensity, SpinIntensity::Medium);
    }

    #[test]
    fn test_pointer_move_sets_direction() {
        let mut c = controller();
        c.on_pointer_enter(E, Vec2::new(100.0, 50.0));

        c.on_pointer_move(E, Vec2::new(110.0, 50.0));
        assert_eq!(c.state(E).unwrap().target_speed, 3.0);

        c.on_pointer_move(E, Vec2::new(100.0, 50.0));
        assert_eq!(c.state(E).unwrap().target_speed, -3.0);

        // Sub-threshold movement falls back to hover speed
        c.on_pointer_move(E, Vec2::new(100.3, 80.0));
        assert_eq!(c.state(E).unwrap().target_speed, 2.0);
        assert_eq!(c.state(E).unwrap().last_pointer, Vec2::new(100.3, 80.0));
    }

    #[test]
    fn test_pointer_move_ignored_when_uncontrolled() {
        let mut c = controller();
        c.on_pointer_move(E, Vec2::new(500.0, 0.0));
        let state = c.state(E).unwrap();
        assert_eq!(state.target_speed, 1.0);
        assert_eq!(state.last_pointer, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_leave_preserves_momentum() {
        let mut c = controller();
        c.on_pointer_enter(E, Vec2::ZERO);
        c.on_pointer_move(E, Vec2::new(10.0, 0.0));
        c.tick(E, 16.0);
        assert_eq!(c.state(E).unwrap().current_speed, 3.0);

        c.on_pointer_leave(E);
        let state = c.state(E).unwrap();
        assert!(!state.is_controlled);
        assert_eq!(state.target_speed, 1.0);

        // Eases 10% of the gap per tick, never snapping
        c.tick(E, 16.0);
        assert!(close(c.state(E).unwrap().current_speed, 2.8));
        c.tick(E, 16.0);
        assert!(close(c.state(E).unwrap().current_speed, 2.62));
    }

    #[test]
    fn test_pointer_leave_keeps_reverse_direction() {
        let mut c = controller();
        c.on_pointer_enter(E, Vec2::new(50.0, 0.0));
        c.on_pointer_move(E, Vec2::new(40.0, 0.0));
        c.tick(E, 16.0);
        assert_eq!(c.state(E).unwrap().current_speed, -3.0);

        c.on_pointer_leave(E);
        assert_eq!(c.state(E).unwrap().target_speed, -1.0);
        let frame = c.tick(E, 16.0).unwrap();
        assert_eq!(frame.feedback.direction, SpinDirection::Reverse);
    }

    #[test]
    fn test_pointer_leave_at_rest_defaults_forward() {
        // Touch base equal to the boost limit lets a leftward swipe stop the spin
        let config = RotationConfig {
            touch_base_multiplier: 2.5,
            touch_boost_limit: 2.5,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        let mut c = RotationController::init([E], config);

        c.on_touch_start(E, Vec2::new(600.0, 0.0), 0.0);
        c.on_touch_move(E, Vec2::new(300.0, 0.0), 16.0);
        c.on_touch_move(E, Vec2::ZERO, 32.0);
        assert_eq!(c.state(E).unwrap().target_speed, 0.0);
        c.tick(E, 16.0);
        assert_eq!(c.state(E).unwrap().current_speed, 0.0);

        c.on_pointer_enter(E, Vec2::new(10.0, 10.0));
        c.on_pointer_leave(E);
        let state = c.state(E).unwrap();
        assert!(!state.is_controlled);
        assert_eq!(state.target_speed, 1.0, "zero speed releases to +baseSpeed");
    }

    #[test]
    fn test_touch_start_resets_history() {
        let mut c = controller();
        c.on_touch_start(E, Vec2::new(100.0, 100.0), 0.0);
        c.on_touch_move(E, Vec2::new(140.0, 100.0), 20.0);
        c.on_touch_start(E, Vec2::new(100.0, 100.0), 100.0);

        let state = c.state(E).unwrap();
        assert!(state.is_controlled);
        assert_eq!(state.velocity_history.samples(), &[0.0, 0.0, 0.0]);
        assert_eq!(state.touch_velocity, 0.0);
        assert!(close(state.target_speed, 1.8));
    }

    #[test]
    fn test_touch_swipe_adds_weighted_velocity() {
        let mut c = controller();
        c.on_touch_start(E, Vec2::new(100.0, 100.0), 0.0);

        // 20px in 20ms: raw 0.05, weighted 0.025, boost 0.1
        c.on_touch_move(E, Vec2::new(120.0, 100.0), 20.0);
        let state = c.state(E).unwrap();
        assert!(close(state.touch_velocity, 0.025));
        assert!(close(state.target_speed, 1.9));

        // Vertical movement decays the stored velocity
        c.on_touch_move(E, Vec2::new(120.0, 140.0), 40.0);
        let state = c.state(E).unwrap();
        assert!(close(state.touch_velocity, 0.0205));
        assert!(close(state.target_speed, 1.882));
    }

    #[test]
    fn test_touch_dead_zone_and_elapsed_floor() {
        let mut c = controller();
        c.on_touch_start(E, Vec2::new(100.0, 100.0), 0.0);

        // Within the dead zone: treated like vertical movement
        c.on_touch_move(E, Vec2::new(102.0, 100.0), 20.0);
        assert_eq!(c.state(E).unwrap().velocity_history.samples(), &[0.0, 0.0, 0.0]);

        // Same timestamp: elapsed floors to 16ms
        c.on_touch_move(E, Vec2::new(118.0, 100.0), 20.0);
        let samples = *c.state(E).unwrap().velocity_history.samples();
        assert!(close(samples[2], 16.0 / 16.0 * 0.05));
    }

    #[test]
    fn test_touch_speed_is_clamped() {
        let mut c = controller();
        c.on_touch_start(E, Vec2::ZERO, 0.0);
        c.on_touch_move(E, Vec2::new(300.0, 0.0), 16.0);
        assert!(close(c.state(E).unwrap().target_speed, 1.8 + 1.875));

        c.on_touch_move(E, Vec2::new(600.0, 0.0), 32.0);
        assert_eq!(c.state(E).unwrap().target_speed, 4.0);

        let mut c = controller();
        c.on_touch_start(E, Vec2::new(600.0, 0.0), 0.0);
        c.on_touch_move(E, Vec2::new(300.0, 0.0), 16.0);
        c.on_touch_move(E, Vec2::ZERO, 32.0);
        // Leftward boost bottoms out at -2.5
        assert!(close(c.state(E).unwrap().target_speed, -0.7));
    }

    #[test]
    fn test_touch_end_always_forward() {
        let mut c = controller();
        c.on_touch_start(E, Vec2::new(600.0, 0.0), 0.0);
        c.on_touch_move(E, Vec2::new(300.0, 0.0), 16.0);
        c.on_touch_move(E, Vec2::ZERO, 32.0);
        c.tick(E, 16.0);
        assert!(c.state(E).unwrap().current_speed < 0.0);

        c.on_touch_end(E);
        let state = c.state(E).unwrap();
        assert!(!state.is_controlled);
        assert_eq!(state.target_speed, 1.0);
        assert_eq!(state.touch_velocity, 0.0);
        assert_eq!(state.velocity_history.samples(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_touch_move_ignored_when_uncontrolled() {
        let mut c = controller();
        c.on_touch_move(E, Vec2::new(300.0, 0.0), 16.0);
        assert_eq!(c.state(E).unwrap().target_speed, 1.0);
    }

    #[test]
    fn test_unknown_element_is_noop() {
        let mut c = controller();
        let ghost = ElementId(99);
        c.on_pointer_enter(ghost, Vec2::ZERO);
        c.on_pointer_move(ghost, Vec2::ONE);
        c.on_pointer_leave(ghost);
        c.on_touch_start(ghost, Vec2::ZERO, 0.0);
        c.on_touch_move(ghost, Vec2::ONE, 1.0);
        c.on_touch_end(ghost);
        c.unregister(ghost);
        assert!(c.tick(ghost, 16.0).is_none());
        assert!(!c.is_registered(ghost));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_reregister_matches_first_registration() {
        let mut c = controller();
        let fresh = c.state(E).unwrap().clone();

        c.on_touch_start(E, Vec2::new(10.0, 10.0), 5.0);
        c.on_touch_move(E, Vec2::new(90.0, 10.0), 30.0);
        for _ in 0..7 {
            c.tick(E, 16.0);
        }
        c.unregister(E);
        assert!(c.state(E).is_none());

        c.register(E);
        assert_eq!(c.state(E).unwrap(), &fresh);
    }

    #[test]
    fn test_invariants_hold_over_mixed_input() {
        let mut c = controller();
        let script = [
            SpinInput::PointerEnter { position: Vec2::new(0.0, 0.0) },
            SpinInput::PointerMove { position: Vec2::new(-40.0, 3.0) },
            SpinInput::PointerMove { position: Vec2::new(-90.0, 3.0) },
            SpinInput::PointerLeave,
            SpinInput::TouchStart { position: Vec2::new(500.0, 0.0), timestamp_ms: 100.0 },
            SpinInput::TouchMove { position: Vec2::new(0.0, 0.0), timestamp_ms: 101.0 },
            SpinInput::TouchMove { position: Vec2::new(-900.0, 5.0), timestamp_ms: 102.0 },
            SpinInput::TouchMove { position: Vec2::new(-900.0, 400.0), timestamp_ms: 180.0 },
            SpinInput::TouchEnd,
        ];
        for input in &script {
            c.apply(E, input);
            for _ in 0..40 {
                c.tick(E, 16.0);
                let state = c.state(E).unwrap();
                assert!((0.0..360.0).contains(&state.current_angle));
                assert!(state.current_speed.abs() <= 4.0);
                assert!(state.target_speed.abs() <= 4.0);
            }
        }
    }

    #[test]
    fn test_tick_all_visits_every_element() {
        let mut c = RotationController::init([ElementId(3), ElementId(1), ElementId(2)], RotationConfig::default());
        c.on_pointer_enter(ElementId(2), Vec2::ZERO);

        let mut seen = Vec::new();
        c.tick_all(16.0, |id, frame| seen.push((id, frame.angle)));
        assert_eq!(
            seen,
            vec![(ElementId(1), 1.0), (ElementId(2), 2.0), (ElementId(3), 1.0)]
        );
    }

    #[test]
    fn test_observer_sees_transitions() {
        let mut c = controller();
        let log: Rc<RefCell<Vec<SpinTransition>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        c.set_observer(Box::new(move |_: ElementId, t: &SpinTransition| sink.borrow_mut().push(*t)));

        c.on_pointer_enter(E, Vec2::ZERO);
        c.tick(E, 16.0);
        c.on_pointer_leave(E);

        let log = log.borrow();
        assert_eq!(log[0], SpinTransition::ControlGained(InputSource::Pointer));
        assert_eq!(log[1], SpinTransition::TargetChanged { from: 1.0, to: 2.0 });
        assert!(matches!(log[2], SpinTransition::FeedbackChanged { .. }));
        assert_eq!(log[3], SpinTransition::ControlReleased(InputSource::Pointer));
        assert_eq!(log[4], SpinTransition::TargetChanged { from: 2.0, to: 1.0 });
    }
}
