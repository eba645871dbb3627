//! Headless replay of a scripted logo interaction.
//!
//! Drives the spin controller the way the browser would (inputs between
//! 16ms frames) and logs each frame, which makes tuning changes easy to
//! compare without a page. `RUST_LOG=debug` also shows state transitions.

use glam::Vec2;

use coldforce_site::{
    logging,
    controller::{InputSource, SpinPresenter, SpinSession},
    model::{ElementId, RotationFrame, SpinIntensity},
    RotationConfig, RotationController, SpinInput, SpinTransition,
};

const FRAME_MS: f64 = 16.0;
const LOGO: ElementId = ElementId(0);

/// Logs frames whenever the visual bucket changes, plus a periodic sample
struct LogPresenter {
    frame: u64,
    last_intensity: Option<SpinIntensity>,
}

impl SpinPresenter for LogPresenter {
    fn present(&mut self, id: ElementId, frame: &RotationFrame) {
        self.frame += 1;
        let changed = self.last_intensity != Some(frame.feedback.intensity);
        if changed || self.frame % 30 == 0 {
            tracing::info!(
                element = id.0,
                frame = self.frame,
                transform = %frame.css_transform(),
                intensity = ?frame.feedback.intensity,
                direction = ?frame.feedback.direction
            );
        }
        self.last_intensity = Some(frame.feedback.intensity);
    }

    fn set_highlight(&mut self, id: ElementId, active: bool) {
        tracing::info!(element = id.0, active, "touch highlight");
    }

    fn release(&mut self, id: ElementId) {
        tracing::info!(element = id.0, "released");
    }
}

/// (frames to run before the input, input)
fn script() -> Vec<(u32, SpinInput)> {
    let at = |x: f32, y: f32| Vec2::new(x, y);
    let mut steps = vec![
        (30, SpinInput::PointerEnter { position: at(200.0, 120.0) }),
        (10, SpinInput::PointerMove { position: at(230.0, 120.0) }),
        (10, SpinInput::PointerMove { position: at(260.0, 121.0) }),
        (20, SpinInput::PointerMove { position: at(210.0, 122.0) }),
        (20, SpinInput::PointerLeave),
    ];

    // A fast leftward swipe, then a vertical drag that bleeds velocity off
    let mut t = 4000.0;
    steps.push((90, SpinInput::TouchStart { position: at(300.0, 300.0), timestamp_ms: t }));
    for i in 1..=6 {
        t += FRAME_MS;
        let x = 300.0 - 45.0 * i as f32;
        steps.push((1, SpinInput::TouchMove { position: at(x, 300.0), timestamp_ms: t }));
    }
    for i in 1..=6 {
        t += FRAME_MS;
        let y = 300.0 + 30.0 * i as f32;
        steps.push((1, SpinInput::TouchMove { position: at(30.0, y), timestamp_ms: t }));
    }
    steps.push((10, SpinInput::TouchEnd));
    steps
}

fn main() {
    logging::init();

    let config = RotationConfig::default();
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "refusing to replay");
        std::process::exit(1);
    }

    let mut controller = RotationController::init([LOGO], config);
    controller.set_observer(Box::new(|id: ElementId, transition: &SpinTransition| match transition {
        SpinTransition::ControlGained(source) | SpinTransition::ControlReleased(source) => {
            let device = match source {
                InputSource::Pointer => "pointer",
                InputSource::Touch => "touch",
            };
            tracing::info!(element = id.0, device, ?transition, "control");
        }
        _ => tracing::debug!(element = id.0, ?transition),
    }));

    let presenter = LogPresenter { frame: 0, last_intensity: None };
    let mut session = SpinSession::new(controller, presenter);

    let mut now = 0.0;
    for (frames, input) in script() {
        for _ in 0..frames {
            session.frame(now);
            now += FRAME_MS;
        }
        session.handle(LOGO, &input);
    }

    // Let the spin settle back to rest
    for _ in 0..150 {
        session.frame(now);
        now += FRAME_MS;
    }

    if let Some(state) = session.controller().state(LOGO) {
        tracing::info!(
            angle = state.current_angle,
            speed = state.current_speed,
            target = state.target_speed,
            "replay finished"
        );
    }
    session.teardown();
}
