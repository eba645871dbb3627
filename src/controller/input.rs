//! Platform-agnostic input for the spinning logo
use glam::Vec2;

/// Which kind of interaction owns an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Pointer,
    Touch,
}

/// Platform-independent spin input events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinInput {
    // Pointer events
    PointerEnter { position: Vec2 },
    PointerMove { position: Vec2 },
    PointerLeave,

    // Touch events, timestamps in milliseconds
    TouchStart { position: Vec2, timestamp_ms: f64 },
    TouchMove { position: Vec2, timestamp_ms: f64 },
    TouchEnd,
}

impl SpinInput {
    pub fn source(&self) -> InputSource {
        match self {
            SpinInput::PointerEnter { .. }
            | SpinInput::PointerMove { .. }
            | SpinInput::PointerLeave => InputSource::Pointer,
            SpinInput::TouchStart { .. }
            | SpinInput::TouchMove { .. }
            | SpinInput::TouchEnd => InputSource::Touch,
        }
    }
}

/// DOM event names the logo listens to
pub const SPIN_EVENTS: [&str; 7] = [
    "mouseenter",
    "mousemove",
    "mouseleave",
    "touchstart",
    "touchmove",
    "touchend",
    "touchcancel",
];

/// Events whose default action the logo cancels. Only these need a
/// non-passive listener; the rest leave page scrolling alone.
pub fn cancels_default(event: &str) -> bool {
    matches!(event, "touchstart" | "touchend" | "touchcancel")
}

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use super::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Event, MouseEvent, Touch, TouchEvent};

    fn mouse_position(e: &MouseEvent) -> Vec2 {
        Vec2::new(e.client_x() as f32, e.client_y() as f32)
    }

    fn first_changed_touch(e: &TouchEvent) -> Option<Touch> {
        e.changed_touches().item(0)
    }

    /// Convert a raw DOM event into a spin input, `None` for anything else
    pub fn event_to_input(e: &Event, timestamp_ms: f64) -> Option<SpinInput> {
        match e.type_().as_str() {
            "mouseenter" => {
                let e = e.dyn_ref::<MouseEvent>()?;
                Some(SpinInput::PointerEnter { position: mouse_position(e) })
            }
            "mousemove" => {
                let e = e.dyn_ref::<MouseEvent>()?;
                Some(SpinInput::PointerMove { position: mouse_position(e) })
            }
            "mouseleave" => Some(SpinInput::PointerLeave),
            "touchstart" => {
                let touch = first_changed_touch(e.dyn_ref::<TouchEvent>()?)?;
                Some(SpinInput::TouchStart {
                    position: Vec2::new(touch.client_x() as f32, touch.client_y() as f32),
                    timestamp_ms,
                })
            }
            "touchmove" => {
                let touch = first_changed_touch(e.dyn_ref::<TouchEvent>()?)?;
                Some(SpinInput::TouchMove {
                    position: Vec2::new(touch.client_x() as f32, touch.client_y() as f32),
                    timestamp_ms,
                })
            }
            "touchend" | "touchcancel" => Some(SpinInput::TouchEnd),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_source() {
        assert_eq!(SpinInput::PointerLeave.source(), InputSource::Pointer);
        assert_eq!(
            SpinInput::TouchMove { position: Vec2::ZERO, timestamp_ms: 0.0 }.source(),
            InputSource::Touch
        );
        assert_eq!(SpinInput::TouchEnd.source(), InputSource::Touch);
    }

    #[test]
    fn test_only_touch_boundaries_cancel_default() {
        let cancelling: Vec<&str> = SPIN_EVENTS.into_iter().filter(|e| cancels_default(e)).collect();
        assert_eq!(cancelling, vec!["touchstart", "touchend", "touchcancel"]);
        assert!(!cancels_default("touchmove"), "touchmove must stay passive so the page scrolls");
    }
}
