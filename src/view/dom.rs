use crate::model::{RotationFrame, SpinDirection, SpinIntensity};

/// Styling hooks for the page stylesheet
pub const INTENSITY_CLASSES: [&str; 3] = ["spin-idle", "spin-medium", "spin-fast"];
pub const DIRECTION_CLASSES: [&str; 2] = ["spin-forward", "spin-reverse"];

pub fn intensity_class(intensity: SpinIntensity) -> &'static str {
    match intensity {
        SpinIntensity::Idle => INTENSITY_CLASSES[0],
        SpinIntensity::Medium => INTENSITY_CLASSES[1],
        SpinIntensity::Fast => INTENSITY_CLASSES[2],
    }
}

pub fn direction_class(direction: SpinDirection) -> &'static str {
    match direction {
        SpinDirection::Forward => DIRECTION_CLASSES[0],
        SpinDirection::Reverse => DIRECTION_CLASSES[1],
    }
}

/// Every hook class with whether `frame` wants it set
pub fn class_states(frame: &RotationFrame) -> impl Iterator<Item = (&'static str, bool)> {
    let intensity = intensity_class(frame.feedback.intensity);
    let direction = direction_class(frame.feedback.direction);
    INTENSITY_CLASSES
        .into_iter()
        .map(move |c| (c, c == intensity))
        .chain(DIRECTION_CLASSES.into_iter().map(move |c| (c, c == direction)))
}

#[cfg(target_arch = "wasm32")]
pub use self::wasm::DomPresenter;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::collections::BTreeMap;

    use wasm_bindgen::JsValue;
    use web_sys::HtmlElement;

    use super::*;
    use crate::controller::highlight::ACTIVE_TOUCH_CLASS;
    use crate::controller::SpinPresenter;
    use crate::model::ElementId;

    /// Writes spin frames onto the tracked elements
    pub struct DomPresenter {
        elements: BTreeMap<ElementId, HtmlElement>,
        last: BTreeMap<ElementId, RotationFrame>,
    }

    impl DomPresenter {
        pub fn new(elements: BTreeMap<ElementId, HtmlElement>) -> Self {
            Self { elements, last: BTreeMap::new() }
        }

        pub fn element(&self, id: ElementId) -> Option<&HtmlElement> {
            self.elements.get(&id)
        }

        fn apply(el: &HtmlElement, frame: &RotationFrame, previous: Option<&RotationFrame>) -> Result<(), JsValue> {
            el.style().set_property("transform", &frame.css_transform())?;

            // Class list only changes when the bucket does
            if previous.map(|p| p.feedback) != Some(frame.feedback) {
                let classes = el.class_list();
                for (class, on) in class_states(frame) {
                    classes.toggle_with_force(class, on)?;
                }
            }
            Ok(())
        }
    }

    impl SpinPresenter for DomPresenter {
        fn present(&mut self, id: ElementId, frame: &RotationFrame) {
            let Some(el) = self.elements.get(&id) else { return };
            if let Err(e) = Self::apply(el, frame, self.last.get(&id)) {
                tracing::warn!(element = id.0, error = ?e, "failed to apply spin frame");
                return;
            }
            self.last.insert(id, *frame);
        }

        fn set_highlight(&mut self, id: ElementId, active: bool) {
            let Some(el) = self.elements.get(&id) else { return };
            if let Err(e) = el.class_list().toggle_with_force(ACTIVE_TOUCH_CLASS, active) {
                tracing::warn!(element = id.0, error = ?e, "failed to toggle touch highlight");
            }
        }

        fn release(&mut self, id: ElementId) {
            self.last.remove(&id);
            let Some(el) = self.elements.remove(&id) else { return };
            let classes = el.class_list();
            for class in INTENSITY_CLASSES.iter().chain(DIRECTION_CLASSES.iter()) {
                let _ = classes.remove_1(class);
            }
            let _ = classes.remove_1(ACTIVE_TOUCH_CLASS);
            let _ = el.style().remove_property("transform");
        }
    }
}
