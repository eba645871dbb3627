use std::collections::BTreeMap;

use super::frame_loop::FrameClock;
use super::highlight::TouchHighlight;
use super::input::SpinInput;
use super::rotation_controller::RotationController;
use crate::model::{ElementId, RotationFrame};

/// Where spin output goes: the DOM in the browser, a recorder in tests
pub trait SpinPresenter {
    fn present(&mut self, id: ElementId, frame: &RotationFrame);
    fn set_highlight(&mut self, id: ElementId, active: bool);
    /// Element is no longer tracked; drop any styling hooks
    fn release(&mut self, id: ElementId);
}

/// Controller, touch highlights and presenter driven as one unit
pub struct SpinSession<P: SpinPresenter> {
    controller: RotationController,
    highlights: BTreeMap<ElementId, TouchHighlight>,
    presenter: P,
    clock: FrameClock,
}

impl<P: SpinPresenter> SpinSession<P> {
    pub fn new(controller: RotationController, presenter: P) -> Self {
        let highlights = controller
            .elements()
            .map(|id| (id, TouchHighlight::default()))
            .collect();
        Self {
            controller,
            highlights,
            presenter,
            clock: FrameClock::default(),
        }
    }

    pub fn controller(&self) -> &RotationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut RotationController {
        &mut self.controller
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn is_highlighted(&self, id: ElementId) -> bool {
        self.highlights.get(&id).is_some_and(TouchHighlight::is_active)
    }

    /// Feed one input to the controller and update the touch highlight
    pub fn handle(&mut self, id: ElementId, input: &SpinInput) {
        if !self.controller.is_registered(id) {
            return;
        }
        self.controller.apply(id, input);

        let Some(highlight) = self.highlights.get_mut(&id) else { return };
        match input {
            SpinInput::TouchStart { .. } => {
                highlight.press();
                self.presenter.set_highlight(id, true);
            }
            SpinInput::TouchEnd => highlight.release(),
            _ => {}
        }
    }

    /// Click on a device without touch support flashes the highlight
    pub fn click(&mut self, id: ElementId) {
        let Some(highlight) = self.highlights.get_mut(&id) else { return };
        highlight.flash();
        self.presenter.set_highlight(id, true);
    }

    /// One animation frame at absolute time `now_ms`
    pub fn frame(&mut self, now_ms: f64) {
        let delta_ms = self.clock.delta(now_ms);

        let presenter = &mut self.presenter;
        self.controller
            .tick_all(delta_ms, |id, frame| presenter.present(id, &frame));

        for (id, highlight) in self.highlights.iter_mut() {
            if highlight.advance(delta_ms) {
                presenter.set_highlight(*id, false);
            }
        }
    }

    /// Stop tracking every element
    pub fn teardown(&mut self) {
        let ids: Vec<ElementId> = self.controller.elements().collect();
        for id in ids {
            self.controller.unregister(id);
            self.presenter.release(id);
        }
        self.highlights.clear();
        self.clock.reset();
        tracing::info!("spin session torn down");
    }
}
