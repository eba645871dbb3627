use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Document, Event, HtmlElement, Window};

use super::dom::DomPresenter;
use crate::controller::input::{self, SPIN_EVENTS};
use crate::controller::{AnimationLoop, RotationController, SpinSession};
use crate::error::{SiteError, SiteResult};
use crate::model::{ElementId, RotationConfig};

type Listener = (HtmlElement, &'static str, Closure<dyn FnMut(Event)>);

/// Spinning logos bound to the page; dropping it stops the animation
pub struct LogoBinding {
    session: Rc<RefCell<SpinSession<DomPresenter>>>,
    animation: AnimationLoop,
    listeners: Vec<Listener>,
}

impl LogoBinding {
    /// Register every element matching `selector` and start spinning
    pub fn mount(
        window: &Window,
        document: &Document,
        selector: &str,
        config: RotationConfig,
    ) -> SiteResult<Self> {
        config.validate()?;

        let list = document.query_selector_all(selector)?;
        let elements: BTreeMap<ElementId, HtmlElement> = (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .enumerate()
            .map(|(i, el)| (ElementId(i as u32), el))
            .collect();
        if elements.is_empty() {
            return Err(SiteError::MissingElement(selector.to_string()));
        }

        let controller = RotationController::init(elements.keys().copied(), config);
        let session = Rc::new(RefCell::new(SpinSession::new(
            controller,
            DomPresenter::new(elements.clone()),
        )));

        // Desktop click fallback only where touch events don't exist
        let touch_capable = Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false);

        let mut listeners = Vec::new();
        if let Err(e) = attach_listeners(window, &session, &elements, touch_capable, &mut listeners) {
            detach_listeners(&mut listeners);
            return Err(e);
        }

        let frame_session = session.clone();
        let animation = AnimationLoop::new(window.clone(), move |timestamp| {
            frame_session.borrow_mut().frame(timestamp);
        });
        if let Err(e) = animation.start() {
            detach_listeners(&mut listeners);
            return Err(e.into());
        }

        tracing::info!(selector, count = elements.len(), "logo spin mounted");
        Ok(Self { session, animation, listeners })
    }

    pub fn len(&self) -> usize {
        self.session.borrow().controller().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current angle of the `index`-th matched element
    pub fn angle(&self, index: u32) -> Option<f32> {
        self.session
            .borrow()
            .controller()
            .state(ElementId(index))
            .map(|s| s.current_angle)
    }

    /// Stop the loop, detach listeners and discard every spin state
    pub fn teardown(&mut self) {
        self.animation.stop();
        detach_listeners(&mut self.listeners);
        self.session.borrow_mut().teardown();
    }
}

/// Attach the spin listeners, pushing each one as soon as it is live
fn attach_listeners(
    window: &Window,
    session: &Rc<RefCell<SpinSession<DomPresenter>>>,
    elements: &BTreeMap<ElementId, HtmlElement>,
    touch_capable: bool,
    listeners: &mut Vec<Listener>,
) -> SiteResult<()> {
    for (&id, el) in elements {
        for event in SPIN_EVENTS {
            let session = session.clone();
            let performance = window.performance();
            let cancels = input::cancels_default(event);
            let callback = Closure::wrap(Box::new(move |e: Event| {
                let now = performance.as_ref().map(|p| p.now()).unwrap_or(0.0);
                let Some(input) = input::wasm::event_to_input(&e, now) else { return };
                if cancels {
                    e.prevent_default();
                }
                session.borrow_mut().handle(id, &input);
            }) as Box<dyn FnMut(Event)>);

            let options = AddEventListenerOptions::new();
            options.set_passive(!cancels);
            el.add_event_listener_with_callback_and_add_event_listener_options(
                event,
                callback.as_ref().unchecked_ref(),
                &options,
            )?;
            listeners.push((el.clone(), event, callback));
        }

        if !touch_capable {
            let session = session.clone();
            let callback = Closure::wrap(Box::new(move |_e: Event| {
                session.borrow_mut().click(id);
            }) as Box<dyn FnMut(Event)>);
            el.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
            listeners.push((el.clone(), "click", callback));
        }
    }
    Ok(())
}

fn detach_listeners(listeners: &mut Vec<Listener>) {
    for (el, event, callback) in listeners.drain(..) {
        if let Err(e) = el.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            tracing::warn!(event, error = ?e, "failed to detach spin listener");
        }
    }
}

impl Drop for LogoBinding {
    fn drop(&mut self) {
        if !self.listeners.is_empty() {
            self.teardown();
        }
    }
}
