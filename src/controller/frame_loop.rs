/// Turns absolute frame timestamps into per-frame deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Milliseconds since the previous frame; zero on the first frame
    pub fn delta(&mut self, now_ms: f64) -> f64 {
        let delta = self.last_ms.map_or(0.0, |last| (now_ms - last).max(0.0));
        self.last_ms = Some(now_ms);
        delta
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::wasm::AnimationLoop;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::Window;

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// requestAnimationFrame loop that can be stopped again
    pub struct AnimationLoop {
        inner: Rc<RefCell<Box<dyn FnMut(f64)>>>,
        window: Window,
        running: Rc<Cell<bool>>,
        pending: Rc<Cell<Option<i32>>>,
        callback: FrameCallback,
    }

    impl AnimationLoop {
        pub fn new(window: Window, f: impl FnMut(f64) + 'static) -> Self {
            Self {
                inner: Rc::new(RefCell::new(Box::new(f))),
                window,
                running: Rc::new(Cell::new(false)),
                pending: Rc::new(Cell::new(None)),
                callback: Rc::new(RefCell::new(None)),
            }
        }

        pub fn is_running(&self) -> bool {
            self.running.get()
        }

        pub fn start(&self) -> Result<(), JsValue> {
            if self.running.replace(true) {
                return Ok(());
            }

            let inner = self.inner.clone();
            let window = self.window.clone();
            let running = self.running.clone();
            let pending = self.pending.clone();
            let callback_clone = self.callback.clone();

            *self.callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
                pending.set(None);
                if !running.get() {
                    return;
                }
                inner.borrow_mut().as_mut()(timestamp);

                // Schedule next frame
                let cb_ref = callback_clone.borrow();
                let Some(cb) = cb_ref.as_ref() else { return };
                match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(handle) => pending.set(Some(handle)),
                    Err(e) => {
                        tracing::error!(error = ?e, "requestAnimationFrame failed, stopping spin loop");
                        running.set(false);
                    }
                }
            }) as Box<dyn FnMut(f64)>));

            let handle = {
                let cb_ref = self.callback.borrow();
                let cb = cb_ref
                    .as_ref()
                    .ok_or_else(|| JsValue::from_str("frame callback missing"))?;
                self.window.request_animation_frame(cb.as_ref().unchecked_ref())?
            };
            self.pending.set(Some(handle));
            Ok(())
        }

        /// Cancel the pending frame and release the callback
        pub fn stop(&self) {
            self.running.set(false);
            if let Some(handle) = self.pending.take() {
                if let Err(e) = self.window.cancel_animation_frame(handle) {
                    tracing::warn!(error = ?e, "cancelAnimationFrame failed");
                }
            }
            self.callback.borrow_mut().take();
        }
    }

    impl Drop for AnimationLoop {
        fn drop(&mut self) {
            self.stop();
        }
    }
}
