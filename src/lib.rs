// Re-export all public modules so they can be used from main.rs
pub mod error;
pub mod logging;
pub mod utils;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

pub use controller::{RotationController, SpinInput, SpinSession, SpinTransition};
pub use error::{SiteError, SiteResult};
pub use model::{ElementId, RotationConfig, RotationFrame, RotationState};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{prelude::wasm_bindgen, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Window};

/// Selector of the hero logo used when the page does not pass one
pub const DEFAULT_LOGO_SELECTOR: &str = ".hero__logo-spin";

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
}

/// Wire navigation, forms, animations and the quote calculator
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initSite)]
pub fn init_site() -> Result<(), JsValue> {
    let (window, document) = globals()?;
    view::site::init_site(&window, &document)?;
    Ok(())
}

/// Handle to the spinning logos returned by `initLogoSpin`
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct LogoSpin {
    binding: view::LogoBinding,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl LogoSpin {
    /// Number of elements being spun
    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.binding.len()
    }

    pub fn angle(&self, index: u32) -> Option<f32> {
        self.binding.angle(index)
    }

    /// Stop spinning and detach from the page
    pub fn stop(&mut self) {
        self.binding.teardown();
    }
}

/// Start spinning every element matching `selector` (default
/// `.hero__logo-spin`). `config` is an optional partial `RotationConfig`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initLogoSpin)]
pub fn init_logo_spin(selector: Option<String>, config: JsValue) -> Result<LogoSpin, JsValue> {
    let (window, document) = globals()?;
    let config: RotationConfig = if config.is_undefined() || config.is_null() {
        RotationConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(SiteError::from)?
    };
    let selector = selector.as_deref().unwrap_or(DEFAULT_LOGO_SELECTOR);
    let binding = view::LogoBinding::mount(&window, &document, selector, config)?;
    Ok(LogoSpin { binding })
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = formatPhoneNumber)]
pub fn format_phone_number(phone: &str) -> String {
    utils::format_phone_number(phone)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email(email: &str) -> bool {
    utils::is_valid_email(email)
}

#[cfg(target_arch = "wasm32")]
fn globals() -> Result<(Window, Document), SiteError> {
    let window = web_sys::window().ok_or(SiteError::MissingGlobal("window"))?;
    let document = window.document().ok_or(SiteError::MissingGlobal("document"))?;
    Ok((window, document))
}
