// VIEW: Applying spin frames and site state to the DOM
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod logo;
#[cfg(target_arch = "wasm32")]
pub mod site;

#[cfg(target_arch = "wasm32")]
pub use dom::DomPresenter;
#[cfg(target_arch = "wasm32")]
pub use logo::LogoBinding;
