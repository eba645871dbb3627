use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures at the DOM boundary. The spin core itself never fails.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no global `{0}`")]
    MissingGlobal(&'static str),

    #[error("element not found: {0}")]
    MissingElement(String),

    #[error("invalid rotation config: {0}")]
    InvalidConfig(String),

    #[error("javascript error: {0}")]
    Js(String),

    #[error("form submission failed")]
    SubmissionFailed,
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        SiteError::Js(msg)
    }
}

impl From<serde_wasm_bindgen::Error> for SiteError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        SiteError::InvalidConfig(err.to_string())
    }
}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type SiteResult<T> = Result<T, SiteError>;
