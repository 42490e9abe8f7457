//! Startup / DOM errors surfaced at the wasm boundary.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("dom call failed: {0}")]
    Dom(String),
    #[error("element is not a {0}")]
    Cast(&'static str),
    #[error("invalid site config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid site config: {0}")]
    Invalid(&'static str),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(text) => SiteError::Dom(text),
            None => SiteError::Dom(format!("{value:?}")),
        }
    }
}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type SiteResult<T> = Result<T, SiteError>;
