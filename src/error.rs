use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum TimerError {
    #[error("no global window available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("form not found: {0}")]
    MissingForm(String),
    #[error("form field not found: {0}")]
    MissingField(String),
    #[error("page global not defined: {0}")]
    MissingGlobal(String),
    #[error("page global {name} is not usable: {value}")]
    InvalidGlobal { name: String, value: String },
    #[error("page script failed: {0}")]
    Js(String),
    #[error("invalid timer config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for TimerError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        TimerError::Js(msg)
    }
}
