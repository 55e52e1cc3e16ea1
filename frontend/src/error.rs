use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("No window object")]
    MissingWindow,
    #[error("No document object")]
    MissingDocument,
    #[error("No localStorage")]
    StorageUnavailable,
    #[error("invalid runtime config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("unknown theme `{0}`")]
    UnknownTheme(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for EnhanceError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        EnhanceError::Js(message)
    }
}
