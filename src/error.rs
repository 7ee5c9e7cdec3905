use thiserror::Error;
use wasm_bindgen::JsCast;

/// Everything that can stop the effect from coming up.
#[derive(Debug, Error)]
pub enum DotError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("element `{0}` not found")]
    MissingElement(String),
    #[error("WebGL2 not supported")]
    ContextUnavailable,
    #[error("shader compile failed: {0}")]
    ShaderCompile(String),
    #[error("program link failed: {0}")]
    ProgramLink(String),
    #[error("could not allocate {0}")]
    Resource(&'static str),
    #[error("invalid color `{0}`")]
    InvalidColor(String),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("{0}")]
    Js(String),
}

pub type Result<T, E = DotError> = std::result::Result<T, E>;

impl From<wasm_bindgen::JsValue> for DotError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        DotError::Js(message)
    }
}

impl From<DotError> for wasm_bindgen::JsValue {
    fn from(err: DotError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
