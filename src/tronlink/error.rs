use gloo_utils::format::JsValueSerdeExt;
use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Error thrown while talking to the extension or the client library
#[derive(Error, Debug)]
pub enum WalletError {
    /// Thrown if no window.tronLink is found in DOM
    #[error("TronLink is not installed")]
    NoExtension,

    /// Thrown if no window.tronWeb is found in DOM
    #[error("no wallet client available")]
    NoClient,

    /// Thrown when the TronWeb bundle needed for the read-only fallback is
    /// missing from the page
    #[error("the TronWeb library is not loaded")]
    NoLibrary,

    /// Thrown if a call into the extension failed
    #[error("{0}")]
    JsValueError(String),

    /// Thrown if the extension denied the account-access request
    #[error("account access denied: {0}")]
    AccessDenied(String),

    #[error("cannot parse wallet response")]
    JsParseError,

    #[error(transparent)]
    /// Serde JSON Error
    SerdeJson(#[from] serde_json::Error),

    #[error("wallet communication failed")]
    CommunicationError,
}

/// The `{ code, message }` shape TronLink resolves requests with.
#[derive(Debug, Deserialize)]
pub(crate) struct ExtensionResponse {
    pub code: Option<i64>,
    pub message: Option<String>,
}

impl From<JsValue> for WalletError {
    fn from(src: JsValue) -> Self {
        if let Ok(response) = src.into_serde::<ExtensionResponse>() {
            if let Some(message) = response.message {
                return WalletError::JsValueError(message);
            }
        }
        if let Some(message) = src.as_string() {
            WalletError::JsValueError(message)
        } else {
            WalletError::JsValueError(format!("{:?}", src))
        }
    }
}
