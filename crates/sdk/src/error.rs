use paymaya_types::ApiErrorPayload;
use thiserror::Error;

/// Errors returned by the PayMaya SDK
///
/// Transport failures (`Http`, `Connection`, `InvalidUrl`) mean the request
/// never produced a response. `Remote` means the API answered with an error
/// document instead of a resource; it is an ordinary outcome that callers are
/// expected to branch on.
#[derive(Error, Debug)]
pub enum PaymentsError {
    /// HTTP error from reqwest (DNS, refused connection, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure not raised by reqwest
    #[error("Connection error: {0}")]
    Connection(String),

    /// Target URL is not a well-formed absolute URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to encode a request body
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response body is not a JSON object/array or does not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Remote API returned an error document (`code` and/or `message`)
    #[error(
        "Remote API error (code: {}, message: {})",
        .code.as_deref().unwrap_or("none"),
        .message.as_deref().unwrap_or("none")
    )]
    Remote {
        code: Option<String>,
        message: Option<String>,
    },

    /// Action needs an identifier the resource does not have yet
    #[error("Missing identifier: {0}")]
    MissingId(&'static str),

    /// Action needs an input field that was not set
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentsError {
    /// True when the request did not complete an HTTP exchange
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PaymentsError::Http(_) | PaymentsError::Connection(_) | PaymentsError::InvalidUrl(_)
        )
    }

    /// True when the API answered with an error document
    pub fn is_remote(&self) -> bool {
        matches!(self, PaymentsError::Remote { .. })
    }

    /// `(code, message)` of a remote error, if this is one
    pub fn remote_details(&self) -> Option<(Option<&str>, Option<&str>)> {
        match self {
            PaymentsError::Remote { code, message } => Some((code.as_deref(), message.as_deref())),
            _ => None,
        }
    }
}

impl From<ApiErrorPayload> for PaymentsError {
    fn from(payload: ApiErrorPayload) -> Self {
        PaymentsError::Remote {
            code: payload.code_text(),
            message: payload.message,
        }
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, PaymentsError>;
