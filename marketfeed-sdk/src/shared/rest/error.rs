use std::result;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestApiError {
    #[error("Failed to build the HTTP client: {0}")]
    HttpClient(reqwest::Error),

    #[error("Failed to parse request URL: {0}")]
    UrlParse(String),

    #[error("Failed to send the request: {0}")]
    SendFailed(reqwest::Error),

    #[error("Provider returned an error response: status {status}, body {text}")]
    ErrorResponse { status: StatusCode, text: String },

    #[error("Failed to read the response body: {0}")]
    ResponseDecoding(reqwest::Error),

    #[error("Failed to deserialize the response `{raw_response}`: {e}")]
    ResponseJsonDeserializeFailed {
        raw_response: String,
        e: serde_json::Error,
    },

    #[error("Provider reported error {code}: {message}")]
    Provider { code: i64, message: String },
}

impl RestApiError {
    /// Returns `true` if this error is a provider error response with the given status code.
    pub fn is_status(&self, code: StatusCode) -> bool {
        matches!(self, Self::ErrorResponse { status, .. } if *status == code)
    }

    /// Like [`RestApiError::is_status`], for callers without a `StatusCode` at hand.
    pub fn is_status_code(&self, code: u16) -> bool {
        matches!(self, Self::ErrorResponse { status, .. } if status.as_u16() == code)
    }
}

pub(crate) type Result<T> = result::Result<T, RestApiError>;
