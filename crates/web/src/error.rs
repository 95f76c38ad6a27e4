use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use std::error::Error;
use thiserror::Error;

/// The error type a middleware or handler returns; the router never catches it.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// An HTTP level failure, rendered by [`Pipeline::dispatch`](crate::Pipeline::dispatch) as a
/// response with its status, headers and message.
#[derive(Error, Debug, Clone)]
#[error("{status}: {message}")]
pub struct HttpError {
    status: StatusCode,
    message: String,
    headers: HeaderMap,
}

impl HttpError {
    /// Creates an error whose message is the canonical reason of `status`
    pub fn new(status: StatusCode) -> Self {
        let message = status.canonical_reason().unwrap_or_default().to_owned();
        Self { status, message, headers: HeaderMap::new() }
    }

    pub fn not_implemented() -> Self {
        Self::new(StatusCode::NOT_IMPLEMENTED)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED)
    }

    #[must_use]
    pub fn with_message<S: ToString>(mut self, message: S) -> Self {
        self.message = message.to_string();
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
