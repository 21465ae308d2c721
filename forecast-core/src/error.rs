use thiserror::Error;

/// Failure of a single forecast fetch.
///
/// Variants carry plain strings rather than the underlying errors so
/// the value stays `Clone` and can live inside shared view state. All
/// three collapse into the controller's `Failed` state; there is no
/// retryable/non-retryable distinction, retry is manual.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Transport-level failure: unreachable host, connection reset, timeout.
    #[error("network error: {0}")]
    Network(String),

    /// The response body does not match the expected shape.
    #[error("malformed forecast response: {0}")]
    Decode(String),

    /// The provider returned a well-formed error, e.g. unknown city.
    #[error("provider error (status {status}): {body}")]
    Request { status: u16, body: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
