use thiserror::Error;

/// Errors raised while talking to an external collaborator.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Transport failure, timeout or non-success status.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with an error of its own.
    #[error("API error: {0}")]
    Api(String),

    /// The session cookie or crumb was missing or rejected.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// The response body did not have the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("No data available for {0}")]
    NoData(String),
}

impl From<serde_json::Error> for ServiceError {
    fn from(error: serde_json::Error) -> Self {
        ServiceError::Decode(error.to_string())
    }
}
