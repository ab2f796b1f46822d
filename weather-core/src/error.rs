use thiserror::Error;

/// Failures of a single current-weather lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The city was empty or whitespace only. No request was sent.
    #[error("City name must not be empty")]
    InvalidInput,

    /// The weather API answered with a non-success status.
    #[error("Weather API request failed with status {status}: {reason}")]
    Remote { status: u16, reason: String },

    /// The response body was not the expected JSON shape.
    #[error("Failed to parse weather API response: {0}")]
    Parse(String),

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("Failed to reach weather API: {0}")]
    Transport(#[from] reqwest::Error),
}

impl LookupError {
    pub fn remote(status: reqwest::StatusCode) -> Self {
        Self::Remote {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
