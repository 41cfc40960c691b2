use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoingeckoError {
    /// No response reached us (DNS, connect, timeout, reset).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Upstream returned status {status}")]
    Upstream { status: u16 },

    /// The body was not in the expected shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoingeckoError {
    /// HTTP status for upstream failures
    pub fn status(&self) -> Option<u16> {
        match self {
            CoingeckoError::Upstream { status } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoingeckoError>;
