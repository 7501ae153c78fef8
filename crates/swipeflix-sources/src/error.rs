use swipeflix_models::BatchFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Source not configured: {0}")]
    Config(String),
}

impl SourceError {
    pub fn is_decode(&self) -> bool {
        matches!(self, SourceError::Decode(_))
    }

    /// Collapse into the two failure classes a fan-out branch can report.
    pub fn to_batch_failure(&self) -> BatchFailure {
        match self {
            SourceError::Decode(msg) => BatchFailure::Decode(msg.clone()),
            other => BatchFailure::Transport(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            SourceError::Decode(e.to_string())
        } else {
            SourceError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Decode(e.to_string())
    }
}
