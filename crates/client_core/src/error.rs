use std::{path::PathBuf, time::Duration};

use shared::error::PayloadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid backend url '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("failed to reach analysis backend: {0}")]
    Network(String),
    #[error("analysis backend returned HTTP {0}")]
    Status(u16),
    #[error("malformed analysis payload: {0}")]
    MalformedPayload(#[from] PayloadError),
    #[error("analysis request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl TransportError {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Status(status.as_u16());
        }
        if err.is_timeout() {
            return Self::Network(format!("request timed out: {err}"));
        }
        Self::Network(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("no audio file selected")]
    NoFileSelected,
    #[error("failed to read audio file '{}': {source}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SubmissionError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
