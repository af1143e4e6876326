use std::path::{Path, PathBuf};

use crate::error::SubmissionError;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";
const FALLBACK_FILE_NAME: &str = "audio";

/// One audio upload. Built for a single submission and dropped with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl AnalysisRequest {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub async fn read_from(path: &Path) -> Result<Self, SubmissionError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| SubmissionError::UnreadableFile {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(file_name_for(path), content_type_for(path), bytes))
    }
}

pub fn file_name_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}

pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_string()
}

/// Handle for the single submission the controller has in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub id: u64,
    pub audio: PathBuf,
}
