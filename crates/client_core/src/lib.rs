use std::time::Duration;

use shared::protocol::AnalysisResponse;
use tracing::{info, warn};

pub mod config;
pub mod controller;
pub mod error;
pub mod render;
pub mod transport;
pub mod types;
pub mod view;

pub use config::{load_settings, ClientSettings, PresentationSettings};
pub use controller::{SubmissionController, SubmissionOutcome, SubmissionState};
pub use error::{SubmissionError, TransportError};
pub use transport::{AnalysisTransport, HttpAnalysisTransport, MissingAnalysisTransport};
pub use types::{AnalysisRequest, SubmissionTicket};
pub use view::{ListItem, ListRegion, Notice, NoticeKind, ReportView, ViewModel, NOT_AVAILABLE};

/// Reads the ticket's file and performs the upload, bounded by `timeout`.
///
/// The request is owned by this call and dropped when it returns. When the
/// timeout elapses the in-flight future is dropped, which cancels the
/// underlying HTTP exchange.
pub async fn execute_submission<T>(
    transport: &T,
    ticket: &SubmissionTicket,
    timeout: Duration,
) -> Result<AnalysisResponse, SubmissionError>
where
    T: AnalysisTransport + ?Sized,
{
    let request = AnalysisRequest::read_from(&ticket.audio).await?;
    info!(
        id = ticket.id,
        file = %request.file_name,
        bytes = request.bytes.len(),
        "analysis: submitting audio"
    );

    match tokio::time::timeout(timeout, transport.analyze(request)).await {
        Ok(result) => Ok(result?),
        Err(_) => {
            warn!(
                id = ticket.id,
                timeout_secs = timeout.as_secs(),
                "analysis: request timed out, cancelling"
            );
            Err(TransportError::Timeout(timeout).into())
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
