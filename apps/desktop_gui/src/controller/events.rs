//! UI/backend events and error modeling for desktop GUI controller.

use client_core::SubmissionError;
use shared::protocol::AnalysisResponse;

pub enum UiEvent {
    Info(String),
    BackendReady {
        analyze_url: String,
    },
    AnalysisFinished {
        id: u64,
        result: Result<AnalysisResponse, SubmissionError>,
    },
    HealthChecked {
        status: String,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Configuration,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    HealthCheck,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid backend url")
            || message_lower.contains("unsupported scheme")
            || message_lower.contains("startup failure")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("timed out")
            || message_lower.contains("failed to reach")
            || message_lower.contains("returned http")
            || message_lower.contains("connect")
            || message_lower.contains("disconnected")
            || message_lower.contains("queue is full")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Configuration => "Configuration",
        UiErrorCategory::Transport => "Connection",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_backend_url_is_a_configuration_error() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "invalid backend url 'ftp://x': unsupported scheme 'ftp'",
        );
        assert_eq!(err.category(), UiErrorCategory::Configuration);
        assert_eq!(err.context(), UiErrorContext::BackendStartup);
        assert_eq!(err_label(err.category()), "Configuration");
    }

    #[test]
    fn worker_disconnect_is_a_transport_error() {
        let err = UiError::from_message(
            UiErrorContext::General,
            "Backend worker disconnected; restart the application",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn backend_status_errors_are_transport_errors() {
        let err = UiError::from_message(
            UiErrorContext::HealthCheck,
            "analysis backend returned HTTP 503",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
        assert_eq!(err_label(err.category()), "Connection");
    }

    #[test]
    fn unclassified_failures_keep_their_message() {
        let err = UiError::from_message(UiErrorContext::HealthCheck, "something odd");
        assert_eq!(err.category(), UiErrorCategory::Unknown);
        assert_eq!(err.message(), "something odd");
    }
}
