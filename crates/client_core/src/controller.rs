//! Submission controller: the Idle → Submitting → Done state machine.
//!
//! Front-ends feed discrete inputs (`select_file`, `begin`, `finish`,
//! `dismiss_notice`) and draw whatever [`ViewModel`] results. `Done`
//! behaves exactly like `Idle`: the trigger is enabled and `begin` is
//! accepted again.

use std::{path::PathBuf, time::Duration};

use shared::protocol::AnalysisResponse;
use tracing::{debug, error, info, warn};

use crate::{
    config::PresentationSettings,
    error::SubmissionError,
    execute_submission,
    render::{render_report, sanitize_text},
    transport::AnalysisTransport,
    types::SubmissionTicket,
    view::{Notice, NoticeKind, TriggerView, ViewModel},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting { id: u64 },
    Done(SubmissionOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Succeeded,
    Failed(NoticeKind),
}

pub struct SubmissionController {
    settings: PresentationSettings,
    state: SubmissionState,
    view: ViewModel,
    last_id: u64,
    focus_requested: bool,
}

impl SubmissionController {
    pub fn new(settings: PresentationSettings) -> Self {
        Self {
            view: ViewModel::idle(&settings.ready_label),
            settings,
            state: SubmissionState::Idle,
            last_id: 0,
            focus_requested: false,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting { .. })
    }

    pub fn select_file(&mut self, path: Option<PathBuf>) {
        debug!(file = ?path, "analysis: file selection changed");
        self.view.selected_file = path;
    }

    /// Fires the submit transition. Returns `None` (and sends nothing) when
    /// a submission is already in flight or no file is selected.
    pub fn begin(&mut self) -> Option<SubmissionTicket> {
        if let SubmissionState::Submitting { id } = self.state {
            debug!(id, "analysis: submit ignored while a request is in flight");
            return None;
        }

        let Some(audio) = self.view.selected_file.clone() else {
            warn!("analysis: {}", SubmissionError::NoFileSelected);
            self.state = SubmissionState::Idle;
            self.view.notice = Some(Notice {
                kind: NoticeKind::Validation,
                text: self.settings.no_file_message.clone(),
            });
            return None;
        };

        self.last_id += 1;
        let id = self.last_id;
        self.state = SubmissionState::Submitting { id };
        self.focus_requested = false;
        self.view.trigger = TriggerView {
            enabled: false,
            label: self.settings.busy_label.clone(),
        };
        self.view.busy = Some(self.settings.busy_message.clone());
        self.view.report = None;
        self.view.notice = None;

        info!(id, file = %audio.display(), "analysis: submission started");
        Some(SubmissionTicket { id, audio })
    }

    /// Applies the result for ticket `id`. Results for any other ticket are
    /// dropped and `false` is returned.
    pub fn finish(
        &mut self,
        id: u64,
        result: Result<AnalysisResponse, SubmissionError>,
    ) -> bool {
        match self.state {
            SubmissionState::Submitting { id: current } if current == id => {}
            _ => {
                warn!(id, state = ?self.state, "analysis: dropping stale submission result");
                return false;
            }
        }

        self.view.busy = None;
        self.view.trigger = TriggerView {
            enabled: true,
            label: self.settings.ready_label.clone(),
        };

        let outcome = match result {
            Ok(response) if response.success => {
                if let Some(acrid) = response.acrid.as_deref() {
                    debug!(id, acrid, "analysis: recognized track");
                }
                self.view.report = Some(render_report(&response, &self.settings));
                self.focus_requested = true;
                info!(id, "analysis: report rendered");
                SubmissionOutcome::Succeeded
            }
            Ok(response) => {
                debug!(id, raw = ?response.raw, "analysis: backend could not recognize track");
                let text = response
                    .message
                    .as_deref()
                    .map(sanitize_text)
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| self.settings.not_recognized_message.clone());
                self.fail(NoticeKind::Recognition, text)
            }
            Err(SubmissionError::NoFileSelected) => {
                self.fail(NoticeKind::Validation, self.settings.no_file_message.clone())
            }
            Err(err @ SubmissionError::UnreadableFile { .. }) => {
                error!(id, "analysis: {err}");
                self.fail(
                    NoticeKind::UnreadableFile,
                    self.settings.unreadable_file_message.clone(),
                )
            }
            Err(SubmissionError::Transport(err)) => {
                error!(id, "analysis: transport failure: {err}");
                self.fail(
                    NoticeKind::Transport,
                    self.settings.connectivity_message.clone(),
                )
            }
        };

        self.state = SubmissionState::Done(outcome);
        true
    }

    pub fn dismiss_notice(&mut self) {
        self.view.notice = None;
    }

    /// Returns `true` once after a report becomes visible.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Runs one whole submission inline: begin, execute, finish.
    pub async fn submit<T>(&mut self, transport: &T, timeout: Duration) -> SubmissionState
    where
        T: AnalysisTransport + ?Sized,
    {
        if let Some(ticket) = self.begin() {
            let result = execute_submission(transport, &ticket, timeout).await;
            self.finish(ticket.id, result);
        }
        self.state
    }

    fn fail(&mut self, kind: NoticeKind, text: String) -> SubmissionOutcome {
        self.view.report = None;
        self.view.notice = Some(Notice { kind, text });
        SubmissionOutcome::Failed(kind)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
