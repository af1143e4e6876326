use super::*;
use crate::{
    error::TransportError,
    tests::{temp_audio_file, Script, ScriptedTransport},
    view::NOT_AVAILABLE,
};
use serde_json::json;
use shared::{domain::ReportSection, protocol::parse_analysis_response};

const TIMEOUT: Duration = Duration::from_secs(5);

fn controller() -> SubmissionController {
    SubmissionController::new(PresentationSettings::default())
}

fn controller_with_file() -> SubmissionController {
    let mut controller = controller();
    controller.select_file(Some(temp_audio_file("track.mp3", b"ID3")));
    controller
}

fn payload(value: serde_json::Value) -> AnalysisResponse {
    parse_analysis_response(value.to_string().as_bytes()).expect("payload")
}

#[tokio::test]
async fn submit_without_file_never_sends_a_request() {
    let transport = ScriptedTransport::respond(json!({ "success": true }));
    let mut controller = controller();

    let state = controller.submit(&transport, TIMEOUT).await;

    assert_eq!(state, SubmissionState::Idle);
    assert_eq!(transport.call_count(), 0);
    let notice = controller.view().notice.clone().expect("validation notice");
    assert_eq!(notice.kind, NoticeKind::Validation);
    assert_eq!(notice.text, "Please select an audio file first.");
    assert!(controller.view().trigger.enabled);
    assert!(!controller.view().report_visible());
}

#[test]
fn entering_submitting_disables_trigger_and_clears_report() {
    let mut controller = controller_with_file();
    let first = controller.begin().expect("ticket");
    assert!(controller.finish(first.id, Ok(payload(json!({ "success": true, "title": "Old" })))));
    assert!(controller.view().report_visible());

    let ticket = controller.begin().expect("second ticket");

    assert_eq!(controller.state(), SubmissionState::Submitting { id: ticket.id });
    let view = controller.view();
    assert!(!view.trigger.enabled);
    assert_eq!(view.trigger.label, "Analyzing...");
    assert_eq!(view.busy.as_deref(), Some("Listening to the audio..."));
    assert!(view.report.is_none());
    assert!(view.notice.is_none());
}

#[test]
fn repeated_submit_while_in_flight_has_no_effect() {
    let mut controller = controller_with_file();
    let ticket = controller.begin().expect("ticket");
    let before = controller.view().clone();

    assert!(controller.begin().is_none());
    assert!(controller.begin().is_none());

    assert_eq!(controller.view(), &before);
    assert_eq!(controller.state(), SubmissionState::Submitting { id: ticket.id });
}

#[test]
fn success_shows_report_and_requests_focus_once() {
    let mut controller = controller_with_file();
    let ticket = controller.begin().expect("ticket");

    let applied = controller.finish(
        ticket.id,
        Ok(payload(json!({
            "success": true,
            "title": "X",
            "artists": ["A"],
            "confidence_score": 87,
            "copyright_report": { "publisher": ["P1"], "licensing_paths": {} }
        }))),
    );

    assert!(applied);
    assert_eq!(
        controller.state(),
        SubmissionState::Done(SubmissionOutcome::Succeeded)
    );
    let view = controller.view();
    assert!(view.trigger.enabled);
    assert_eq!(view.trigger.label, "Analyze");
    assert!(view.busy.is_none());
    assert!(view.notice.is_none());
    let report = view.report.as_ref().expect("report");
    assert_eq!(report.title, "X");
    assert_eq!(report.confidence, "87%");
    assert_eq!(report.publishers.texts(), ["P1"]);
    assert_eq!(report.region(ReportSection::SourceLinks).texts(), [NOT_AVAILABLE]);

    assert!(controller.take_focus_request());
    assert!(!controller.take_focus_request());
}

#[test]
fn recognition_failure_uses_backend_message_when_present() {
    let mut controller = controller_with_file();
    let ticket = controller.begin().expect("ticket");
    controller.finish(
        ticket.id,
        Ok(payload(json!({
            "success": false,
            "message": "Track not recognized",
            "raw": { "status": { "msg": "No result", "code": 1001 } }
        }))),
    );

    let view = controller.view();
    assert!(!view.report_visible());
    assert!(view.trigger.enabled);
    assert_eq!(
        view.notice,
        Some(Notice {
            kind: NoticeKind::Recognition,
            text: "Track not recognized".to_string(),
        })
    );
    assert_eq!(
        controller.state(),
        SubmissionState::Done(SubmissionOutcome::Failed(NoticeKind::Recognition))
    );
}

#[test]
fn recognition_failure_without_message_uses_fallback() {
    for body in [
        json!({ "success": false }),
        json!({ "success": false, "message": null }),
        json!({ "success": false, "message": "   " }),
        json!({ "title": "ignored without success flag" }),
    ] {
        let mut controller = controller_with_file();
        let ticket = controller.begin().expect("ticket");
        controller.finish(ticket.id, Ok(payload(body)));

        let view = controller.view();
        assert!(!view.report_visible());
        assert_eq!(
            view.notice.as_ref().map(|notice| notice.text.as_str()),
            Some("Song could not be recognized.")
        );
    }
}

#[tokio::test]
async fn transport_failure_restores_interactive_state() {
    let transport = ScriptedTransport::new(Script::Fail(500));
    let mut controller = controller_with_file();

    let state = controller.submit(&transport, TIMEOUT).await;

    assert_eq!(
        state,
        SubmissionState::Done(SubmissionOutcome::Failed(NoticeKind::Transport))
    );
    let view = controller.view();
    assert!(view.trigger.enabled);
    assert!(view.busy.is_none());
    assert!(!view.report_visible());
    assert_eq!(
        view.notice.as_ref().map(|notice| notice.kind),
        Some(NoticeKind::Transport)
    );
    assert!(!controller.take_focus_request());
}

#[tokio::test]
async fn timeout_forces_failure_mode() {
    let transport = ScriptedTransport::new(Script::Hang);
    let mut controller = controller_with_file();

    let state = controller
        .submit(&transport, Duration::from_millis(50))
        .await;

    assert_eq!(
        state,
        SubmissionState::Done(SubmissionOutcome::Failed(NoticeKind::Transport))
    );
    assert!(controller.view().trigger.enabled);
}

#[tokio::test]
async fn unreadable_file_is_reported_without_request() {
    let transport = ScriptedTransport::respond(json!({ "success": true }));
    let mut controller = controller();
    controller.select_file(Some(
        std::env::temp_dir().join("rightscheck_nowhere/missing.flac"),
    ));

    let state = controller.submit(&transport, TIMEOUT).await;

    assert_eq!(
        state,
        SubmissionState::Done(SubmissionOutcome::Failed(NoticeKind::UnreadableFile))
    );
    assert_eq!(transport.call_count(), 0);
    assert!(controller.view().trigger.enabled);
}

#[tokio::test]
async fn each_submission_sends_exactly_one_request() {
    let transport = ScriptedTransport::respond(json!({ "success": true, "title": "Song" }));
    let mut controller = controller_with_file();

    controller.submit(&transport, TIMEOUT).await;
    controller.submit(&transport, TIMEOUT).await;

    assert_eq!(transport.call_count(), 2);
    let uploads = transport.uploads.lock().await;
    assert!(uploads.iter().all(|upload| upload.file_name == "track.mp3"));
    assert!(uploads.iter().all(|upload| upload.bytes == b"ID3"));
}

#[test]
fn stale_results_are_ignored() {
    let mut controller = controller_with_file();
    let ticket = controller.begin().expect("ticket");

    assert!(!controller.finish(
        ticket.id + 1,
        Err(TransportError::Status(502).into())
    ));
    assert_eq!(controller.state(), SubmissionState::Submitting { id: ticket.id });

    assert!(controller.finish(ticket.id, Ok(payload(json!({ "success": true })))));
    assert!(!controller.finish(
        ticket.id,
        Err(TransportError::Status(502).into())
    ));
    assert!(controller.view().report_visible());
}

#[test]
fn dismissing_notice_keeps_state() {
    let mut controller = controller();
    assert!(controller.begin().is_none());
    assert!(controller.view().notice.is_some());

    controller.dismiss_notice();

    assert!(controller.view().notice.is_none());
    assert_eq!(controller.state(), SubmissionState::Idle);
}
