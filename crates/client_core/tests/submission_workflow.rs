use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use axum::{extract::State, http::StatusCode, routing::post, Router};
use client_core::{
    HttpAnalysisTransport, ListItem, NoticeKind, PresentationSettings, SubmissionController,
    SubmissionOutcome, SubmissionState, NOT_AVAILABLE,
};
use serde_json::json;
use tokio::net::TcpListener;

#[derive(Clone)]
struct Backend {
    status: StatusCode,
    body: String,
    hits: Arc<AtomicUsize>,
}

async fn analyze(State(backend): State<Backend>) -> (StatusCode, String) {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    (backend.status, backend.body.clone())
}

async fn spawn_backend(status: StatusCode, body: String) -> (String, Arc<AtomicUsize>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/analyze-audio", post(analyze))
        .with_state(Backend {
            status,
            body,
            hits: hits.clone(),
        });
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), hits)
}

fn audio_file() -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = std::env::temp_dir().join(format!("rightscheck_workflow_{suffix}.mp3"));
    std::fs::write(&path, b"ID3-workflow").expect("write audio");
    path
}

#[tokio::test]
async fn http_500_surfaces_connectivity_error_and_rearms_trigger() {
    let (backend_url, hits) =
        spawn_backend(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".into()).await;
    let transport =
        HttpAnalysisTransport::new(&backend_url, Duration::from_secs(5)).expect("transport");
    let mut controller = SubmissionController::new(PresentationSettings::default());
    let audio = audio_file();
    controller.select_file(Some(audio.clone()));

    let state = controller.submit(&transport, Duration::from_secs(5)).await;

    assert_eq!(
        state,
        SubmissionState::Done(SubmissionOutcome::Failed(NoticeKind::Transport))
    );
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    let view = controller.view();
    assert!(!view.report_visible());
    assert!(view.busy.is_none());
    assert!(view.trigger.enabled);
    assert_eq!(
        view.notice.as_ref().map(|notice| notice.text.as_str()),
        Some("Error connecting to the analysis backend. Is it running?")
    );

    let _ = std::fs::remove_file(audio);
}

#[tokio::test]
async fn recognized_track_renders_full_report() {
    let body = json!({
        "success": true,
        "title": "Harvest Moon",
        "artists": ["Neil Young"],
        "album": "Harvest Moon",
        "release_date": "1992-11-02",
        "confidence_score": 100,
        "acrid": "6049f11da7095e8bb8266871d4a70873",
        "official_search_links": {
            "bmi": "https://repertoire.bmi.com/",
            "ascap": "https://www.ascap.com/repertory"
        },
        "copyright_report": {
            "publisher": ["Silver Fiddle Music"],
            "master_rights_holder": { "name": "Reprise Records" },
            "pros": ["BMI"],
            "licensing_sources": {
                "composition": [
                    { "type": "Mechanical License", "organization": "Harry Fox Agency", "url": "https://www.harryfox.com" }
                ],
                "master_recording": []
            },
            "source_links": ["https://repertoire.bmi.com/"]
        }
    });
    let (backend_url, hits) = spawn_backend(StatusCode::OK, body.to_string()).await;
    let transport =
        HttpAnalysisTransport::new(&backend_url, Duration::from_secs(5)).expect("transport");
    let mut controller = SubmissionController::new(PresentationSettings::default());
    let audio = audio_file();
    controller.select_file(Some(audio.clone()));

    let state = controller.submit(&transport, Duration::from_secs(5)).await;

    assert_eq!(state, SubmissionState::Done(SubmissionOutcome::Succeeded));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    let report = controller.view().report.clone().expect("report");
    assert_eq!(report.title, "Harvest Moon");
    assert_eq!(report.artists, "Neil Young");
    assert_eq!(report.confidence, "100%");
    assert_eq!(report.album.as_deref(), Some("Harvest Moon"));
    assert_eq!(report.visible_pro_links().count(), 2);
    assert_eq!(report.master_rights_holders.texts(), ["Reprise Records"]);
    assert_eq!(
        report.composition_licenses.texts(),
        ["Mechanical License: Harry Fox Agency (https://www.harryfox.com)"]
    );
    assert_eq!(report.master_recording_licenses.texts(), [NOT_AVAILABLE]);
    assert_eq!(
        report.source_links.items,
        vec![ListItem::Link {
            url: "https://repertoire.bmi.com/".to_string()
        }]
    );
    assert!(controller.take_focus_request());

    let _ = std::fs::remove_file(audio);
}
