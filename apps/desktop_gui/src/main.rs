use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{AnalyzerApp, StartupConfig};

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let startup = StartupConfig::parse();
    let settings = startup.resolve_settings();
    tracing::info!(
        backend = %settings.backend_url,
        timeout_secs = settings.request_timeout().as_secs(),
        "settings: resolved"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Rights Check")
            .with_inner_size([720.0, 760.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Rights Check",
        options,
        Box::new(move |_cc| Ok(Box::new(AnalyzerApp::new(cmd_tx, ui_rx, &settings)))),
    )
}
