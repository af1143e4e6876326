use std::path::{Path, PathBuf};

use clap::Parser;
use client_core::{
    load_settings, ClientSettings, ListItem, NoticeKind, ReportView, SubmissionController,
    TransportError,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::ReportSection;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "m4a", "aac", "ogg", "opus", "aiff"];

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "rightscheck-gui", about = "Desktop front-end for the rights check backend")]
pub struct StartupConfig {
    /// Overrides the backend base URL from the settings file.
    #[arg(long)]
    pub backend_url: Option<String>,
    /// Settings file (defaults to ./rightscheck.toml, then the user config dir).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl StartupConfig {
    pub fn resolve_settings(&self) -> ClientSettings {
        let mut settings = load_settings(self.config.as_deref());
        if let Some(url) = &self.backend_url {
            settings.backend_url = url.clone();
        }
        settings
    }
}

fn file_label(path: Option<&Path>) -> String {
    match path {
        Some(path) => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        None => "No file selected".to_string(),
    }
}

fn notice_title(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Validation => "No file selected",
        NoticeKind::Transport => "Connection problem",
        NoticeKind::UnreadableFile => "Cannot read file",
        NoticeKind::Recognition => "Not recognized",
    }
}

pub struct AnalyzerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: SubmissionController,
    backend_label: String,
    status: String,
    error_banner: Option<UiError>,
}

impl AnalyzerApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &ClientSettings,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller: SubmissionController::new(settings.presentation.clone()),
            backend_label: settings.backend_url.clone(),
            status: String::new(),
            error_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::BackendReady { analyze_url } => {
                    self.status = "Ready".to_string();
                    self.backend_label = analyze_url;
                }
                UiEvent::AnalysisFinished { id, result } => {
                    if !self.controller.finish(id, result) {
                        tracing::debug!(id, "render: dropped stale analysis result");
                    }
                }
                UiEvent::HealthChecked { status } => {
                    self.status = format!("Backend health: {status}");
                    self.error_banner = None;
                }
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "{}", err.message());
                    self.status = err.message().to_string();
                    self.error_banner = Some(err);
                }
            }
        }
    }

    fn pick_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Audio", AUDIO_EXTENSIONS)
            .pick_file()
        {
            self.controller.select_file(Some(path));
        }
    }

    fn start_analysis(&mut self) {
        let Some(ticket) = self.controller.begin() else {
            return;
        };
        let id = ticket.id;
        if !dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Analyze { ticket },
            &mut self.status,
        ) {
            self.controller
                .finish(id, Err(TransportError::Network(self.status.clone()).into()));
            self.error_banner = Some(UiError::from_message(
                UiErrorContext::General,
                self.status.clone(),
            ));
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Rights Check");
                ui.separator();
                ui.weak(&self.backend_label);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Check backend").clicked()
                        && !dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::CheckHealth,
                            &mut self.status,
                        )
                    {
                        self.error_banner = Some(UiError::from_message(
                            UiErrorContext::General,
                            self.status.clone(),
                        ));
                    }
                });
            });
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(banner) = &self.error_banner {
                    ui.colored_label(
                        ui.visuals().error_fg_color,
                        format!("{}:", err_label(banner.category())),
                    );
                }
                ui.label(&self.status);
            });
        });
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.controller.view().notice.clone() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(notice_title(notice.kind))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&notice.text);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.controller.dismiss_notice();
        }
    }

    fn show_main(&mut self, ctx: &egui::Context) {
        let view = self.controller.view().clone();
        let scroll_to_report = self.controller.take_focus_request();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(view.trigger.enabled, egui::Button::new("Choose audio..."))
                    .clicked()
                {
                    self.pick_file();
                }
                ui.label(file_label(view.selected_file.as_deref()));
            });
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(
                        view.trigger.enabled,
                        egui::Button::new(view.trigger.label.as_str()),
                    )
                    .clicked()
                {
                    self.start_analysis();
                }
                if let Some(message) = &view.busy {
                    ui.spinner();
                    ui.label(message);
                }
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if let Some(report) = &view.report {
                        show_report(ui, report, scroll_to_report);
                    }
                });
        });
    }
}

fn show_report(ui: &mut egui::Ui, report: &ReportView, scroll_into_view: bool) {
    let response = ui
        .group(|ui| {
            ui.heading(&report.title);
            egui::Grid::new("report_fields")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.strong("Artists");
                    ui.label(&report.artists);
                    ui.end_row();
                    ui.strong("Confidence");
                    ui.label(&report.confidence);
                    ui.end_row();
                    if let Some(album) = &report.album {
                        ui.strong("Album");
                        ui.label(album);
                        ui.end_row();
                    }
                    if let Some(release_date) = &report.release_date {
                        ui.strong("Released");
                        ui.label(release_date);
                        ui.end_row();
                    }
                });

            ui.add_space(6.0);
            ui.label(&report.copyright_label);
            if let Some(summary) = &report.summary {
                ui.label(summary);
            }

            let links: Vec<_> = report.visible_pro_links().collect();
            if !links.is_empty() {
                ui.add_space(6.0);
                ui.horizontal_wrapped(|ui| {
                    for (pro, url) in links {
                        ui.hyperlink_to(format!("Search {}", pro.label()), url);
                    }
                });
            }

            for section in ReportSection::ALL {
                ui.add_space(6.0);
                ui.strong(section.heading());
                for item in &report.region(section).items {
                    match item {
                        ListItem::Link { url } => {
                            ui.hyperlink_to(url.as_str(), url);
                        }
                        ListItem::Placeholder => {
                            ui.weak(item.text());
                        }
                        ListItem::Text { text } => {
                            ui.label(format!("• {text}"));
                        }
                    }
                }
            }
        })
        .response;

    if scroll_into_view {
        response.scroll_to_me(Some(egui::Align::TOP));
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_top_bar(ctx);
        self.show_status_bar(ctx);
        self.show_main(ctx);
        self.show_notice(ctx);

        if self.controller.is_submitting() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
