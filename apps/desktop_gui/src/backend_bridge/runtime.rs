//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use anyhow::Context;
use client_core::{
    execute_submission, ClientSettings, HttpAnalysisTransport, MissingAnalysisTransport,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

fn build_runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to build backend runtime")
}

fn spawn_health_check(transport: Arc<HttpAnalysisTransport>, ui_tx: Sender<UiEvent>) {
    tokio::spawn(async move {
        let event = match transport.check_health().await {
            Ok(health) => UiEvent::HealthChecked {
                status: health.status,
            },
            Err(err) => UiEvent::Error(UiError::from_message(
                UiErrorContext::HealthCheck,
                err.to_string(),
            )),
        };
        let _ = ui_tx.send(event);
    });
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match build_runtime() {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err:#}"),
                )));
                tracing::error!("{err:#}");
                return;
            }
        };

        runtime.block_on(async move {
            let timeout = settings.request_timeout();
            let http = match HttpAnalysisTransport::new(&settings.backend_url, timeout) {
                Ok(transport) => {
                    let _ = ui_tx.try_send(UiEvent::BackendReady {
                        analyze_url: transport.analyze_url().to_string(),
                    });
                    let transport = Arc::new(transport);
                    spawn_health_check(transport.clone(), ui_tx.clone());
                    Some(transport)
                }
                Err(err) => {
                    tracing::error!(backend = %settings.backend_url, "settings: {err}");
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        err.to_string(),
                    )));
                    None
                }
            };

            while let Ok(cmd) = cmd_rx.recv() {
                let ui_tx = ui_tx.clone();
                match cmd {
                    BackendCommand::Analyze { ticket } => {
                        let http = http.clone();
                        tokio::spawn(async move {
                            let result = match http.as_deref() {
                                Some(transport) => {
                                    execute_submission(transport, &ticket, timeout).await
                                }
                                None => {
                                    execute_submission(&MissingAnalysisTransport, &ticket, timeout)
                                        .await
                                }
                            };
                            let _ = ui_tx.send(UiEvent::AnalysisFinished {
                                id: ticket.id,
                                result,
                            });
                        });
                    }
                    BackendCommand::CheckHealth => {
                        let Some(transport) = http.clone() else {
                            let _ = ui_tx.send(UiEvent::Error(UiError::from_message(
                                UiErrorContext::HealthCheck,
                                "invalid backend url; check the settings file",
                            )));
                            continue;
                        };
                        spawn_health_check(transport, ui_tx);
                    }
                }
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}
