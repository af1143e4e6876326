use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::normalize_backend_url,
    load_settings, ClientSettings, HttpAnalysisTransport, SubmissionController, SubmissionOutcome,
    SubmissionState,
};
use tracing_subscriber::EnvFilter;

mod output;

#[derive(Parser, Debug)]
#[command(
    name = "rightscheck",
    about = "Identify a recording and show its copyright and licensing report"
)]
struct Cli {
    /// Settings file (defaults to ./rightscheck.toml, then the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    backend_url: Option<String>,
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload an audio file and print the report.
    Analyze {
        file: Option<PathBuf>,
        /// Print the view model as JSON instead of the text report.
        #[arg(long)]
        json: bool,
    },
    /// Probe the backend health endpoint.
    Health,
}

fn resolve_settings(cli: &Cli) -> ClientSettings {
    let mut settings = load_settings(cli.config.as_deref());
    if let Some(url) = &cli.backend_url {
        settings.backend_url = url.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        settings.request_timeout_secs = secs;
    }
    settings
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = resolve_settings(&cli);
    let timeout = settings.request_timeout();
    tracing::debug!(
        backend = %settings.backend_url,
        timeout_secs = timeout.as_secs(),
        "settings: resolved"
    );

    let transport = HttpAnalysisTransport::new(&settings.backend_url, timeout)
        .with_context(|| format!("cannot use backend '{}'", settings.backend_url))?;

    match cli.command {
        Command::Analyze { file, json } => {
            let mut controller = SubmissionController::new(settings.presentation.clone());
            controller.select_file(file);
            let state = controller.submit(&transport, timeout).await;

            print!("{}", output::render_for(controller.view(), json)?);

            Ok(match state {
                SubmissionState::Done(SubmissionOutcome::Succeeded) => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        Command::Health => {
            let health = transport
                .check_health()
                .await
                .with_context(|| format!("backend at {} is unreachable", settings.backend_url))?;
            println!(
                "{}: {}",
                normalize_backend_url(&settings.backend_url),
                health.status
            );
            Ok(if health.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
