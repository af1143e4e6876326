use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use url::Url;

use crate::error::TransportError;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const MAX_TIMEOUT_SECS: u64 = 600;
const SETTINGS_FILE_NAME: &str = "rightscheck.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub backend_url: String,
    pub request_timeout_secs: u64,
    pub presentation: PresentationSettings,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.into(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            presentation: PresentationSettings::default(),
        }
    }
}

impl ClientSettings {
    /// Zero falls back to the default; anything else is clamped to 1..=600s.
    pub fn request_timeout(&self) -> Duration {
        let secs = match self.request_timeout_secs {
            0 => DEFAULT_TIMEOUT_SECS,
            secs => secs.min(MAX_TIMEOUT_SECS),
        };
        Duration::from_secs(secs)
    }
}

/// Wording and formatting knobs for the rendered report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationSettings {
    pub title_fallback: String,
    pub confidence_suffix: String,
    pub show_summary: bool,
    pub copyright_label: String,
    pub copyright_unavailable_label: String,
    pub ready_label: String,
    pub busy_label: String,
    pub busy_message: String,
    pub no_file_message: String,
    pub not_recognized_message: String,
    pub connectivity_message: String,
    pub unreadable_file_message: String,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            title_fallback: "Unknown".into(),
            confidence_suffix: "%".into(),
            show_summary: true,
            copyright_label: "Copyright details available below".into(),
            copyright_unavailable_label: "Copyright details unavailable".into(),
            ready_label: "Analyze".into(),
            busy_label: "Analyzing...".into(),
            busy_message: "Listening to the audio...".into(),
            no_file_message: "Please select an audio file first.".into(),
            not_recognized_message: "Song could not be recognized.".into(),
            connectivity_message: "Error connecting to the analysis backend. Is it running?"
                .into(),
            unreadable_file_message: "The selected audio file could not be read.".into(),
        }
    }
}

/// Defaults, then the settings file, then environment overrides.
pub fn load_settings(explicit_path: Option<&Path>) -> ClientSettings {
    let mut settings = match settings_file(explicit_path) {
        Some(path) => read_settings_file(&path),
        None => ClientSettings::default(),
    };
    apply_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn settings_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(SETTINGS_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("rightscheck").join("settings.toml"))
        .filter(|path| path.exists())
}

fn read_settings_file(path: &Path) -> ClientSettings {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(path = %path.display(), "settings: unable to read file, using defaults: {err}");
            return ClientSettings::default();
        }
    };

    match toml::from_str::<ClientSettings>(&raw) {
        Ok(settings) => {
            info!(path = %path.display(), "settings: loaded");
            settings
        }
        Err(err) => {
            warn!(path = %path.display(), "settings: invalid toml, using defaults: {err}");
            ClientSettings::default()
        }
    }
}

pub fn apply_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(v) = read("RIGHTSCHECK_BACKEND_URL") {
        settings.backend_url = v;
    }
    if let Some(v) = read("APP__BACKEND_URL") {
        settings.backend_url = v;
    }

    for name in ["RIGHTSCHECK_TIMEOUT_SECS", "APP__TIMEOUT_SECS"] {
        if let Some(v) = read(name) {
            match v.trim().parse::<u64>() {
                Ok(parsed) => settings.request_timeout_secs = parsed,
                Err(err) => warn!(variable = name, value = %v, "settings: ignoring timeout: {err}"),
            }
        }
    }
}

pub fn normalize_backend_url(raw_backend_url: &str) -> String {
    let raw_backend_url = raw_backend_url.trim();

    if raw_backend_url.is_empty() {
        return DEFAULT_BACKEND_URL.to_string();
    }

    let with_scheme = if raw_backend_url.contains("://") {
        raw_backend_url.to_string()
    } else {
        format!("http://{raw_backend_url}")
    };

    with_scheme.trim_end_matches('/').to_string()
}

pub fn parse_backend_url(raw_backend_url: &str) -> Result<Url, TransportError> {
    let normalized = normalize_backend_url(raw_backend_url);
    let invalid = |reason: String| TransportError::InvalidEndpoint {
        url: normalized.clone(),
        reason,
    };

    let url = Url::parse(&normalized).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(
            "query strings and fragments are not supported".to_string(),
        ));
    }
    Ok(url)
}

/// Joins a route onto the base, keeping any path prefix the base carries.
pub fn endpoint(base: &Url, route: &str) -> Result<Url, TransportError> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        route.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|err| TransportError::InvalidEndpoint {
        url: joined.clone(),
        reason: err.to_string(),
    })
}
