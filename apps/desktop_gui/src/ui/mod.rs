//! UI layer for desktop GUI: app shell and report panel.

pub mod app;

pub use app::{AnalyzerApp, StartupConfig};
