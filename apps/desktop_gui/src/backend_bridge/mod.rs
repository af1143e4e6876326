//! Worker thread that owns the async runtime and the HTTP transport.

pub mod commands;
pub mod runtime;
