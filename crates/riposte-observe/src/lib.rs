//! Observability support for Riposte.
//!
//! Tracing subscriber initialization (structured fmt logging plus an
//! optional OpenTelemetry stdout exporter) and the OTel GenAI semantic
//! convention attribute names used to instrument generation calls.

pub mod genai_attrs;
pub mod tracing_setup;

pub use tracing_setup::{init_tracing, shutdown_tracing};
