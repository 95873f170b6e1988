//! HTTP layer for Riposte.
//!
//! Axum routes with CORS and request tracing. Every JSON response uses the
//! `{"success": ..., ...}` envelope the chat UI expects.

pub mod error;
pub mod handlers;
pub mod router;
