//! Gemini generateContent provider implementation.
//!
//! This module provides the [`GeminiClient`] which implements the
//! [`ReplyGenerator`](riposte_core::generate::ReplyGenerator) trait for
//! the Gemini REST API (non-streaming `generateContent` only).

pub mod client;
pub mod types;

pub use client::GeminiClient;
