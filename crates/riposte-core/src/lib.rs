//! Business logic and capability trait definitions for Riposte.
//!
//! This crate defines the "ports" (store, embedder, and generator traits)
//! that the infrastructure layer implements, plus the pure reply pipeline:
//! persona roster, chat registry, context recall, prompt composition,
//! reply sanitization, and the orchestrating service. It depends only on
//! `riposte-types` -- never on `riposte-infra` or any network/IO crate.

pub mod chat;
pub mod generate;
pub mod memory;
pub mod persona;
pub mod prompt;
pub mod sanitize;
pub mod service;
