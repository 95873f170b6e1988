//! Shared domain types for Riposte.
//!
//! This crate contains the core domain types used across the Riposte service:
//! Persona, ChatId, ExchangeRecord, Stance, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod exchange;
pub mod generate;
pub mod persona;
pub mod stance;
