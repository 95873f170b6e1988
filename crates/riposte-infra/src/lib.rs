//! Infrastructure layer for Riposte.
//!
//! Contains implementations of the capability traits defined in
//! `riposte-core`: the Gemini HTTP client, the LanceDB-backed exchange
//! store with fastembed embeddings, and configuration/filesystem helpers.

pub mod config;
pub mod filesystem;
pub mod gemini;
pub mod secret;
pub mod vector;
