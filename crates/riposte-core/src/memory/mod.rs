//! Exchange memory for Riposte.
//!
//! This module defines the `ExchangeStore` and `Embedder` traits that the
//! infrastructure layer implements, the recall formatter that turns
//! similarity hits into prompt context, and the writer that inserts new
//! exchanges and enforces the per-chat cap.

pub mod embedder;
pub mod recall;
pub mod store;
pub mod writer;
