//! HTTP request handlers.

pub mod generate;
pub mod index;
pub mod memory;
pub mod persona;
