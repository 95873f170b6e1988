//! Business logic services (use cases).
//!
//! Services orchestrate store, generator, and registry calls. They depend
//! on traits (ports) -- never on concrete infrastructure implementations.

pub mod reply;
