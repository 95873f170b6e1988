//! Persona types for Riposte.
//!
//! A persona is an immutable voice definition: the system-instruction text
//! that shapes how replies sound, plus a short description shown in the UI.

use serde::{Deserialize, Serialize};

/// An immutable reply persona.
///
/// `voice` is the system-instruction fragment sent to the model verbatim.
/// `description` is display text for listings; it never reaches the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub voice: String,
    pub description: String,
}

impl Persona {
    pub fn new(
        name: impl Into<String>,
        voice: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            voice: voice.into(),
            description: description.into(),
        }
    }
}

/// A persona entry as exposed by the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaSummary {
    pub name: String,
    pub description: String,
}

impl From<&Persona> for PersonaSummary {
    fn from(persona: &Persona) -> Self {
        Self {
            name: persona.name.clone(),
            description: persona.description.clone(),
        }
    }
}
