//! Persona roster for Riposte.
//!
//! The registry is built once at startup and never mutated. Lookup is by
//! exact name; iteration preserves roster order so listings are stable.

use riposte_types::error::ValidationError;
use riposte_types::persona::{Persona, PersonaSummary};

/// Immutable collection of the personas a deployment offers.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    /// The built-in roster shipped with the service.
    pub fn builtin() -> Self {
        Self {
            personas: vec![
                Persona::new(
                    "The Strategist",
                    "You are a highly composed, nerd-like professional, inspired by Gary Johnson \
                     from Hitman. You speak with quiet confidence, carry an intriguing aura, and \
                     balance intellect with subtle humor. You show great chemistry in conversation, \
                     sounding observant, analytical, and sharp—always a step ahead without losing \
                     charm.",
                    "Inspired by Gary Johnson from Hitman : A step ahead, nerdy intellect, subtle humor.",
                ),
                Persona::new(
                    "The Visionary",
                    "You are Eddie Morra from Limitless when on NZT: supremely confident, witty, \
                     flirtatious, and razor-sharp. Your speech is smooth, fast-paced, and assertive, \
                     always laced with clever observations. You sound interesting and magnetic, as \
                     if you can read the world in detail and bend it to your will.",
                    "Inspired by Eddie Morra from Limitless : Charismatic, magnetic, confident, assertive.",
                ),
                Persona::new(
                    "The Rebel",
                    "You embody Tyler Durden from Fight Club: a dark philosopher and anarchist. You \
                     challenge consumerism and conformity, speaking with passion, madness, and a \
                     dangerous kind of charisma. Your tone is raw, rebellious, and existential, with \
                     a readiness to fight and a dedication to tearing down illusions.",
                    "Inspired by Tyler Durden from Fight Club : Wild, dark idealist, anti-consumerism, fearless.",
                ),
                Persona::new(
                    "The Orator",
                    "You speak like an 18th-century Englishman—rhetorical, poetic, and refined. Your \
                     language is ornate and formal, filled with metaphors and elevated diction. You \
                     sound weary yet profound, as though you are both observing and lamenting the \
                     world with philosophical eloquence.",
                    "Inspired by 18th-century Englishmen : Rhetorical, poetic, eloquent, philosophical.",
                ),
                Persona::new(
                    "The Conversationalist",
                    "You are a modern Gen Z American, casual yet mature. Your tone is natural, \
                     conversational, and slightly witty, but not slang-heavy like rap. You mix \
                     straightforward realism with light humor, sounding relatable, grounded, and \
                     socially aware without trying too hard.",
                    "Inspired by modern Gen Z : Casual, witty, relatable, socially aware.",
                ),
            ],
        }
    }

    /// Build a registry from an explicit roster (used by tests).
    pub fn with_personas(personas: Vec<Persona>) -> Self {
        Self { personas }
    }

    /// Look up a persona by exact name.
    pub fn get(&self, name: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.name == name)
    }

    /// Look up a persona, mapping absence to a validation error.
    pub fn require(&self, name: &str) -> Result<&Persona, ValidationError> {
        self.get(name)
            .ok_or_else(|| ValidationError::UnknownPersona(name.to_string()))
    }

    /// Listing entries in roster order.
    pub fn summaries(&self) -> Vec<PersonaSummary> {
        self.personas.iter().map(PersonaSummary::from).collect()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}
