//! Stance types for Riposte.
//!
//! The stance is the caller-requested agreement posture for a generated
//! reply. `Agree` and `Disagree` are the well-known values; anything else
//! flows through as a custom label so the directive text still renders.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Requested agreement posture for a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Stance {
    Agree,
    Disagree,
    /// Any label outside the well-known set, preserved verbatim.
    Custom(String),
}

impl Stance {
    /// The uppercased form used in the prompt directive
    /// (e.g. "Your response MUST AGREE with the user's message.").
    pub fn directive_label(&self) -> String {
        match self {
            Stance::Agree => "AGREE".to_string(),
            Stance::Disagree => "DISAGREE".to_string(),
            Stance::Custom(label) => label.to_uppercase(),
        }
    }
}

impl Default for Stance {
    fn default() -> Self {
        Stance::Agree
    }
}

impl fmt::Display for Stance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stance::Agree => write!(f, "Agree"),
            Stance::Disagree => write!(f, "Disagree"),
            Stance::Custom(label) => write!(f, "{label}"),
        }
    }
}

impl FromStr for Stance {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "agree" => Stance::Agree,
            "disagree" => Stance::Disagree,
            _ => Stance::Custom(s.to_string()),
        })
    }
}

impl From<String> for Stance {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(Stance::Agree)
    }
}

impl From<Stance> for String {
    fn from(stance: Stance) -> Self {
        stance.to_string()
    }
}
