//! API key lookup for the generation provider.
//!
//! The key comes from the `GEMINI_API_KEY` environment variable. Absence
//! is not fatal at startup: the service boots without it and the generate
//! endpoint reports the missing key per request.

use secrecy::SecretString;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Read the Gemini API key from the environment.
///
/// Returns `None` when the variable is unset, empty, or not valid Unicode.
pub fn gemini_api_key() -> Option<SecretString> {
    match std::env::var(API_KEY_ENV) {
        Ok(val) if !val.is_empty() => Some(SecretString::from(val)),
        _ => None,
    }
}
