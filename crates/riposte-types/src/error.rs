use thiserror::Error;

/// Request validation failures.
///
/// Display strings are the wire `error` values for 400 responses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Message is required")]
    EmptyMessage,

    #[error("Invalid persona")]
    UnknownPersona(String),

    #[error("Invalid chat ID")]
    UnknownChat(String),
}

/// Errors from exchange memory operations (used by trait definitions in
/// riposte-core).
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("vector store error: {0}")]
    Store(String),

    #[error("embedding error: {0}")]
    Embedding(String),

    #[error("exchange not found")]
    NotFound,
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config read error: {0}")]
    Read(String),

    #[error("config parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_wire_strings() {
        assert_eq!(ValidationError::EmptyMessage.to_string(), "Message is required");
        assert_eq!(
            ValidationError::UnknownPersona("The Ghost".to_string()).to_string(),
            "Invalid persona"
        );
        assert_eq!(
            ValidationError::UnknownChat("Nemo".to_string()).to_string(),
            "Invalid chat ID"
        );
    }

    #[test]
    fn test_memory_error_display() {
        let err = MemoryError::Store("table missing".to_string());
        assert_eq!(err.to_string(), "vector store error: table missing");
    }
}
