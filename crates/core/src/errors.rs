/// Result type alias for lapse operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for lapse operations
///
/// Absence of a key or of a reclaimed value is never an error: lookups
/// report it through `Ok(None)` / `Ok(false)` results. The variants below
/// cover the genuinely exceptional conditions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An operation was invoked on a cache that has already been disposed
    #[error("cache already disposed: cannot {operation}")]
    AlreadyDisposed { operation: &'static str },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

// Helper methods for creating errors with context
impl Error {
    /// Create an already-disposed error for the named operation
    #[must_use]
    pub fn already_disposed(operation: &'static str) -> Self {
        Error::AlreadyDisposed { operation }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_operation() {
        let err = Error::already_disposed("try_get");
        assert_eq!(err.to_string(), "cache already disposed: cannot try_get");
    }

    #[test]
    fn display_includes_configuration_message() {
        let err = Error::configuration("weak_eviction_threshold must be non-zero");
        assert!(err.to_string().starts_with("configuration error:"));
    }
}
