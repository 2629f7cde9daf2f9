//! Error types for the throttling core

use thiserror::Error;

/// Throttling core errors
#[derive(Error, Debug)]
pub enum ThrottleError {
    /// The configured inter-call floor is negative
    #[error("Minimum request interval must not be negative, got {0}ms")]
    NegativeInterval(i64),
}

/// Result type for throttling operations
pub type Result<T> = std::result::Result<T, ThrottleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ThrottleError::NegativeInterval(-5);
        assert_eq!(
            error.to_string(),
            "Minimum request interval must not be negative, got -5ms"
        );
    }
}
