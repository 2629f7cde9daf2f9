//! Error types for the Drive provider

use thiserror::Error;

/// Drive provider errors
#[derive(Error, Debug)]
pub enum DriveError {
    /// API request returned an error status
    #[error("Drive API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// Failed to parse API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Throttling executor rejected its configuration
    #[error(transparent)]
    Throttle(#[from] core_throttle::ThrottleError),

    /// Bridge error
    #[error(transparent)]
    BridgeError(#[from] bridge_traits::error::BridgeError),
}

/// Result type for Drive operations
pub type Result<T> = std::result::Result<T, DriveError>;

impl From<DriveError> for bridge_traits::error::BridgeError {
    fn from(error: DriveError) -> Self {
        match error {
            DriveError::ApiError {
                status_code,
                message,
            } => bridge_traits::error::BridgeError::OperationFailed(format!(
                "API error (status {}): {}",
                status_code, message
            )),
            DriveError::ParseError(msg) => {
                bridge_traits::error::BridgeError::OperationFailed(format!("Parse error: {}", msg))
            }
            DriveError::Throttle(e) => {
                bridge_traits::error::BridgeError::OperationFailed(format!(
                    "Throttle configuration error: {}",
                    e
                ))
            }
            DriveError::BridgeError(e) => e,
        }
    }
}
