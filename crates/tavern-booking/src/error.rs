//! # Booking Error Types
//!
//! Error types for the booking flow.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Booking Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Domain              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Connection     │  │  Core (incomplete       │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │   booking, validation)  │ │
//! │  │  Load / Save    │  │  HttpStatus     │  │                         │ │
//! │  │                 │  │  InvalidResp.   │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A backend reply of `{"success": false}` is not an error at this level; it
//! is a normal [`crate::transport::SubmissionResponse`].

use tavern_core::CoreError;
use thiserror::Error;

/// Result type alias for booking operations.
pub type BookingResult<T> = Result<T, BookingError>;

/// Errors raised while configuring or submitting bookings.
#[derive(Debug, Error)]
pub enum BookingError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid booking configuration.
    #[error("Invalid booking configuration: {0}")]
    InvalidConfig(String),

    /// Invalid backend URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Could not reach the backend.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Backend did not answer in time.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Backend answered with a non-success HTTP status.
    #[error("Backend returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// Backend body was not the expected JSON.
    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),

    /// Failed to serialize a payload.
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Booking rule or validation failure.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for BookingError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            BookingError::HttpStatus {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            BookingError::InvalidResponse(err.to_string())
        } else {
            BookingError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::SerializationFailed(err.to_string())
    }
}

impl From<url::ParseError> for BookingError {
    fn from(err: url::ParseError) -> Self {
        BookingError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for BookingError {
    fn from(err: std::io::Error) -> Self {
        BookingError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for BookingError {
    fn from(err: toml::de::Error) -> Self {
        BookingError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for BookingError {
    fn from(err: toml::ser::Error) -> Self {
        BookingError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl BookingError {
    /// Returns true if resubmitting the same booking might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            BookingError::ConnectionFailed(_) | BookingError::Timeout(_) => true,
            BookingError::HttpStatus { status } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BookingError::InvalidConfig(_)
                | BookingError::InvalidUrl(_)
                | BookingError::ConfigLoadFailed(_)
                | BookingError::ConfigSaveFailed(_)
        )
    }
}
