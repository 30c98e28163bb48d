//! # Submission Transport
//!
//! Sends booking payloads to the restaurant backend.
//!
//! The backend endpoints are opaque: all the flow relies on is the reply
//! shape `{ "success": bool, "message"?: string }`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::BookingConfig;
use crate::error::{BookingError, BookingResult};
use crate::payload::BookingPayload;

/// Reply from a booking endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl SubmissionResponse {
    pub fn accepted() -> Self {
        SubmissionResponse {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        SubmissionResponse {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Delivers a booking to whatever records it.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(&self, payload: &BookingPayload) -> BookingResult<SubmissionResponse>;
}

// =============================================================================
// HTTP Transport
// =============================================================================

/// Posts bookings as JSON to the PHP endpoints.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: BookingConfig,
}

impl HttpTransport {
    /// Creates a transport for the configured backend.
    pub fn new(config: BookingConfig) -> BookingResult<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| BookingError::InvalidConfig(e.to_string()))?;

        Ok(HttpTransport { client, config })
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn submit(&self, payload: &BookingPayload) -> BookingResult<SubmissionResponse> {
        let url = self.config.endpoint_url(&payload.kind())?;
        debug!(%url, "Posting booking");

        let response = self
            .client
            .post(url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BookingError::Timeout(self.config.api.timeout_secs)
                } else {
                    BookingError::from(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Booking endpoint returned an error status");
            return Err(BookingError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<SubmissionResponse>(&body)
            .map_err(|e| BookingError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let ok: SubmissionResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(ok, SubmissionResponse::accepted());

        let rejected: SubmissionResponse =
            serde_json::from_str(r#"{"success": false, "message": "Table already booked"}"#).unwrap();
        assert_eq!(rejected, SubmissionResponse::rejected("Table already booked"));
    }

    #[test]
    fn test_http_transport_rejects_invalid_config() {
        let mut config = BookingConfig::default();
        config.api.base_url = "ws://localhost".to_string();
        assert!(HttpTransport::new(config).unwrap_err().is_config_error());
    }

    #[test]
    fn test_http_transport_builds_with_defaults() {
        let transport = HttpTransport::new(BookingConfig::default()).unwrap();
        assert_eq!(transport.config().api.timeout_secs, 10);
    }
}
