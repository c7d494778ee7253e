//! Chat gateway port
//!
//! Defines the interface for talking to the assistant service.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use teachmewow_domain::ChatRequest;
use thiserror::Error;

/// Errors that can occur during chat gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("API error: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Raw reply body: chunks of bytes in arrival order, with no alignment to
/// record boundaries. An `Err` item means the transport broke mid-stream.
pub type ByteStream = BoxStream<'static, Result<Vec<u8>, GatewayError>>;

/// Body of the service's health endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Gateway to the assistant service
///
/// This port defines how the application layer reaches the chat endpoint.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send one chat turn and return the streaming reply body.
    ///
    /// Fails without yielding a stream when the request cannot be sent or the
    /// service answers with a non-success status.
    async fn open_stream(&self, request: &ChatRequest) -> Result<ByteStream, GatewayError>;

    /// Probe the service's health endpoint.
    async fn health(&self) -> Result<HealthStatus, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display_matches_widget_wording() {
        let error = GatewayError::HttpStatus {
            status: 500,
            reason: "Internal Server Error".to_string(),
        };
        assert_eq!(error.to_string(), "API error: 500 Internal Server Error");
    }

    #[test]
    fn test_health_status() {
        let healthy: HealthStatus = serde_json::from_str(r#"{"status":"healthy"}"#).unwrap();
        assert!(healthy.is_healthy());
        assert!(!HealthStatus { status: "degraded".to_string() }.is_healthy());
    }
}
