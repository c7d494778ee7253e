//! Error types for the HTTP chat adapter

use reqwest::StatusCode;
use teachmewow_application::GatewayError;
use thiserror::Error;

/// Result type alias for HTTP adapter operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// Errors that can occur when talking to the assistant service over HTTP
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("API error: {} {}", .status.as_u16(), .status.canonical_reason().unwrap_or(""))]
    Status { status: StatusCode },

    #[error("Response body error: {0}")]
    Body(#[source] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl From<HttpError> for GatewayError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::InvalidUrl { .. } | HttpError::ClientBuild(_) => {
                GatewayError::InvalidEndpoint(error.to_string())
            }
            HttpError::Request(e) if e.is_timeout() => GatewayError::Timeout,
            HttpError::Request(e) => GatewayError::ConnectionError(e.to_string()),
            HttpError::Status { status } => GatewayError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            },
            HttpError::Body(e) if e.is_timeout() => GatewayError::Timeout,
            HttpError::Body(e) => GatewayError::StreamError(e.to_string()),
            HttpError::Decode(e) => GatewayError::Other(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_maps_to_canonical_reason() {
        let error = HttpError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(error.to_string(), "API error: 503 Service Unavailable");
        assert_eq!(
            GatewayError::from(error),
            GatewayError::HttpStatus {
                status: 503,
                reason: "Service Unavailable".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_url_maps_to_invalid_endpoint() {
        let error = HttpError::InvalidUrl {
            url: "localhost:8000".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert!(matches!(
            GatewayError::from(error),
            GatewayError::InvalidEndpoint(msg) if msg.contains("localhost:8000")
        ));
    }
}
