//! HTTP adapter for the chat gateway port
//!
//! Posts one chat turn to the assistant service and hands back the raw
//! `text/event-stream` body. Record framing is left to the domain decoder.

use super::error::{HttpError, Result};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response, Url};
use std::time::Duration;
use teachmewow_application::{ByteStream, ChatGateway, GatewayError, HealthStatus};
use teachmewow_domain::ChatRequest;
use tracing::{debug, info};

/// Path of the streaming chat route, relative to the API prefix.
pub const CHAT_STREAM_PATH: &str = "/agent/chat/stream";

/// Path of the health probe, relative to the base URL.
pub const HEALTH_PATH: &str = "/health";

/// Resolved service URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEndpoint {
    stream_url: Url,
    health_url: Url,
}

impl ChatEndpoint {
    /// Build from a base URL (`http://localhost:8000`) and an API prefix
    /// (`/api/v1`).
    pub fn new(base_url: &str, api_prefix: &str) -> Result<Self> {
        let base = base_url.trim_end_matches('/');
        let prefix = api_prefix.trim_end_matches('/');
        Ok(Self {
            stream_url: parse_url(&format!("{base}{prefix}{CHAT_STREAM_PATH}"))?,
            health_url: parse_url(&format!("{base}{HEALTH_PATH}"))?,
        })
    }

    pub fn stream_url(&self) -> &Url {
        &self.stream_url
    }

    pub fn health_url(&self) -> &Url {
        &self.health_url
    }
}

fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(HttpError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// Chat gateway backed by `reqwest`
///
/// Only establishing the connection can time out. Once the reply starts
/// streaming it may take as long as the service needs.
pub struct HttpChatGateway {
    client: Client,
    endpoint: ChatEndpoint,
}

impl HttpChatGateway {
    pub fn new(endpoint: ChatEndpoint, connect_timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build().map_err(HttpError::ClientBuild)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &ChatEndpoint {
        &self.endpoint
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<Response> {
        debug!("POST {}", self.endpoint.stream_url);
        let response = self
            .client
            .post(self.endpoint.stream_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/event-stream")
            .json(request)
            .send()
            .await
            .map_err(HttpError::Request)?;
        check_status(response)
    }

    async fn fetch_health(&self) -> Result<HealthStatus> {
        let response = self
            .client
            .get(self.endpoint.health_url.clone())
            .send()
            .await
            .map_err(HttpError::Request)?;
        check_status(response)?
            .json::<HealthStatus>()
            .await
            .map_err(HttpError::Decode)
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(HttpError::Status { status })
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn open_stream(
        &self,
        request: &ChatRequest,
    ) -> std::result::Result<ByteStream, GatewayError> {
        let response = self.send_chat(request).await?;
        info!(
            "Reply stream opened ({})",
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("no content type")
        );

        let stream = response
            .bytes_stream()
            .map(|chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(|e| GatewayError::from(HttpError::Body(e)))
            })
            .boxed();
        Ok(stream)
    }

    async fn health(&self) -> std::result::Result<HealthStatus, GatewayError> {
        Ok(self.fetch_health().await?)
    }
}
