//! HTTP adapter for the assistant service
//!
//! - [`gateway`]: [`HttpChatGateway`], the `reqwest`-backed [`ChatGateway`](teachmewow_application::ChatGateway)
//! - [`error`]: adapter errors, mapped into the port's `GatewayError`

pub mod error;
pub mod gateway;

pub use error::HttpError;
pub use gateway::{ChatEndpoint, HttpChatGateway};
