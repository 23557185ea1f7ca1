//! Outbound text-generation gateway.
//!
//! `ChatCompletion` is the seam between analysis and the network:
//! `GatewayClient` talks to an OpenAI-compatible endpoint, tests plug in
//! canned replies.

pub mod client;
pub mod prompt;

pub use client::GatewayClient;
pub use prompt::SYSTEM_PROMPT;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::ChatTurn;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{} is not configured", crate::config::env::API_KEY)]
    MissingApiKey,

    #[error("Gateway rate limit exceeded")]
    RateLimited,

    #[error("Gateway requires payment")]
    PaymentRequired,

    #[error("Gateway returned error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),
}

/// One-shot chat completion: a system instruction plus ordered turns in,
/// one reply out.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, system: &str, turns: &[ChatTurn]) -> Result<String, GatewayError>;
}
