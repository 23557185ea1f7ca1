use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{ChatCompletion, GatewayError};
use crate::config::GatewayConfig;
use crate::models::ChatTurn;

/// HTTP client for an OpenAI-compatible chat-completions gateway.
///
/// No retries and no timeout beyond reqwest's defaults: a request either
/// completes or fails once.
pub struct GatewayClient {
    config: GatewayConfig,
    client: reqwest::Client,
}

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Request body for `/v1/chat/completions`
#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response body from `/v1/chat/completions`
#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[async_trait]
impl ChatCompletion for GatewayClient {
    async fn complete(&self, system: &str, turns: &[ChatTurn]) -> Result<String, GatewayError> {
        // Checked before anything touches the network.
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingApiKey)?;

        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(WireMessage {
            role: "system",
            content: system,
        });
        messages.extend(turns.iter().map(|t| WireMessage {
            role: t.role.as_str(),
            content: &t.content,
        }));

        let body = CompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::HttpClient(e.to_string()))?;

        let status = response.status();
        match status {
            StatusCode::TOO_MANY_REQUESTS => return Err(GatewayError::RateLimited),
            StatusCode::PAYMENT_REQUIRED => return Err(GatewayError::PaymentRequired),
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                tracing::error!(status = s.as_u16(), %body, "AI gateway error");
                return Err(GatewayError::Upstream {
                    status: s.as_u16(),
                    body,
                });
            }
            _ => {}
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GatewayError::MalformedResponse("no message content in choices".into()))
    }
}
