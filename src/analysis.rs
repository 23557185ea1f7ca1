//! Symptom analysis: one round trip to the generation gateway, then
//! interpretation of the reply.
//!
//! A gateway failure aborts the whole analysis. There is no partial
//! result: either the caller gets a reply plus its interpretation, or an
//! `AnalysisError`.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::gateway::{ChatCompletion, GatewayError, SYSTEM_PROMPT};
use crate::interpreter::{interpret, Interpretation};
use crate::models::{ChatTurn, SeverityLevel};

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("AI gateway is not configured: {0}")]
    NotConfigured(String),

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Payment required. Please add credits to your workspace.")]
    PaymentRequired,

    /// Any other upstream failure. The detail is for logs only.
    #[error("AI gateway error")]
    Gateway(String),
}

impl From<GatewayError> for AnalysisError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::MissingApiKey => AnalysisError::NotConfigured(err.to_string()),
            GatewayError::RateLimited => AnalysisError::RateLimited,
            GatewayError::PaymentRequired => AnalysisError::PaymentRequired,
            other => AnalysisError::Gateway(other.to_string()),
        }
    }
}

/// Reply text plus the fields interpreted from it.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub response: String,
    #[serde(flatten)]
    pub interpretation: Interpretation,
}

/// Runs analyses against an injected generation backend.
#[derive(Clone)]
pub struct HealthAnalyzer {
    generator: Arc<dyn ChatCompletion>,
}

impl HealthAnalyzer {
    pub fn new(generator: Arc<dyn ChatCompletion>) -> Self {
        Self { generator }
    }

    /// Append `new_turn` to the conversation so far and analyze the result.
    pub async fn analyze(
        &self,
        history: &[ChatTurn],
        new_turn: ChatTurn,
        severity: SeverityLevel,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let mut turns = Vec::with_capacity(history.len() + 1);
        turns.extend_from_slice(history);
        turns.push(new_turn);
        self.analyze_conversation(&turns, severity).await
    }

    /// Analyze a conversation whose newest user turn is already last.
    pub async fn analyze_conversation(
        &self,
        turns: &[ChatTurn],
        severity: SeverityLevel,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        let response = self
            .generator
            .complete(SYSTEM_PROMPT, turns)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Generation failed, analysis aborted");
                AnalysisError::from(e)
            })?;

        let interpretation = interpret(&response, severity);
        tracing::info!(
            emergency = interpretation.emergency,
            diseases = interpretation.diseases.len(),
            "Analysis complete"
        );

        Ok(AnalysisOutcome {
            response,
            interpretation,
        })
    }
}
