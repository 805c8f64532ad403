//! Narrative generation for the inspection report.
//!
//! Two affordances: a prose summary of the whole record, and a handful of
//! alternative phrasings for a piece of text the inspector wrote. Callers
//! that build a report must never fail because the model did; use
//! [`or_warning`] to turn an error into text that stands in for the prose.

use std::future::Future;
use std::time::Duration;

use aws_sdk_bedrockruntime::Client;
use tracing::{info, warn};
use uuid::Uuid;

use crate::context::build_user_message;
use crate::converse::invoke_converse;
use crate::error::BedrockError;

const SUMMARY_SYSTEM_PROMPT: &str = "\
You write the summary section of a field inspection report for a gas \
pipeline crossing at a bridge. Use only the facts in the inspection record. \
Write plain prose in the third person without headings or lists.";

const IMPROVE_SYSTEM_PROMPT: &str = "\
You edit text written by a field inspector. Return exactly three improved \
phrasings of the given text as a JSON array of strings, with no other output. \
Keep every technical fact unchanged.";

/// Default request timeout for a single model call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The external text-generation collaborator.
pub trait NarrativeService: Send + Sync {
    /// Generate prose from an instruction and the flattened record.
    fn generate(
        &self,
        instruction: &str,
        narrative: &str,
    ) -> impl Future<Output = Result<String, BedrockError>> + Send;

    /// Alternative phrasings of `text`, best first.
    fn improve(&self, text: &str) -> impl Future<Output = Result<Vec<String>, BedrockError>> + Send;
}

/// [`NarrativeService`] backed by a Bedrock model.
pub struct BedrockNarrator {
    client: Client,
    model_id: String,
    timeout: Duration,
}

impl BedrockNarrator {
    pub fn new(config: &aws_config::SdkConfig, model_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            model_id: model_id.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn call(&self, system_prompt: &str, user_message: &str) -> Result<String, BedrockError> {
        let call_id = Uuid::new_v4();
        info!(call_id = %call_id, model = %self.model_id, "invoking narrative model");

        let (text, usage) = tokio::time::timeout(
            self.timeout,
            invoke_converse(&self.client, &self.model_id, system_prompt, user_message),
        )
        .await
        .map_err(|_| BedrockError::Timeout(self.timeout))??;

        info!(
            call_id = %call_id,
            input_tokens = usage.input,
            output_tokens = usage.output,
            "narrative model responded"
        );
        Ok(text)
    }
}

impl NarrativeService for BedrockNarrator {
    async fn generate(&self, instruction: &str, narrative: &str) -> Result<String, BedrockError> {
        let message = build_user_message(instruction, narrative);
        let text = self.call(SUMMARY_SYSTEM_PROMPT, &message).await?;
        Ok(text.trim().to_string())
    }

    async fn improve(&self, text: &str) -> Result<Vec<String>, BedrockError> {
        let reply = self.call(IMPROVE_SYSTEM_PROMPT, text).await?;
        parse_alternatives(&reply)
    }
}

/// Parse a reply that should be a JSON array of strings, optionally inside
/// a fenced code block. Blank entries are dropped.
pub fn parse_alternatives(reply: &str) -> Result<Vec<String>, BedrockError> {
    let trimmed = reply.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    let items: Vec<String> = serde_json::from_str(body).map_err(|e| {
        BedrockError::SchemaViolation(format!("expected a JSON array of strings: {e}"))
    })?;

    let items: Vec<String> = items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if items.is_empty() {
        return Err(BedrockError::SchemaViolation(
            "no alternatives returned".to_string(),
        ));
    }
    Ok(items)
}

/// Unwrap generated text, or substitute a visible warning for it.
pub fn or_warning(result: Result<String, BedrockError>, context: &str) -> String {
    match result {
        Ok(text) => text,
        Err(e) => {
            warn!(context, error = %e, "narrative generation failed");
            format!("[Warning: {context} could not be generated ({e}). Please review and complete manually.]")
        }
    }
}
