//! LLM-backed advisory text: prompt construction over a pluggable client.

use async_trait::async_trait;

use crate::advisory::{AdvisoryError, AdvisoryService};

/// Trait for calling an LLM to get a text completion.
///
/// Implementations handle the specifics of the LLM API; [`LlmAdvisory`]
/// handles prompt construction.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single user prompt and get the text response.
    async fn complete(&self, prompt: &str) -> Result<String, AdvisoryError>;
}

/// An [`AdvisoryService`] that phrases each request as an LLM prompt.
pub struct LlmAdvisory<C: LlmClient> {
    client: C,
}

impl<C: LlmClient> LlmAdvisory<C> {
    pub fn new(client: C) -> Self {
        LlmAdvisory { client }
    }
}

#[async_trait]
impl<C: LlmClient> AdvisoryService for LlmAdvisory<C> {
    async fn explain(&self, raw_command: &str) -> Result<String, AdvisoryError> {
        let prompt = format!(
            "Explain this booking system command in simple terms:\n\
             Command: \"{}\"\n\
             Respond with just 1 sentence explaining what the user wants to do, nothing more.",
            raw_command
        );
        self.client.complete(&prompt).await
    }

    async fn event_listing(&self, resource: &str) -> Result<String, AdvisoryError> {
        let prompt = format!(
            "Generate 5 realistic examples of upcoming {} events in Jamaica with these details:\n\
             - Event name\n\
             - Date and time\n\
             - Location in Jamaica\n\
             - Available tickets\n\
             - Price range\n\
             Format as: \"1. [Name] - [Date] at [Time] in [Location] ([Ticket info], [Price range])\"",
            resource
        );
        self.client.complete(&prompt).await
    }

    async fn quota_warning(
        &self,
        person: &str,
        resource: &str,
        have: u32,
        want: u32,
        limit: u32,
    ) -> Result<String, AdvisoryError> {
        let prompt = format!(
            "Customer {} has {} {} tickets and wants {} more (limit {}).\n\
             Create a polite warning explaining the limit in 2 sentences max.",
            person, have, resource, want, limit
        );
        self.client.complete(&prompt).await
    }
}

// -- AnthropicClient (feature-gated) --

#[cfg(feature = "anthropic")]
/// [`LlmClient`] backed by the Anthropic Messages API.
///
/// HTTP is synchronous (`ureq`) and kept off the async runtime.
pub struct AnthropicClient {
    pub api_key: String,
    /// Defaults to https://api.anthropic.com; overridable for tests.
    pub base_url: String,
    pub model: String,
}

#[cfg(feature = "anthropic")]
impl AnthropicClient {
    pub const DEFAULT_MODEL: &'static str = "claude-sonnet-4-20250514";

    /// Reads the key from `ANTHROPIC_API_KEY`; `NotConfigured` when unset,
    /// which callers treat as "run with fallback text".
    pub fn from_env() -> Result<Self, AdvisoryError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| AdvisoryError::NotConfigured)?;
        Ok(Self::new(api_key))
    }

    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: "https://api.anthropic.com".to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
        }
    }
}

#[cfg(feature = "anthropic")]
#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String, AdvisoryError> {
        let api_key = self.api_key.clone();
        let base_url = self.base_url.clone();

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": 1024,
            "messages": [{ "role": "user", "content": prompt }],
        });

        // ureq is blocking; keep it off the async worker threads.
        let result: Result<String, AdvisoryError> = tokio::task::spawn_blocking(move || {
            let url = format!("{}/v1/messages", base_url);
            let agent = ureq::Agent::new_with_defaults();
            let response = agent
                .post(&url)
                .header("x-api-key", &api_key)
                .header("anthropic-version", "2023-06-01")
                .header("content-type", "application/json")
                .send_json(body);

            match response {
                Ok(resp) => {
                    let json: serde_json::Value = resp.into_body().read_json().map_err(|e| {
                        AdvisoryError::Parse(format!("failed to parse Anthropic response: {}", e))
                    })?;
                    // The reply text lives at content[0].text.
                    json["content"]
                        .as_array()
                        .and_then(|arr| arr.first())
                        .and_then(|c| c["text"].as_str())
                        .map(|s| s.to_string())
                        .ok_or_else(|| {
                            AdvisoryError::Parse(
                                "no text content in Anthropic response".to_string(),
                            )
                        })
                }
                Err(e) => Err(AdvisoryError::Network(e.to_string())),
            }
        })
        .await
        .map_err(|e| AdvisoryError::Network(format!("task join error: {}", e)))?;

        result
    }
}
