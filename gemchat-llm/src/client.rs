use std::fmt;

use anyhow::Context as _;
use gemchat_store::Message;
use gemchat_utils::env::env_string;
use reqwest::Client;
use tracing::{debug, error};

use crate::error::GenerateError;
use crate::wire::{GenerateRequest, GenerateResponse};

pub const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

/// Single user turn sent by [`GeminiClient::probe`].
pub const PROBE_PROMPT: &str = "Hello, are you working?";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Build from `GEMINI_API_KEY` (required) and `GEMINI_API_URL`.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env_string("GEMINI_API_KEY").context("GEMINI_API_KEY is not set")?;
        let endpoint = env_string("GEMINI_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        Ok(Self::new(api_key, endpoint))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send the whole history as context and return the reply text.
    pub async fn generate(&self, history: &[Message]) -> Result<String, GenerateError> {
        let request = GenerateRequest::from_history(history);
        debug!(turns = history.len(), "sending generateContent request");

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::RequestFailed {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
            });
        }

        let body = response.bytes().await?;
        let parsed: GenerateResponse =
            serde_json::from_slice(&body).map_err(|_| GenerateError::MalformedResponse)?;

        parsed
            .into_reply_text()
            .ok_or(GenerateError::MalformedResponse)
    }

    /// Check that the endpoint accepts our key. Never fails; problems are logged.
    pub async fn probe(&self) -> bool {
        let probe_turn = [Message::user(PROBE_PROMPT)];
        let request = GenerateRequest::from_history(&probe_turn);

        let response = match self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(source) => {
                error!(?source, context = "probe", "API key test error");
                return false;
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %body, context = "probe", "API key test failed");
            return false;
        }

        true
    }
}
