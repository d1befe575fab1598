//! OpenRouter API client

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ai::provider::CompletionProvider;
use crate::core::config::Config;
use crate::error::{FlownameError, Result};

/// OpenRouter chat-completions client
///
/// Makes exactly one request per call. There is no retry and no timeout
/// beyond the reqwest defaults.
pub struct OpenRouterClient {
    client: Client,
    api_key: Option<SecretString>,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    app_title: String,
    referer: Option<String>,
}

impl OpenRouterClient {
    /// Create a new OpenRouter client
    ///
    /// A missing key is not an error here; it is reported on the first call
    /// so that the server can still start and answer with a JSON error.
    pub fn new(config: &Config, api_key: Option<SecretString>) -> Result<Self> {
        let mut builder = Client::builder();
        // Local endpoints (tests, self-hosted gateways) must not go through a system proxy
        if config.api_base_is_loopback() {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            api_key,
            endpoint: config.completions_url(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            app_title: config.app_title.clone(),
            referer: config.referer.clone(),
        })
    }

    fn headers(&self, api_key: &SecretString) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|_| FlownameError::Config("API key contains invalid characters".into()))?;
        headers.insert(AUTHORIZATION, bearer);

        if let Ok(title) = HeaderValue::from_str(&self.app_title) {
            headers.insert("X-Title", title);
        }
        if let Some(referer) = self.referer.as_deref() {
            if let Ok(value) = HeaderValue::from_str(referer) {
                headers.insert("HTTP-Referer", value);
            }
        }

        Ok(headers)
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or(FlownameError::NotConfigured)?;

        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers(api_key)?)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = upstream_error_message(status.as_u16(), &body);
            warn!(status = status.as_u16(), %message, "OpenRouter API error");
            return Err(FlownameError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        extract_content(&body).ok_or_else(|| {
            warn!(body_chars = body.len(), "OpenRouter response had no completion text");
            FlownameError::EmptyResponse
        })
    }
}

/// Pick the provider's own message out of an error body
///
/// OpenRouter answers `{"error": {"message": ...}}`; anything else is passed
/// through as raw text.
fn upstream_error_message(status: u16, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if let Some(message) = envelope
            .error
            .and_then(|e| e.message)
            .filter(|m| !m.trim().is_empty())
        {
            return message;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("API request failed: {}", status)
    } else {
        trimmed.to_string()
    }
}

/// First choice's message content, if present and not blank
fn extract_content(body: &str) -> Option<String> {
    let parsed: ChatCompletionResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Failed to parse chat completion response: {}", e);
            return None;
        }
    };

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|content| !content.trim().is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// OpenRouter API Request/Response types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: Option<String>,
}
