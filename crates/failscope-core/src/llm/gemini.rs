//! Google Gemini `generateContent` client

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::traits::SuggestionModel;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use std::future::Future;
use tracing::debug;

/// Connection settings for the Gemini API
#[derive(Clone)]
pub struct GeminiConfig {
    /// Key sent in the `x-goog-api-key` header
    pub api_key: String,
    /// API root, e.g. `https://generativelanguage.googleapis.com`
    pub base_url: String,
    /// Model name used in the request path
    pub model: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl From<&Settings> for GeminiConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            api_key: settings.gemini_api_key.clone(),
            base_url: settings.gemini_api_url.clone(),
            model: settings.gemini_model.clone(),
        }
    }
}

/// Gemini text-generation client
#[derive(Debug)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Create a client with its own connection pool
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Model this client talks to
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.config.api_key)
                .map_err(|_| Error::Config("GEMINI_API_KEY is not a valid header value".into()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn build_payload(prompt: &str) -> Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
        })
    }

    /// Concatenate the text parts of the first candidate
    fn parse_response(body: &Value) -> Result<String> {
        let parts = body
            .get("candidates")
            .and_then(|v| v.as_array())
            .and_then(|arr| arr.first())
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array());

        let text: Option<String> = parts.map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect()
        });

        match text {
            Some(text) if !text.is_empty() => Ok(text),
            _ => {
                let reason = body
                    .get("promptFeedback")
                    .and_then(|f| f.get("blockReason"))
                    .and_then(|r| r.as_str())
                    .or_else(|| {
                        body.get("candidates")
                            .and_then(|v| v.as_array())
                            .and_then(|arr| arr.first())
                            .and_then(|c| c.get("finishReason"))
                            .and_then(|r| r.as_str())
                    })
                    .unwrap_or("no candidates");
                Err(Error::Provider(format!(
                    "response contained no text ({})",
                    reason
                )))
            }
        }
    }

    fn map_error(status: u16, body: &str) -> Error {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.trim().to_string());
        Error::Provider(format!("status {}: {}", status, message))
    }

    /// Send one prompt and return the reply text
    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        let headers = self.build_headers()?;
        let url = self.endpoint();
        debug!(model = %self.config.model, prompt_len = prompt.len(), "generateContent");

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&Self::build_payload(prompt))
            .send()
            .await
            .map_err(|e| Error::Provider(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Provider(format!("failed to read response: {}", e.without_url())))?;

        if !status.is_success() {
            return Err(Self::map_error(status.as_u16(), &text));
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| Error::Provider(format!("invalid JSON in response: {}", e)))?;
        Self::parse_response(&body)
    }
}

impl SuggestionModel for GeminiClient {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send {
        self.generate_content(prompt)
    }
}
