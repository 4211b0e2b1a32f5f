use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

use super::types::{ChatMessage, Prompt};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("GROQ_API_KEY is not configured")]
    MissingApiKey,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion request failed: status={status} message={message}")]
    BadStatus { status: StatusCode, message: String },
    #[error("unexpected completion payload: {0}")]
    Envelope(String),
}

/// A chat-completion backend. Returns the raw text of the first choice.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;

    /// Configuration check that needs no network round trip.
    fn ready(&self) -> Result<(), LlmError> {
        Ok(())
    }
}

/// Client for Groq's OpenAI-compatible chat completions endpoint.
pub struct GroqClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionEnvelope {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl GroqClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(config.llm_timeout())
            .build()?;

        Ok(Self {
            http,
            api_url: config.groq_api_url.clone(),
            api_key: config.groq_api_key.clone(),
            model: config.groq_model.clone(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl ChatCompletion for GroqClient {
    fn ready(&self) -> Result<(), LlmError> {
        if self.api_key.is_none() {
            return Err(LlmError::MissingApiKey);
        }
        Ok(())
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let body = CompletionBody {
            model: &self.model,
            messages: &prompt.messages,
            temperature: prompt.temperature,
            max_tokens: prompt.max_tokens,
        };

        tracing::debug!(
            "Sending completion request: model={} messages={} max_tokens={}",
            self.model,
            prompt.messages.len(),
            prompt.max_tokens
        );

        let resp = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(LlmError::BadStatus {
                status,
                message: upstream_message(&text),
            });
        }

        parse_completion(&text)
    }
}

/// Pulls `choices[0].message.content` out of a completion response body.
pub fn parse_completion(body: &str) -> Result<String, LlmError> {
    let envelope: CompletionEnvelope =
        serde_json::from_str(body).map_err(|e| LlmError::Envelope(e.to_string()))?;

    envelope
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| LlmError::Envelope("missing choices[0].message.content".into()))
}

fn upstream_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "empty response from AI service".into(),
        Err(_) => body.chars().take(300).collect(),
    }
}
