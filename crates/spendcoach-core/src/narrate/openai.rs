//! OpenAI-compatible narrator backend
//!
//! Works with any server implementing the OpenAI `/v1/chat/completions`
//! API.
//!
//! # Configuration
//!
//! Environment variables:
//! - `OPENAI_API_KEY`: API key (required; absence disables narration)
//! - `OPENAI_MODEL`: Model name (default: gpt-4o-mini)
//! - `OPENAI_BASE_URL`: Server URL (default: https://api.openai.com)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::CoachContext;

use super::Narrator;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const TEMPERATURE: f64 = 0.6;

pub struct OpenAiNarrator {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiNarrator {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Create from environment variables. Returns None when no API key is
    /// set, which callers treat as "narration not available".
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Some(Self::new(&base_url, &model, &api_key))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            temperature: TEMPERATURE,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
        };

        debug!(model = %self.model, "sending narration request");
        let response = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Narration(format!(
                "narrator backend returned {}",
                response.status()
            )));
        }

        let body: ChatResponse = response.json().await?;
        let text = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Narration("empty completion".to_string()))?;
        Ok(text)
    }
}

#[async_trait]
impl Narrator for OpenAiNarrator {
    async fn narrate(&self, context: &CoachContext) -> Result<String> {
        let system = "You are a kind, specific financial coach. \
                      Reply in one short paragraph followed by 3 concise bullets. \
                      Use numbers from the JSON and keep it actionable.";
        let user = format!(
            "User Finance Snapshot (JSON):\n{}\nCreate a brief coaching note.",
            serde_json::to_string(context)?
        );
        self.chat(system, &user).await
    }

    async fn answer(&self, question: &str, context: &CoachContext) -> Result<String> {
        let system = "You answer questions about the user's spending using the JSON provided. \
                      If data isn't available, say so briefly. Be specific and concise.";
        let user = format!(
            "Question: {}\nData:\n{}",
            question,
            serde_json::to_string(context)?
        );
        self.chat(system, &user).await
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    temperature: f64,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}
