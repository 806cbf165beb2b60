//! Chat-completion seam and its OpenAI-compatible HTTP implementation.
//!
//! Groq, OpenAI, and Ollama all speak the same chat-completions shape, so a
//! single client covers every configured provider via its base URL.

use std::time::Duration;

use async_trait::async_trait;
use lanequote_core::config::{LlmConfig, LlmProvider};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::ExtractionError;

pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ExtractionError>;
}

pub struct ChatCompletionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
}

impl ChatCompletionsClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<SecretString>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url: base_url.into(), api_key, model: model.into() })
    }

    /// Build a client for the configured provider, defaulting the base URL
    /// to the provider's published endpoint.
    pub fn from_config(config: &LlmConfig) -> Result<Self, reqwest::Error> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| provider_base_url(config.provider).to_owned());
        Self::new(
            base_url,
            config.api_key.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

fn provider_base_url(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::Groq => GROQ_BASE_URL,
        LlmProvider::OpenAi => OPENAI_BASE_URL,
        LlmProvider::Ollama => OLLAMA_BASE_URL,
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
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

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ExtractionError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            // Low temperature for extraction consistency.
            temperature: 0.1,
            max_tokens: 1500,
        };

        let mut builder =
            self.http.post(format!("{}/chat/completions", self.base_url)).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key.expose_secret());
        }

        let response = builder
            .send()
            .await
            .map_err(|error| ExtractionError::Llm(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Llm(format!(
                "chat completion returned status {status}"
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|error| ExtractionError::Llm(error.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ExtractionError::Llm("chat completion returned no choices".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use lanequote_core::config::{LlmConfig, LlmProvider};

    use super::{provider_base_url, ChatCompletionsClient, ChatMessage, ChatRequest, ChatResponse};

    #[test]
    fn provider_defaults_cover_every_variant() {
        assert!(provider_base_url(LlmProvider::Groq).contains("groq"));
        assert!(provider_base_url(LlmProvider::OpenAi).contains("openai"));
        assert!(provider_base_url(LlmProvider::Ollama).contains("localhost"));
    }

    #[test]
    fn explicit_base_url_wins_over_provider_default() {
        let config = LlmConfig {
            provider: LlmProvider::Groq,
            api_key: None,
            base_url: Some("http://stub.local/v1".to_owned()),
            model: "test-model".to_owned(),
            timeout_secs: 5,
        };

        let client = ChatCompletionsClient::from_config(&config).expect("client");
        assert_eq!(client.base_url, "http://stub.local/v1");
        assert_eq!(client.model, "test-model");
    }

    #[test]
    fn chat_request_serializes_openai_shape() {
        let request = ChatRequest {
            model: "llama-3.1-8b-instant",
            messages: [
                ChatMessage { role: "system", content: "sys" },
                ChatMessage { role: "user", content: "usr" },
            ],
            temperature: 0.1,
            max_tokens: 1500,
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["model"], "llama-3.1-8b-instant");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "usr");
        assert_eq!(json["temperature"], 0.1);
    }

    #[test]
    fn chat_response_yields_first_choice_content() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "{\"ok\":true}"}}
            ]
        }"#;

        let parsed: ChatResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.choices[0].message.content, "{\"ok\":true}");
    }
}
