//! OpenAI-compatible chat-completions transport.
//!
//! Works against any service exposing the `/chat/completions` wire format
//! when pointed at its base URL. Supports both a plain JSON call and SSE
//! streaming; the streamed deltas are reassembled into the same string a
//! non-streaming call would return.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use reqwest_eventsource::{Event, RequestBuilderExt};
use serde::{Deserialize, Serialize};

use super::{ChatMessage, LlmClient, LlmError};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client for OpenAI-compatible chat-completion APIs.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    stream: bool,
}

impl OpenAiClient {
    /// Create a client with the default base URL and timeout.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: build_http_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            stream: false,
        }
    }

    /// Point the client at an API-compatible service.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_http_client(timeout);
        self
    }

    /// Enable or disable SSE streaming.
    pub fn with_streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    fn request_body<'a>(&'a self, messages: &'a [ChatMessage], temperature: f32) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages,
            temperature,
            stream: self.stream,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    async fn generate_blocking(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, LlmError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(messages, temperature))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::MalformedResponse("response carried no choices".into()))?;

        Ok(content)
    }

    async fn generate_streaming(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, LlmError> {
        let mut source = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(messages, temperature))
            .eventsource()
            .map_err(|e| LlmError::Stream(e.to_string()))?;

        let mut collected = String::new();
        while let Some(event) = source.next().await {
            match event {
                Ok(Event::Open) => {}
                Ok(Event::Message(message)) => {
                    if message.data == "[DONE]" {
                        break;
                    }
                    let chunk: ChunkResponse = serde_json::from_str(&message.data)
                        .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;
                    if let Some(delta) = chunk.choices.into_iter().next() {
                        if let Some(content) = delta.delta.content {
                            collected.push_str(&content);
                        }
                    }
                }
                Err(reqwest_eventsource::Error::StreamEnded) => break,
                Err(e) => {
                    source.close();
                    return Err(LlmError::Stream(e.to_string()));
                }
            }
        }
        source.close();

        Ok(collected)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, LlmError> {
        tracing::debug!("calling model {} ({} messages)", self.model, messages.len());

        if self.stream {
            self.generate_streaming(messages, temperature).await
        } else {
            self.generate_blocking(messages, temperature).await
        }
    }
}

fn build_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .expect("default TLS backend available")
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChunkResponse {
    choices: Vec<ChunkChoice>,
}

#[derive(Deserialize)]
struct ChunkChoice {
    delta: ChunkDelta,
}

#[derive(Deserialize)]
struct ChunkDelta {
    content: Option<String>,
}
