//! Text-generation client abstraction.
//!
//! The agent loop only depends on the [`LlmClient`] trait; transports,
//! retries, timeouts and authentication live behind it.

mod mock;
mod openai;

pub use mock::ScriptedLlm;
pub use openai::OpenAiClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role/content pair in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Errors surfaced by text-generation transports.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("event stream error: {0}")]
    Stream(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("scripted client ran out of responses")]
    ScriptExhausted,
}

/// A text-generation service.
///
/// Implementations return the fully assembled completion text; if the
/// transport streams partial chunks, reassembly must be byte-identical to a
/// non-streaming call.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, LlmError>;
}
