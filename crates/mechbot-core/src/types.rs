//! Chat message and transcript types.
//!
//! Messages model the OpenAI chat completions format spoken by the provider.
//! The enum is tagged by `role`, so a serialized transcript is exactly the
//! `messages` array of a completion request — no conversion layer needed.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────

/// A chat message in the provider wire format.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role")]
pub enum Message {
    #[serde(rename = "system")]
    System { content: String },

    #[serde(rename = "user")]
    User { content: String },

    #[serde(rename = "assistant")]
    Assistant { content: String },
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Message::Assistant {
            content: content.into(),
        }
    }

    /// The role tag, as exposed in history views.
    pub fn role(&self) -> &'static str {
        match self {
            Message::System { .. } => "system",
            Message::User { .. } => "user",
            Message::Assistant { .. } => "assistant",
        }
    }

    /// The text content.
    pub fn content(&self) -> &str {
        match self {
            Message::System { content }
            | Message::User { content }
            | Message::Assistant { content } => content,
        }
    }
}

/// Read-only projection of a message for history views.
///
/// Serializes as `{"type": "...", "content": "..."}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

// ─────────────────────────────────────────────
// Transcript
// ─────────────────────────────────────────────

/// Ordered conversation history for one session.
///
/// Append-only: a chat turn appends the user message, then the assistant
/// reply once the provider call succeeds. Nothing is ever reordered or
/// rewritten in place.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// New transcript seeded with a system instruction.
    pub fn seeded(instruction: impl Into<String>) -> Self {
        Transcript {
            messages: vec![Message::system(instruction)],
        }
    }

    /// Append a user message.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    /// Append an assistant reply. Only called after a successful provider
    /// call — a failed call leaves the transcript without an assistant entry.
    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(Message::assistant(text));
    }

    /// The full ordered message sequence, as handed to the provider.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// `{type, content}` projection for display. Includes every message,
    /// system seed too, in insertion order.
    pub fn view(&self) -> Vec<HistoryMessage> {
        self.messages
            .iter()
            .map(|m| HistoryMessage {
                kind: m.role().to_string(),
                content: m.content().to_string(),
            })
            .collect()
    }
}

// ─────────────────────────────────────────────
// Provider wire format
// ─────────────────────────────────────────────

/// Request body for an OpenAI-compatible chat completion API.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Raw chat completion response. Used internally for deserialization.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
    pub usage: Option<UsageInfo>,
}

/// A single choice in a chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantReply,
}

/// The assistant message within a chat completion choice.
#[derive(Debug, Deserialize)]
pub struct AssistantReply {
    pub content: Option<String>,
}

/// Token usage statistics, logged for observability.
#[derive(Debug, Deserialize)]
pub struct UsageInfo {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
