//! Conversation turns, completion requests and completion results.

use serde::{Deserialize, Serialize};

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single message in the conversation sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: system, user or assistant
    pub role: Role,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A single non-streaming completion request.
///
/// Parameters left unset fall back to the defaults of the client that
/// serves the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model override.
    pub model: Option<String>,
    /// Ordered conversation, system prompt first when present.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature override.
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Create a request from an explicit message list.
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            model: None,
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Build the canonical request shape: system prompt, prior turns, then
    /// the current user input.
    ///
    /// System messages inside `turns` are dropped so the instruction block
    /// stays the single source of system guidance.
    pub fn with_system(
        system_prompt: impl Into<String>,
        turns: impl IntoIterator<Item = ChatMessage>,
        user_input: impl Into<String>,
    ) -> Self {
        let mut messages = vec![ChatMessage::system(system_prompt)];
        messages.extend(turns.into_iter().filter(|turn| turn.role != Role::System));
        messages.push(ChatMessage::user(user_input));
        Self::new(messages)
    }

    /// Set the model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the max tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// The leading system prompt, if any.
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .first()
            .filter(|message| message.role == Role::System)
            .map(|message| message.content.as_str())
    }

    /// Text of the most recent user message.
    pub fn last_user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.role == Role::User)
            .map(|message| message.content.as_str())
    }
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// Result of a successful completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// Generated text.
    pub text: String,
    /// Why generation stopped ("stop", "length", ...).
    pub finish_reason: String,
    /// Token usage, passed through unmodified.
    pub usage: Option<TokenUsage>,
    /// Model that produced the completion.
    pub model: String,
}

impl Completion {
    /// A completion that finished normally with no usage information.
    pub fn stop(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: "stop".to_string(),
            usage: None,
            model: model.into(),
        }
    }

    /// Attach token usage.
    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}
