//! Keyword-triggered canned responder.

use async_trait::async_trait;
use completion_core::{
    Completion, CompletionClient, CompletionError, CompletionRequest, TokenUsage,
};
use tokio::sync::Mutex;
use tracing::debug;

/// Model name reported by mock completions.
pub const MOCK_MODEL: &str = "mock-keyword";

/// Reply used when no rule matches.
const DEFAULT_REPLY: &str = "Thanks for your question! I don't have that detail handy, \
but the restaurant team will be happy to help if you give them a call.";

/// Placeholder replaced by the restaurant greeting found in the system prompt.
const GREETING_PLACEHOLDER: &str = "{greeting}";

/// How a rule's keywords are compared against the user's words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchMode {
    /// A word starting with the keyword matches ("hour" matches "hours").
    Prefix,
    /// Only the whole word matches ("hi" does not match "hiking").
    Exact,
}

/// A single keyword rule: if any keyword matches, reply with `reply`.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    keywords: Vec<String>,
    reply: String,
    mode: MatchMode,
}

impl KeywordRule {
    /// Rule matching words that start with any of the keywords.
    pub fn prefix<I, S>(keywords: I, reply: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(keywords, reply, MatchMode::Prefix)
    }

    /// Rule matching only whole words.
    pub fn exact<I, S>(keywords: I, reply: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(keywords, reply, MatchMode::Exact)
    }

    fn build<I, S>(keywords: I, reply: impl Into<String>, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
            reply: reply.into(),
            mode,
        }
    }

    fn matches(&self, words: &[String]) -> bool {
        self.keywords.iter().any(|keyword| {
            words.iter().any(|word| match self.mode {
                MatchMode::Prefix => word.starts_with(keyword.as_str()),
                MatchMode::Exact => word == keyword,
            })
        })
    }
}

/// A deterministic client that answers from an ordered list of keyword rules.
///
/// The latest user message is split into lowercase words and checked
/// against each rule in order; the first match wins. Every request is
/// recorded so tests can inspect exactly what the orchestrator sent.
///
/// # Example
///
/// ```rust
/// use mock_completion::{KeywordMockClient, KeywordRule};
///
/// let client = KeywordMockClient::new(vec![
///     KeywordRule::prefix(["pizza"], "Our margherita is the house favourite."),
/// ]);
/// ```
#[derive(Debug)]
pub struct KeywordMockClient {
    rules: Vec<KeywordRule>,
    default_reply: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl KeywordMockClient {
    /// Create a client with custom rules and the stock default reply.
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self {
            rules,
            default_reply: DEFAULT_REPLY.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a client with canned restaurant answers.
    pub fn restaurant_defaults() -> Self {
        Self::new(vec![
            KeywordRule::prefix(
                ["hour", "open", "close", "closing", "opening"],
                "We're open most days of the week. Which day are you planning to visit? \
                 I'll check the exact hours for you.",
            ),
            KeywordRule::prefix(
                ["menu", "dish", "special", "food", "eat", "recommend", "price"],
                "Our menu has something for everyone. Our chef's specials and most popular \
                 dishes are always a great place to start!",
            ),
            KeywordRule::prefix(
                ["vegan", "vegetarian", "gluten", "allerg", "dairy", "nut"],
                "We have several vegetarian, vegan and gluten-free options. \
                 Let me know about any allergies and I'll point you to dishes that suit you.",
            ),
            KeywordRule::prefix(
                ["reserv", "book", "table", "party"],
                "We'd love to host you! Tell me the date, time and size of your party \
                 and I'll explain how to reserve a table.",
            ),
            KeywordRule::prefix(
                ["where", "address", "location", "direction", "parking", "phone", "contact"],
                "You can find our address and phone number on our website, and I'm happy \
                 to share the details for any of our locations.",
            ),
            KeywordRule::exact(["hello", "hi", "hey", "greetings"], GREETING_PLACEHOLDER),
        ])
    }

    /// Replace the reply used when no rule matches.
    pub fn with_default_reply(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = reply.into();
        self
    }

    /// All requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of requests received so far.
    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    /// The most recent request, if any.
    pub async fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().await.last().cloned()
    }

    fn reply_for(&self, request: &CompletionRequest) -> String {
        let words = tokenize(request.last_user_text().unwrap_or_default());

        let reply = self
            .rules
            .iter()
            .find(|rule| rule.matches(&words))
            .map(|rule| rule.reply.as_str())
            .unwrap_or(self.default_reply.as_str());

        if reply.contains(GREETING_PLACEHOLDER) {
            let greeting = request
                .system_prompt()
                .and_then(extract_greeting)
                .unwrap_or_else(|| "Welcome! How can I help you today?".to_string());
            return reply.replace(GREETING_PLACEHOLDER, &greeting);
        }

        reply.to_string()
    }
}

impl Default for KeywordMockClient {
    fn default() -> Self {
        Self::restaurant_defaults()
    }
}

#[async_trait]
impl CompletionClient for KeywordMockClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
        let text = self.reply_for(&request);

        let prompt_chars: usize = request.messages.iter().map(|m| m.content.chars().count()).sum();
        let usage = TokenUsage::new(
            approx_tokens(prompt_chars),
            approx_tokens(text.chars().count()),
        );

        debug!(
            "Mock completion: {} messages in, {} chars out",
            request.messages.len(),
            text.len()
        );

        self.requests.lock().await.push(request);

        Ok(Completion::stop(text, MOCK_MODEL).with_usage(usage))
    }

    fn name(&self) -> &str {
        "KeywordMockClient"
    }
}

/// Lowercase alphanumeric words of a message.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_lowercase())
        .collect()
}

/// Roughly four characters per token.
fn approx_tokens(chars: usize) -> u32 {
    u32::try_from(chars.div_ceil(4)).unwrap_or(u32::MAX)
}

/// Find the quoted greeting on the last prompt line that mentions a greeting.
fn extract_greeting(prompt: &str) -> Option<String> {
    let line = prompt
        .lines()
        .rev()
        .find(|line| line.to_lowercase().contains("greeting"))?;
    let start = line.find('"')?;
    let end = line.rfind('"')?;
    if end <= start + 1 {
        return None;
    }
    Some(line[start + 1..end].to_string())
}
