//! Chat orchestration settings and completion client selection.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use completion_core::CompletionClient;
use mock_completion::KeywordMockClient;
use openai_completion::OpenAiClient;
use tracing::info;

use crate::error::SettingsError;

const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MAX_HISTORY_TURNS: usize = 10;

/// Tunables for the chat orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    /// Model override; `None` uses the completion client's default.
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Upper bound on a single completion call.
    pub completion_timeout: Duration,
    /// Answer with the keyword mock instead of the real API.
    pub use_mock: bool,
    /// Snapshots kept per restaurant; `None` keeps all.
    pub snapshot_retention: Option<usize>,
    /// Prior exchanges replayed from the session log.
    pub max_history_turns: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: None,
            temperature: None,
            max_tokens: None,
            completion_timeout: DEFAULT_COMPLETION_TIMEOUT,
            use_mock: false,
            snapshot_retention: None,
            max_history_turns: DEFAULT_MAX_HISTORY_TURNS,
        }
    }
}

impl ChatSettings {
    /// Load settings from `CHATBOT_*` environment variables.
    ///
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            model: env::var("CHATBOT_MODEL")
                .ok()
                .filter(|model| !model.trim().is_empty()),
            temperature: env_parse("CHATBOT_TEMPERATURE"),
            max_tokens: env_parse("CHATBOT_MAX_TOKENS"),
            completion_timeout: env_parse("CHATBOT_COMPLETION_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.completion_timeout),
            use_mock: env::var("CHATBOT_USE_MOCK")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
            snapshot_retention: env_parse::<usize>("CHATBOT_SNAPSHOT_RETENTION")
                .filter(|keep| *keep > 0),
            max_history_turns: env_parse("CHATBOT_MAX_HISTORY_TURNS")
                .unwrap_or(defaults.max_history_turns),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Build the completion client selected by the settings.
pub fn build_completion_client(
    settings: &ChatSettings,
) -> Result<Arc<dyn CompletionClient>, SettingsError> {
    if settings.use_mock {
        info!("Using keyword mock completion client");
        return Ok(Arc::new(KeywordMockClient::restaurant_defaults()));
    }

    let client = OpenAiClient::from_env()?;
    info!("Using OpenAI completion client ({})", client.config().model);
    Ok(Arc::new(client))
}
