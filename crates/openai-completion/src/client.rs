//! OpenAiClient implementation using the chat completions API.

use completion_core::{
    async_trait, Completion, CompletionClient, CompletionError, CompletionRequest,
};
use reqwest::Client;
use tracing::{debug, info};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse};
use crate::config::OpenAiConfig;

/// A completion client backed by an OpenAI-compatible HTTP API.
///
/// The client is stateless between calls: every request carries the full
/// conversation and is sent as a single non-streaming POST.
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a new OpenAiClient with the given configuration.
    pub fn new(config: OpenAiConfig) -> Result<Self, CompletionError> {
        if config.api_key.trim().is_empty() {
            return Err(CompletionError::Configuration(
                "API key must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                CompletionError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        info!(
            "OpenAiClient initialized with model: {}, timeout: {:?}",
            config.model, config.timeout
        );

        Ok(Self { client, config })
    }

    /// Create an OpenAiClient from environment variables.
    ///
    /// See [`OpenAiConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, CompletionError> {
        let config = OpenAiConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Fill unset request parameters from the configured defaults.
    fn build_request(&self, request: CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: request.model.unwrap_or_else(|| self.config.model.clone()),
            messages: request.messages,
            max_tokens: request.max_tokens.or(self.config.max_tokens),
            temperature: request.temperature.or(self.config.temperature),
        }
    }

    /// Make a chat completion request to the API.
    async fn chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, CompletionError> {
        let url = self.config.completions_url();

        debug!(
            "Sending request to {}: model={}, messages={}",
            url,
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            let message = serde_json::from_str::<ApiError>(&error_text)
                .map(|api_error| api_error.error.message)
                .unwrap_or(error_text);

            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                CompletionError::Timeout
            } else {
                CompletionError::InvalidResponse(format!("Failed to parse response: {}", e))
            }
        })?;

        Ok(completion)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
        let request = self.build_request(request);
        let requested_model = request.model.clone();

        let response = self.chat_completion(request).await?;

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            CompletionError::InvalidResponse("response contained no choices".to_string())
        })?;

        let text = choice
            .message
            .content
            .map(|content| content.trim().to_string())
            .ok_or_else(|| {
                CompletionError::InvalidResponse("first choice has no content".to_string())
            })?;

        if let Some(usage) = response.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let model = if response.model.is_empty() {
            requested_model
        } else {
            response.model
        };

        Ok(Completion {
            text,
            finish_reason: choice.finish_reason.unwrap_or_else(|| "unknown".to_string()),
            usage: response.usage.map(Into::into),
            model,
        })
    }

    fn name(&self) -> &str {
        "OpenAiClient"
    }
}

fn map_transport_error(e: reqwest::Error) -> CompletionError {
    if e.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::Network(format!("Failed to send request: {}", e))
    }
}
