//! Per-request chat pipeline.

use std::sync::Arc;

use blob_store::BlobStore;
use completion_core::{
    hash_prompt, ChatMessage, Completion, CompletionClient, CompletionError, CompletionRequest,
};
use restaurant_db::{restaurant, Database};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::cache::ContextCache;
use crate::context::ContextDocument;
use crate::error::{CacheError, ChatError};
use crate::logger::{timestamp_now, ConversationLogger};
use crate::prompt::{build_system_prompt, RestaurantIdentity};
use crate::settings::ChatSettings;

pub const NOT_FOUND_RESPONSE: &str = "Sorry, I couldn't find information about this restaurant.";
pub const NOT_FOUND_ERROR: &str = "Restaurant not found";

pub const LOAD_FAILED_RESPONSE: &str = "Sorry, I couldn't load information about this restaurant.";
pub const LOAD_FAILED_ERROR: &str = "Failed to load restaurant data";

pub const COMPLETION_FAILED_RESPONSE: &str = "I'm sorry, but I'm having trouble connecting to my \
     knowledge base right now. Please try again in a moment.";

pub const INTERNAL_RESPONSE: &str = "Sorry, something went wrong on our side. Please try again later.";
pub const INTERNAL_ERROR: &str = "Internal error";

pub const EMPTY_INPUT_RESPONSE: &str = "Please type a message so I can help.";
pub const EMPTY_INPUT_ERROR: &str = "Message is required";

pub const INVALID_REQUEST_ERROR: &str = "Invalid request";

/// One chat turn from a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub restaurant_id: i64,
    pub user_input: String,
    /// Conversation id; blank or absent starts a new session.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Prior turns supplied by the caller. When absent the turns are
    /// rebuilt from the session log.
    #[serde(default)]
    pub history: Option<Vec<ChatMessage>>,
}

impl ChatRequest {
    pub fn new(restaurant_id: i64, user_input: impl Into<String>) -> Self {
        Self {
            restaurant_id,
            user_input: user_input.into(),
            session_id: None,
            history: None,
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = Some(history);
        self
    }

    /// The caller's session id, if it is not blank.
    fn supplied_session(&self) -> Option<&str> {
        self.session_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// The conversational payload returned for every chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    fn reply(session_id: String, response: String, log_id: Option<i64>) -> Self {
        Self {
            session_id,
            response,
            log_id,
            error: None,
        }
    }

    fn failure(session_id: String, response: &str, error: impl Into<String>) -> Self {
        Self {
            session_id,
            response: response.to_string(),
            log_id: None,
            error: Some(error.into()),
        }
    }

    /// Reply for a request that could not be read at all.
    ///
    /// The caller never supplied a usable session, so a fresh one is issued.
    pub fn invalid_request(error: impl Into<String>) -> Self {
        Self::failure(Uuid::new_v4().to_string(), EMPTY_INPUT_RESPONSE, error)
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Feedback on a logged exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub log_id: i64,
    pub rating: i64,
    #[serde(default)]
    pub feedback_text: Option<String>,
}

/// Answers customer questions about a restaurant.
///
/// Each request runs independently: resolve the restaurant, load its
/// context through the cache, build the system prompt, ask the completion
/// client and log the exchange. Every outcome is returned as a
/// [`ChatResponse`]; failures carry an `error` field instead of an `Err`.
pub struct ChatOrchestrator {
    db: Database,
    cache: ContextCache,
    logger: ConversationLogger,
    client: Arc<dyn CompletionClient>,
    settings: ChatSettings,
}

impl ChatOrchestrator {
    pub fn new(
        db: Database,
        store: Arc<dyn BlobStore>,
        client: Arc<dyn CompletionClient>,
        settings: ChatSettings,
    ) -> Self {
        let cache = ContextCache::new(db.clone(), store).with_retention(settings.snapshot_retention);
        let logger = ConversationLogger::new(db.clone());

        Self {
            db,
            cache,
            logger,
            client,
            settings,
        }
    }

    /// Name of the completion client answering requests.
    pub fn client_name(&self) -> &str {
        self.client.name()
    }

    pub async fn is_ready(&self) -> bool {
        self.client.is_ready().await
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    pub fn cache(&self) -> &ContextCache {
        &self.cache
    }

    pub fn logger(&self) -> &ConversationLogger {
        &self.logger
    }

    /// Handle one chat turn.
    pub async fn handle(&self, request: ChatRequest) -> ChatResponse {
        let session_id = request
            .supplied_session()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let restaurant_id = request.restaurant_id;

        if request.user_input.trim().is_empty() {
            return ChatResponse::failure(session_id, EMPTY_INPUT_RESPONSE, EMPTY_INPUT_ERROR);
        }

        info!(
            "Chat request for restaurant {} (session {}, {} chars)",
            restaurant_id,
            session_id,
            request.user_input.len()
        );

        let restaurant = match restaurant::find_restaurant(self.db.pool(), restaurant_id).await {
            Ok(Some(restaurant)) => restaurant,
            Ok(None) => {
                info!("Restaurant {} not found", restaurant_id);
                return ChatResponse::failure(session_id, NOT_FOUND_RESPONSE, NOT_FOUND_ERROR);
            }
            Err(e) => {
                error!("Failed to load restaurant {}: {}", restaurant_id, e);
                return ChatResponse::failure(session_id, INTERNAL_RESPONSE, INTERNAL_ERROR);
            }
        };

        let document = match self.cache.get_or_build(restaurant_id).await {
            Ok(document) => document,
            Err(CacheError::NotFound(_)) => {
                return ChatResponse::failure(session_id, NOT_FOUND_RESPONSE, NOT_FOUND_ERROR);
            }
            Err(e) => {
                warn!("Failed to load context for restaurant {}: {}", restaurant_id, e);
                return ChatResponse::failure(session_id, LOAD_FAILED_RESPONSE, LOAD_FAILED_ERROR);
            }
        };

        let identity = RestaurantIdentity::from_restaurant(&restaurant);
        let system_prompt = match build_system_prompt(&identity, &document) {
            Ok(prompt) => prompt,
            Err(e) => {
                error!("Failed to render prompt for restaurant {}: {}", restaurant_id, e);
                return ChatResponse::failure(session_id, INTERNAL_RESPONSE, INTERNAL_ERROR);
            }
        };
        debug!(
            "System prompt for restaurant {}: {} chars, sha256 {}",
            restaurant_id,
            system_prompt.len(),
            hash_prompt(&system_prompt)
        );

        let turns = self.prior_turns(&request, &session_id).await;
        let completion_request = self.completion_request(system_prompt, turns, &request.user_input);
        let timestamp = timestamp_now();

        match self.complete(completion_request).await {
            Ok(completion) => {
                match completion.usage {
                    Some(usage) => info!(
                        "Completion for session {} via {} ({}): {} tokens",
                        session_id,
                        self.client.name(),
                        completion.model,
                        usage.total_tokens
                    ),
                    None => info!(
                        "Completion for session {} via {} ({})",
                        session_id,
                        self.client.name(),
                        completion.model
                    ),
                }

                let log_id = match self
                    .logger
                    .record(
                        restaurant_id,
                        &session_id,
                        &request.user_input,
                        &completion.text,
                        &timestamp,
                    )
                    .await
                {
                    Ok(id) => Some(id),
                    Err(e) => {
                        warn!("Failed to log exchange for session {}: {}", session_id, e);
                        None
                    }
                };

                ChatResponse::reply(session_id, completion.text, log_id)
            }
            Err(e) => {
                warn!("Completion failed for session {}: {}", session_id, e);
                let detail = e.to_string();

                if let Err(log_err) = self
                    .logger
                    .record_failure(restaurant_id, &session_id, &request.user_input, &detail, &timestamp)
                    .await
                {
                    warn!(
                        "Failed to log failed exchange for session {}: {}",
                        session_id, log_err
                    );
                }

                ChatResponse::failure(
                    session_id,
                    COMPLETION_FAILED_RESPONSE,
                    format!("Error generating chatbot response: {}", detail),
                )
            }
        }
    }

    async fn prior_turns(&self, request: &ChatRequest, session_id: &str) -> Vec<ChatMessage> {
        if let Some(history) = &request.history {
            return history.clone();
        }
        if request.supplied_session().is_none() {
            return Vec::new();
        }

        match self
            .logger
            .session_turns(request.restaurant_id, session_id, self.settings.max_history_turns)
            .await
        {
            Ok(turns) => turns,
            Err(e) => {
                warn!("Failed to load history for session {}: {}", session_id, e);
                Vec::new()
            }
        }
    }

    fn completion_request(
        &self,
        system_prompt: String,
        turns: Vec<ChatMessage>,
        user_input: &str,
    ) -> CompletionRequest {
        let mut request = CompletionRequest::with_system(system_prompt, turns, user_input);
        if let Some(model) = &self.settings.model {
            request = request.model(model.clone());
        }
        if let Some(temperature) = self.settings.temperature {
            request = request.temperature(temperature);
        }
        if let Some(max_tokens) = self.settings.max_tokens {
            request = request.max_tokens(max_tokens);
        }
        request
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
        tokio::time::timeout(self.settings.completion_timeout, self.client.complete(request))
            .await
            .map_err(|_| CompletionError::Timeout)?
    }

    /// Attach a rating to a logged exchange.
    pub async fn submit_feedback(&self, feedback: &FeedbackRequest) -> Result<(), ChatError> {
        self.logger
            .attach_feedback(feedback.log_id, feedback.rating, feedback.feedback_text.as_deref())
            .await?;

        info!(
            "Feedback {} recorded for log {}",
            feedback.rating, feedback.log_id
        );
        Ok(())
    }

    /// Rebuild and store a restaurant's context, returning the snapshot key.
    pub async fn refresh_context(&self, restaurant_id: i64) -> Result<Option<String>, ChatError> {
        Ok(self.cache.refresh(restaurant_id).await?.cache_key)
    }

    /// The context document the chatbot currently answers from.
    pub async fn context(&self, restaurant_id: i64) -> Result<ContextDocument, ChatError> {
        Ok(self.cache.get_or_build(restaurant_id).await?)
    }

    /// Drop the restaurant's snapshot pointer so the next request rebuilds.
    pub async fn invalidate_context(&self, restaurant_id: i64) -> Result<(), ChatError> {
        Ok(self.cache.invalidate(restaurant_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_from_json() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"restaurant_id": 3, "user_input": "Hi"}"#).unwrap();
        assert_eq!(request, ChatRequest::new(3, "Hi"));
    }

    #[test]
    fn test_blank_session_counts_as_absent() {
        assert!(ChatRequest::new(1, "Hi").with_session("  ").supplied_session().is_none());
        assert_eq!(
            ChatRequest::new(1, "Hi").with_session("abc").supplied_session(),
            Some("abc")
        );
    }

    #[test]
    fn test_invalid_request_issues_session() {
        let first = ChatResponse::invalid_request(EMPTY_INPUT_ERROR);
        let second = ChatResponse::invalid_request(INVALID_REQUEST_ERROR);

        assert_eq!(first.response, EMPTY_INPUT_RESPONSE);
        assert_eq!(first.error.as_deref(), Some(EMPTY_INPUT_ERROR));
        assert!(first.log_id.is_none());
        assert!(Uuid::parse_str(&first.session_id).is_ok());
        assert_ne!(first.session_id, second.session_id);
    }

    #[test]
    fn test_response_omits_absent_fields() {
        let json = serde_json::to_value(ChatResponse::reply(
            "s".to_string(),
            "Ciao!".to_string(),
            None,
        ))
        .unwrap();
        assert!(json.get("log_id").is_none());
        assert!(json.get("error").is_none());

        let json =
            serde_json::to_value(ChatResponse::failure("s".to_string(), NOT_FOUND_RESPONSE, NOT_FOUND_ERROR))
                .unwrap();
        assert_eq!(json["error"], "Restaurant not found");
    }
}
