//! Chat orchestration for the restaurant chatbot.
//!
//! This crate turns a customer question into an answer grounded in one
//! restaurant's data. It provides the [`ChatOrchestrator`] together with the
//! pieces it is built from:
//!
//! - [`ContextAssembler`] folds relational rows into a [`ContextDocument`]
//! - [`ContextCache`] keeps immutable document snapshots in a blob store
//! - [`build_system_prompt`] renders the waiter persona and directives
//! - [`ConversationLogger`] records exchanges and feedback
//!
//! # Pipeline
//!
//! ```text
//! ChatRequest
//!      ↓
//! ┌──────────────────────────────────────────────────────┐
//! │                  CHAT ORCHESTRATOR                   │
//! │                                                      │
//! │  1. Resolve session id (new UUID when absent)        │
//! │  2. Resolve restaurant        → "not found" reply    │
//! │  3. Context cache get_or_build → "couldn't load"     │
//! │  4. Build system prompt                              │
//! │  5. Completion (bounded by timeout)                  │
//! │  6. Log exchange (best effort)                       │
//! └──────────────────────────────────────────────────────┘
//!      ↓
//! ChatResponse { session_id, response, log_id?, error? }
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use blob_store::MemoryBlobStore;
//! use chat_orchestrator::{ChatOrchestrator, ChatRequest, ChatSettings};
//! use mock_completion::KeywordMockClient;
//! use restaurant_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite:restaurant_chatbot.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let orchestrator = ChatOrchestrator::new(
//!         db,
//!         Arc::new(MemoryBlobStore::new()),
//!         Arc::new(KeywordMockClient::restaurant_defaults()),
//!         ChatSettings::default(),
//!     );
//!
//!     let reply = orchestrator
//!         .handle(ChatRequest::new(1, "What are your hours on Sunday?"))
//!         .await;
//!     println!("{}", reply.response);
//!     Ok(())
//! }
//! ```

mod assembler;
mod cache;
mod context;
mod error;
mod logger;
mod orchestrator;
mod prompt;
mod settings;

pub use assembler::{build_menus, format_address, format_hours, format_locations, group_faqs, ContextAssembler};
pub use cache::{snapshot_key, ContextCache, Refreshed};
pub use context::{
    CategoryEntry, ContextDocument, DietaryInfo, FaqEntry, HoursEntry, ItemEntry, LocationEntry,
    MenuEntry, ReservationEntry, RestaurantInfo, DEFAULT_FAQ_CATEGORY, SCHEMA_VERSION,
};
pub use error::{AssembleError, CacheError, ChatError, SettingsError};
pub use logger::{timestamp_now, ConversationLogger, FAILED_RESPONSE};
pub use orchestrator::{
    ChatOrchestrator, ChatRequest, ChatResponse, FeedbackRequest, COMPLETION_FAILED_RESPONSE,
    EMPTY_INPUT_ERROR, EMPTY_INPUT_RESPONSE, INTERNAL_ERROR, INTERNAL_RESPONSE,
    INVALID_REQUEST_ERROR, LOAD_FAILED_ERROR, LOAD_FAILED_RESPONSE, NOT_FOUND_ERROR,
    NOT_FOUND_RESPONSE,
};
pub use prompt::{build_system_prompt, default_greeting, RestaurantIdentity, DIRECTIVES};
pub use settings::{build_completion_client, ChatSettings};

// Re-export completion-core types for convenience
pub use completion_core::{ChatMessage, CompletionClient, Role};
