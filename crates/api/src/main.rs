//! Restaurant chatbot API server.

use chat_orchestrator::{build_completion_client, ChatOrchestrator, ChatSettings};
use chatbot_api::{AppState, Config};
use restaurant_db::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting chatbot API");

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let store = config.blob_store.open().await?;
    info!(store = store.name(), "Context snapshot store ready");

    // The completion strategy is chosen once here and never per request.
    let settings = ChatSettings::from_env();
    let client = build_completion_client(&settings)?;

    let orchestrator = ChatOrchestrator::new(db, store, client, settings);
    info!(completion = orchestrator.client_name(), "Chat orchestrator ready");

    let app = chatbot_api::app(AppState::new(orchestrator));

    info!(addr = %config.addr, "Chatbot API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
