//! HTTP round trips against a server bound to an ephemeral port.

use std::sync::Arc;

use blob_store::MemoryBlobStore;
use chat_orchestrator::{
    ChatOrchestrator, ChatSettings, EMPTY_INPUT_ERROR, INVALID_REQUEST_ERROR, NOT_FOUND_ERROR,
};
use chatbot_api::AppState;
use completion_core::CompletionClient;
use mock_completion::{FailingClient, KeywordMockClient};
use restaurant_db::{hours, restaurant, Database, NewOperatingHours, NewRestaurant};
use serde_json::{json, Value};

struct TestServer {
    base: String,
    db: Database,
    http: reqwest::Client,
}

impl TestServer {
    async fn start(client: Arc<dyn CompletionClient>) -> Self {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();

        let orchestrator = ChatOrchestrator::new(
            db.clone(),
            Arc::new(MemoryBlobStore::new()),
            client,
            ChatSettings::default(),
        );
        let app = chatbot_api::app(AppState::new(orchestrator));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base: format!("http://{}", addr),
            db,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn post(&self, path: &str, body: Value) -> reqwest::Response {
        self.http.post(self.url(path)).json(&body).send().await.unwrap()
    }

    async fn seed(&self) -> i64 {
        let id = restaurant::create_restaurant(
            self.db.pool(),
            &NewRestaurant {
                chatbot_greeting: Some("Ciao! Welcome to Bella Italia.".to_string()),
                ..NewRestaurant::named("Bella Italia")
            },
        )
        .await
        .unwrap()
        .id;
        hours::create_hours(self.db.pool(), id, &NewOperatingHours::open(6, "12:00", "21:00"))
            .await
            .unwrap();
        id
    }
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::start(Arc::new(KeywordMockClient::restaurant_defaults())).await;

    let body: Value = reqwest::get(server.url("/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!({"status": "ok", "completion": "KeywordMockClient"}));
}

#[tokio::test]
async fn test_chat_and_feedback() {
    let server = TestServer::start(Arc::new(KeywordMockClient::restaurant_defaults())).await;
    let id = server.seed().await;

    let response = server
        .post("/api/chatbot", json!({"restaurant_id": id, "user_input": "hello"}))
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["response"], "Ciao! Welcome to Bella Italia.");
    assert!(body.get("error").is_none());
    assert!(!body["session_id"].as_str().unwrap().is_empty());
    let log_id = body["log_id"].as_i64().unwrap();

    let response = server
        .post("/api/chatbot/feedback", json!({"log_id": log_id, "rating": 6}))
        .await;
    assert_eq!(response.status(), 422);

    let response = server
        .post(
            "/api/chatbot/feedback",
            json!({"log_id": log_id, "rating": 5, "feedback_text": "Grazie"}),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let response = server
        .post("/api/chatbot/feedback", json!({"log_id": log_id + 1, "rating": 5}))
        .await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_unreadable_chat_body_is_still_200() {
    let server = TestServer::start(Arc::new(KeywordMockClient::restaurant_defaults())).await;
    let id = server.seed().await;

    let response = server.post("/api/chatbot", json!({"restaurant_id": id})).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], EMPTY_INPUT_ERROR);
    assert!(!body["session_id"].as_str().unwrap().is_empty());
    assert!(body.get("log_id").is_none());

    let response = server
        .http
        .post(server.url("/api/chatbot"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], INVALID_REQUEST_ERROR);
    assert!(!body["session_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_repeat_feedback_is_422() {
    let server = TestServer::start(Arc::new(KeywordMockClient::restaurant_defaults())).await;
    let id = server.seed().await;

    let body: Value = server
        .post("/api/chatbot", json!({"restaurant_id": id, "user_input": "hello"}))
        .await
        .json()
        .await
        .unwrap();
    let log_id = body["log_id"].as_i64().unwrap();

    let first = server
        .post("/api/chatbot/feedback", json!({"log_id": log_id, "rating": 5}))
        .await;
    assert_eq!(first.status(), 200);

    let second = server
        .post("/api/chatbot/feedback", json!({"log_id": log_id, "rating": 1}))
        .await;
    assert_eq!(second.status(), 422);
}

#[tokio::test]
async fn test_unknown_restaurant_is_still_200() {
    let server = TestServer::start(Arc::new(KeywordMockClient::restaurant_defaults())).await;

    let response = server
        .post("/api/chatbot", json!({"restaurant_id": 9, "user_input": "hi", "session_id": "abc"}))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], NOT_FOUND_ERROR);
    assert_eq!(body["session_id"], "abc");
}

#[tokio::test]
async fn test_completion_failure_body() {
    let server = TestServer::start(Arc::new(FailingClient::api_error(500, "upstream exploded"))).await;
    let id = server.seed().await;

    let response = server
        .post("/api/chatbot", json!({"restaurant_id": id, "user_input": "menu?"}))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("upstream exploded"));
    assert!(body.get("log_id").is_none());
}

#[tokio::test]
async fn test_context_endpoints() {
    let server = TestServer::start(Arc::new(KeywordMockClient::restaurant_defaults())).await;
    let id = server.seed().await;

    let response = server
        .post(&format!("/api/restaurants/{}/refresh", id), json!({}))
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let key = body["cache_key"].as_str().unwrap().to_string();
    assert!(key.starts_with(&format!("restaurant_{}/", id)));

    let doc: Value = reqwest::get(server.url(&format!("/api/restaurants/{}/context", id)))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(doc["restaurant_info"]["name"], "Bella Italia");
    assert_eq!(doc["hours"][0]["day"], "Sunday");
    assert_eq!(doc["hours"][0]["hours"], "12:00 - 21:00");

    let response = reqwest::get(server.url("/api/restaurants/404/context")).await.unwrap();
    assert_eq!(response.status(), 404);
}
