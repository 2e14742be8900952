use std::time::Duration;

use mockito::{Matcher, Server};
use openai_completion::{
    ChatMessage, CompletionClient, CompletionError, CompletionRequest, OpenAiClient, OpenAiConfig,
};
use serde_json::json;

fn client_for(server: &Server) -> OpenAiClient {
    let config = OpenAiConfig::builder()
        .api_key("test-key")
        .api_url(server.url())
        .model("gpt-4")
        .max_tokens(500)
        .temperature(0.7)
        .timeout(Duration::from_secs(5))
        .build();
    OpenAiClient::new(config).unwrap()
}

fn waiter_request() -> CompletionRequest {
    CompletionRequest::with_system(
        "You are a helpful waiter assistant for Bella Italia.",
        vec![
            ChatMessage::user("Hello"),
            ChatMessage::assistant("Benvenuti! How can I help?"),
        ],
        "Do you have vegetarian pasta?",
    )
}

#[tokio::test]
async fn test_successful_completion() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4",
            "max_tokens": 500,
            "messages": [
                {"role": "system", "content": "You are a helpful waiter assistant for Bella Italia."},
                {"role": "user", "content": "Hello"},
                {"role": "assistant", "content": "Benvenuti! How can I help?"},
                {"role": "user", "content": "Do you have vegetarian pasta?"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "chatcmpl-42",
                "object": "chat.completion",
                "model": "gpt-4-0613",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "  Yes, our Penne Arrabbiata is vegetarian.\n"},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 120, "completion_tokens": 11, "total_tokens": 131}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let completion = client_for(&server).complete(waiter_request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(completion.text, "Yes, our Penne Arrabbiata is vegetarian.");
    assert_eq!(completion.finish_reason, "stop");
    assert_eq!(completion.model, "gpt-4-0613");
    let usage = completion.usage.unwrap();
    assert_eq!(usage.prompt_tokens, 120);
    assert_eq!(usage.completion_tokens, 11);
    assert_eq!(usage.total_tokens, 131);
}

#[tokio::test]
async fn test_api_error_message_is_surfaced() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .complete(waiter_request())
        .await
        .unwrap_err();

    match err {
        CompletionError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let err = client_for(&server)
        .complete(waiter_request())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CompletionError::Api { status: 502, ref message } if message == "Bad Gateway"
    ));
}

#[tokio::test]
async fn test_empty_choices_is_invalid_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"model": "gpt-4", "choices": []}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .complete(waiter_request())
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json")
        .create_async()
        .await;

    let err = client_for(&server)
        .complete(waiter_request())
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let config = OpenAiConfig::builder()
        .api_key("test-key")
        .api_url("http://127.0.0.1:1")
        .timeout(Duration::from_secs(5))
        .build();
    let client = OpenAiClient::new(config).unwrap();

    let err = client.complete(waiter_request()).await.unwrap_err();

    assert!(matches!(
        err,
        CompletionError::Network(_) | CompletionError::Timeout
    ));
}
