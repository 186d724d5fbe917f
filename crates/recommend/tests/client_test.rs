use std::time::Duration;

use recommend::{
    BookRecord, LlmConfig, OpenAiClient, ParsedOutcome, RecommendError, Recommender,
};
use secrecy::SecretString;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAiClient {
    let mut config = LlmConfig::new(SecretString::new("sk-test".to_string()));
    config.base_url = server.uri();
    OpenAiClient::new(config).expect("Failed to build client")
}

fn completion(content: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "gpt-4o",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    }))
}

#[tokio::test]
async fn test_complete_sends_single_user_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o",
            "messages": [{"role": "user", "content": "recommend me something"}]
        })))
        .respond_with(completion(serde_json::json!("Try Dune.")))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server)
        .complete("recommend me something")
        .await
        .unwrap();

    assert_eq!(reply.as_deref(), Some("Try Dune."));
}

#[tokio::test]
async fn test_empty_choices_is_absent_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})))
        .mount(&server)
        .await;

    let reply = client_for(&server).complete("hi").await.unwrap();
    assert!(reply.is_none());
}

#[tokio::test]
async fn test_null_content_is_absent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion(serde_json::Value::Null))
        .mount(&server)
        .await;

    let reply = client_for(&server).complete("hi").await.unwrap();
    assert!(reply.is_none());
}

#[tokio::test]
async fn test_api_error_carries_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).complete("hi").await.unwrap_err();

    match err {
        RecommendError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).complete("hi").await.unwrap_err();
    assert!(matches!(err, RecommendError::Api { status: 503, ref message } if message == "overloaded"));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let mut config = LlmConfig::new(SecretString::new("sk-test".to_string()));
    config.base_url = "http://127.0.0.1:1".to_string();
    let client = OpenAiClient::new(config).unwrap();

    let err = client.complete("hi").await.unwrap_err();
    assert!(matches!(err, RecommendError::Transport(_)));
    assert!(!err.to_string().contains("sk-test"));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion(serde_json::json!("late")).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let mut config = LlmConfig::new(SecretString::new("sk-test".to_string()));
    config.base_url = server.uri();
    config.timeout = Some(Duration::from_millis(100));
    let client = OpenAiClient::new(config).unwrap();

    let err = client.complete("hi").await.unwrap_err();
    assert!(matches!(err, RecommendError::Transport(ref e) if e.is_timeout()));
}

#[tokio::test]
async fn test_malformed_envelope_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).complete("hi").await.unwrap_err();
    assert!(matches!(err, RecommendError::Transport(_)));
}

#[tokio::test]
async fn test_recommender_decodes_structured_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion(serde_json::json!(
            r#"[{"id":1,"name":"Dune","author":"Frank Herbert"}]"#
        )))
        .mount(&server)
        .await;

    let recommender = Recommender::new(client_for(&server));
    let books = vec![BookRecord::new(1, "Outlander", "Diana Gabaldon")];

    let outcome = recommender.recommend(&books).await.unwrap();
    assert_eq!(
        outcome,
        Some(ParsedOutcome::Structured(vec![BookRecord::new(1, "Dune", "Frank Herbert")]))
    );

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let content = body["messages"][0]["content"].as_str().unwrap();
    assert!(content.contains("\"Outlander\""));
    assert!(content.contains("\"Diana Gabaldon\""));
}

#[tokio::test]
async fn test_recommender_keeps_prose_reply_raw() {
    let server = MockServer::start().await;
    let reply = "Sure! Here are some books: [...]";

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion(serde_json::json!(reply)))
        .mount(&server)
        .await;

    let recommender = Recommender::new(client_for(&server));
    let outcome = recommender.recommend(&[]).await.unwrap();

    assert_eq!(outcome, Some(ParsedOutcome::Unstructured(reply.to_string())));
}

#[tokio::test]
async fn test_sample_recommendation_returns_raw_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion(serde_json::json!("[]")))
        .mount(&server)
        .await;

    let recommender = Recommender::new(client_for(&server));
    let reply = recommender.recommend_sample().await.unwrap();
    assert_eq!(reply.as_deref(), Some("[]"));

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body["messages"][0]["content"].as_str().unwrap().contains("Dark Matter"));
}
