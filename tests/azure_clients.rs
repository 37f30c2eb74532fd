//! HTTP-level tests for the Azure search and completion clients.

use ragchat::{
    completion::{AzureChatClient, CompletionCapability, DEFAULT_COMPLETION_API_VERSION},
    errors::RagError,
    rag::RetrievalAugmenter,
    search::{AzureSearchClient, SearchCapability, SearchRequest, SemanticOptions},
    types::ChatTurn,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn search_request(query: &str) -> SearchRequest {
    SearchRequest {
        index: "travel".to_string(),
        query: query.to_string(),
        top_k: 3,
        select: vec!["title".to_string(), "content".to_string()],
    }
}

#[tokio::test]
async fn test_search_sends_semantic_projected_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes/travel/docs/search"))
        .and(query_param("api-version", "2023-11-01"))
        .and(header("api-key", "search-key"))
        .and(body_json(json!({
            "search": "quiet beaches",
            "top": 3,
            "select": "title,content",
            "queryType": "semantic",
            "semanticConfiguration": "default"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"@search.score": 2.1, "title": "Crete", "content": "Long sandy coves"},
                {"@search.score": 1.3, "title": "Naxos"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AzureSearchClient::new(&server.uri(), "search-key").unwrap();
    let hits = client.search(&search_request("quiet beaches")).await.unwrap();

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title().as_deref(), Some("Crete"));
    assert_eq!(hits[1].content(), None);
}

#[tokio::test]
async fn test_search_preview_version_sends_query_language() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(query_param("api-version", "2024-05-01-preview"))
        .and(body_partial_json(json!({
            "queryType": "semantic",
            "queryLanguage": "en-us"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(1)
        .mount(&server)
        .await;

    let options = SemanticOptions {
        api_version: "2024-05-01-preview".to_string(),
        ..SemanticOptions::default()
    };
    let client =
        AzureSearchClient::with_options(&server.uri(), "key", options, Duration::from_secs(5))
            .unwrap();
    let hits = client.search(&search_request("x")).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_search_index_name_is_one_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes/travel%2Fadmin%3Fx/docs/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = AzureSearchClient::new(&server.uri(), "key").unwrap();
    let request = SearchRequest {
        index: "travel/admin?x".to_string(),
        ..search_request("x")
    };
    client.search(&request).await.unwrap();
}

#[tokio::test]
async fn test_search_timeout_is_search_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"value": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = AzureSearchClient::with_options(
        &server.uri(),
        "key",
        SemanticOptions::default(),
        Duration::from_millis(200),
    )
    .unwrap();
    let err = client.search(&search_request("x")).await.unwrap_err();
    assert!(matches!(err, RagError::SearchServiceFailure(_)));
}

#[tokio::test]
async fn test_search_http_error_is_search_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let client = AzureSearchClient::new(&server.uri(), "bad-key").unwrap();
    let err = client.search(&search_request("x")).await.unwrap_err();
    match err {
        RagError::SearchServiceFailure(msg) => {
            assert!(msg.contains("403"));
            assert!(msg.contains("Forbidden"));
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[tokio::test]
async fn test_search_malformed_body_is_search_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = AzureSearchClient::new(&server.uri(), "key").unwrap();
    let err = client.search(&search_request("x")).await.unwrap_err();
    assert!(matches!(err, RagError::SearchServiceFailure(_)));
}

#[tokio::test]
async fn test_augmenter_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes/cities/docs/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                {"title": "Paris", "content": "City of lights"},
                {"title": "Rome", "content": null}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let augmenter = RetrievalAugmenter::connect(&server.uri(), "key", "cities").unwrap();
    let context = augmenter.retrieve("romance").await.unwrap();
    assert_eq!(context, "Title: Paris\nContent: City of lights\n\nTitle: Rome\n\n");
}

#[tokio::test]
async fn test_completion_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/deployments/gpt-4o/chat/completions"))
        .and(query_param("api-version", "2024-06-01"))
        .and(header("api-key", "chat-key"))
        .and(body_partial_json(json!({
            "messages": [
                {"role": "system", "content": "Be brief."},
                {"role": "user", "content": "Where to?"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Try Lisbon."}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AzureChatClient::new("gpt-4o", &server.uri(), "chat-key").unwrap();
    let reply = client
        .complete(&[ChatTurn::system("Be brief."), ChatTurn::user("Where to?")])
        .await
        .unwrap();
    assert_eq!(reply, ChatTurn::assistant("Try Lisbon."));
}

#[tokio::test]
async fn test_completion_without_choices_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = AzureChatClient::new("gpt-4o", &server.uri(), "key").unwrap();
    let err = client.complete(&[ChatTurn::user("hi")]).await.unwrap_err();
    assert!(matches!(err, RagError::CompletionServiceFailure(_)));
}

#[tokio::test]
async fn test_completion_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .mount(&server)
        .await;

    let client = AzureChatClient::new("gpt-4o", &server.uri(), "key").unwrap();
    let err = client.complete(&[ChatTurn::user("hi")]).await.unwrap_err();
    assert!(matches!(err, RagError::CompletionServiceFailure(msg) if msg.contains("429")));
}

#[tokio::test]
async fn test_completion_reply_is_assistant_whatever_the_role() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"index": 0, "message": {"role": "tool", "content": "Try Porto."}}]
        })))
        .mount(&server)
        .await;

    let client = AzureChatClient::new("gpt-4o", &server.uri(), "key").unwrap();
    let reply = client.complete(&[ChatTurn::user("hi")]).await.unwrap();
    assert_eq!(reply, ChatTurn::assistant("Try Porto."));
}

#[tokio::test]
async fn test_completion_deployment_is_one_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/deployments/gpt%2F4o/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "ok"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AzureChatClient::new("gpt/4o", &server.uri(), "key").unwrap();
    let reply = client.complete(&[ChatTurn::user("hi")]).await.unwrap();
    assert_eq!(reply.content, "ok");
}

#[tokio::test]
async fn test_completion_timeout_is_completion_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"choices": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = AzureChatClient::with_config(
        "gpt-4o",
        &server.uri(),
        "key",
        DEFAULT_COMPLETION_API_VERSION,
        Duration::from_millis(200),
    )
    .unwrap();
    let err = client.complete(&[ChatTurn::user("hi")]).await.unwrap_err();
    assert!(matches!(err, RagError::CompletionServiceFailure(_)));
}
