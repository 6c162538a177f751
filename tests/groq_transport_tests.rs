//! HTTP-level tests for the Groq transport against a local mock server.

use std::sync::Arc;

use serde_json::json;
use travelgpt::{
    encode_fragment, CompletionClient, GroqTransport, StaticCredentials, Turn, DEFAULT_MODEL,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse(payloads: &[String]) -> String {
    payloads
        .iter()
        .map(|p| format!("data: {p}\n\n"))
        .collect()
}

fn sse_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/event-stream")
        .set_body_raw(body, "text/event-stream")
}

fn client_for(server: &MockServer, key: StaticCredentials) -> CompletionClient {
    let transport = GroqTransport::new(format!("{}/openai/v1", server.uri()));
    CompletionClient::new(Arc::new(transport), Arc::new(key))
}

#[tokio::test]
async fn test_streams_reply_from_server() {
    let server = MockServer::start().await;
    let body = sse(&[
        json!({"choices":[{"index":0,"delta":{"role":"assistant","content":""}}]}).to_string(),
        encode_fragment("Par"),
        encode_fragment("is is"),
        encode_fragment(" lovely."),
        json!({"choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}).to_string(),
        "[DONE]".to_string(),
    ]);

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer gsk_test"))
        .and(body_partial_json(json!({
            "model": DEFAULT_MODEL,
            "stream": true,
            "max_completion_tokens": 8192,
            "reasoning_effort": "medium",
            "stop": null,
        })))
        .respond_with(sse_response(body))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server, StaticCredentials::new("gsk_test"))
        .get_response(&[Turn::user("Is Paris nice?")])
        .await
        .expect("completion failed");

    assert_eq!(reply, "Paris is lovely.");
}

#[tokio::test]
async fn test_sends_instruction_first() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                {"role": "system", "content": travelgpt::CANONICAL_INSTRUCTION},
                {"role": "user", "content": "Rail pass for Europe?"},
            ]
        })))
        .respond_with(sse_response(sse(&[encode_fragment("Yes.")])))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client_for(&server, StaticCredentials::new("gsk_test"))
        .get_response(&[Turn::user("Rail pass for Europe?")])
        .await
        .expect("completion failed");

    assert_eq!(reply, "Yes.");
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server, StaticCredentials::new("bad"))
        .get_response(&[Turn::user("hi")])
        .await
        .expect_err("401 should fail");

    assert!(err.is_transport());
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn test_missing_key_never_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(sse_response(sse(&[encode_fragment("unused")])))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server, StaticCredentials::missing())
        .get_response(&[Turn::user("hi")])
        .await
        .expect_err("should fail without a key");

    assert!(err.is_configuration());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let transport = GroqTransport::new("http://127.0.0.1:1/openai/v1");
    let client = CompletionClient::new(
        Arc::new(transport),
        Arc::new(StaticCredentials::new("gsk_test")),
    );

    let err = client
        .get_response(&[Turn::user("hi")])
        .await
        .expect_err("connection should be refused");

    assert!(err.is_transport());
}

#[tokio::test]
async fn test_undecodable_event_does_not_abort_reply() {
    let server = MockServer::start().await;
    let mut body = format!("data: {}\n\n", encode_fragment("He")).into_bytes();
    body.extend_from_slice(b"data: {\"choices\":[{\"delta\":{\"content\":\"\xff\xfe\"}}]}\n\n");
    body.extend_from_slice(format!("data: {}\n\n", encode_fragment("llo")).as_bytes());
    body.extend_from_slice(b"data: [DONE]\n\n");

    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_raw(body, "text/event-stream"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, StaticCredentials::new("gsk_test"));
    let reply = client.get_response(&[Turn::user("hi")]).await;

    assert_eq!(reply.unwrap(), "Hello");
}
