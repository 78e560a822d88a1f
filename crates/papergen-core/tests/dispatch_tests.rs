//! End-to-end tests against a mock generation endpoint

use papergen_core::{
    ChunkSource, Dispatcher, GenerationSession, GenerationState, NoopObserver, PaperError, Prompt,
    SessionOptions, Style,
};
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SSE_BODY: &str = "event: message\n\
    data: {\"text\":\"1. Attention \"}\n\n\
    data: {\"text\":\"in graphs \"}\n\n\
    : keep-alive\n\n\
    data: {\"text\":\"2. Sparse \u{00e9}tudes\"}\n\n\
    data: {\"finish\":true}\n\n";

fn session_for(server: &MockServer) -> GenerationSession {
    let dispatcher = Dispatcher::new(format!("{}/api/generate", server.uri()));
    GenerationSession::new(Arc::new(dispatcher), SessionOptions::default())
}

#[tokio::test]
async fn test_streams_and_segments_response() {
    let server = MockServer::start().await;
    let prompt = Prompt::build("graph neural networks", Style::Professional).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "prompt": prompt.as_str() })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SSE_BODY, "text/event-stream"))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let outcome = session
        .submit(&prompt, &NoopObserver, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.text, "1. Attention in graphs 2. Sparse études");
    assert_eq!(outcome.segments, vec!["Attention in graphs ", " Sparse études"]);
    assert_eq!(outcome.stats.frames_applied, 4);
    assert_eq!(session.state(), GenerationState::Done);
}

#[tokio::test]
async fn test_error_status_is_transport_error_and_body_is_ignored() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(500).set_body_raw("data: {\"text\":\"leak\"}\n\n", "text/event-stream"),
        )
        .mount(&server)
        .await;

    let session = session_for(&server);
    let err = session
        .submit(
            &Prompt::raw("anything").unwrap(),
            &NoopObserver,
            CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err,
        PaperError::Http {
            status: 500,
            reason: "Internal Server Error".to_string()
        }
    );
    assert_eq!(session.output(), "");
    assert_eq!(session.state(), GenerationState::Failed);
}

#[tokio::test]
async fn test_no_content_response_has_no_stream() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let dispatcher = Dispatcher::new(format!("{}/api/generate", server.uri()));
    let stream = dispatcher.open(&Prompt::raw("x").unwrap()).await.unwrap();
    assert!(stream.is_none());

    let outcome = session_for(&server)
        .submit(&Prompt::raw("x").unwrap(), &NoopObserver, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome.text, "");
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let dispatcher = Dispatcher::new("http://127.0.0.1:1/api/generate");
    let result = dispatcher.open(&Prompt::raw("x").unwrap()).await;

    assert!(matches!(result, Err(PaperError::Transport(_))));
}
