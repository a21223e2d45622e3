use midmes_chatbot::config::Config;
use midmes_chatbot::message::{
    ChatResponse, HealthResponse, NotFoundResponse, ResponseSource, TestResponse,
};
use midmes_chatbot::routes::{chat_route, create_router};
use midmes_chatbot::services::catalog::{CONTACT_REPLY, ResponseCatalog, Topic};
use midmes_chatbot::services::chatbot::EMPTY_MESSAGE_REPLY;
use midmes_chatbot::state::AppState;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::util::ServiceExt;

const PUBLIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

fn app() -> Router {
    create_router(PUBLIC_DIR).with_state(Arc::new(AppState::fallback_only().unwrap()))
}

async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

async fn post_chat(app: Router, body: &str) -> (StatusCode, ChatResponse) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, read_json(response).await)
}

#[tokio::test]
async fn test_pricing_question() {
    let (status, resp) = post_chat(app(), r#"{"message": "What is your price?", "language": "en"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert!(resp.success);
    assert_eq!(resp.source, ResponseSource::Fallback);
    assert!(resp.response.contains("**Pricing:**"));
}

#[tokio::test]
async fn test_empty_message_prompts_for_input() {
    let (status, resp) = post_chat(app(), r#"{"message": ""}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!resp.success);
    assert_eq!(resp.response, EMPTY_MESSAGE_REPLY);
}

#[tokio::test]
async fn test_whitespace_and_missing_message() {
    let (_, resp) = post_chat(app(), r#"{"message": "   \n\t "}"#).await;
    assert!(!resp.success);
    assert_eq!(resp.response, EMPTY_MESSAGE_REPLY);

    let (_, resp) = post_chat(app(), r#"{"language": "am"}"#).await;
    assert!(!resp.success);
    assert_eq!(resp.response, EMPTY_MESSAGE_REPLY);
}

#[tokio::test]
async fn test_unparseable_body_still_answers_200() {
    let (status, resp) = post_chat(app(), "definitely not json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!resp.success);
    assert_eq!(resp.response, EMPTY_MESSAGE_REPLY);
}

#[tokio::test]
async fn test_greeting_in_both_languages() {
    let catalog = ResponseCatalog::builtin().unwrap();

    let (_, resp) = post_chat(app(), r#"{"message": "HELLO there"}"#).await;
    assert_eq!(resp.response, catalog.lookup("en", Topic::Greeting));

    let (_, resp) = post_chat(app(), r#"{"message": "hi", "language": "AM"}"#).await;
    assert_eq!(resp.response, catalog.lookup("am", Topic::Greeting));
    assert!(resp.response.starts_with("ሰላም"));
}

#[tokio::test]
async fn test_amharic_missing_topic_uses_english() {
    let catalog = ResponseCatalog::builtin().unwrap();
    let (_, resp) = post_chat(app(), r#"{"message": "How much?", "language": "am"}"#).await;

    assert!(resp.success);
    assert!(!resp.response.is_empty());
    assert_eq!(resp.response, catalog.lookup("en", Topic::Pricing));
}

#[tokio::test]
async fn test_unknown_language_reads_english() {
    let catalog = ResponseCatalog::builtin().unwrap();
    let (_, resp) = post_chat(app(), r#"{"message": "Goodbye", "language": "fr"}"#).await;

    assert_eq!(resp.response, catalog.lookup("en", Topic::Farewell));
}

#[tokio::test]
async fn test_no_credential_means_fallback_only() {
    let state = AppState::from_config(&Config::default()).unwrap();
    assert!(state.upstream.is_none());

    let app = create_router(PUBLIC_DIR).with_state(Arc::new(state));
    let (_, resp) = post_chat(app, r#"{"message": "Can I get your phone number?"}"#).await;

    assert_eq!(resp.source, ResponseSource::Fallback);
    assert!(resp.response.contains("+251 979 029 768"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health: HealthResponse = read_json(response).await;
    assert_eq!(health.status, "OK");
    assert!(!health.message.is_empty());
    assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
}

#[tokio::test]
async fn test_test_endpoint() {
    let response = app()
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: TestResponse = read_json(response).await;
    assert_eq!(body.status, "working");
    assert_eq!(body.message, "API test successful!");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let response = app()
        .oneshot(Request::builder().uri("/unknown-route").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: NotFoundResponse = read_json(response).await;
    assert!(!body.success);
    assert_eq!(body.error, "Endpoint not found");
    assert!(body.available_endpoints.contains(&"/api/chat".to_string()));
}

#[tokio::test]
async fn test_unknown_post_route_is_json_404() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: NotFoundResponse = read_json(response).await;
    assert_eq!(body.error, "Endpoint not found");
}

#[tokio::test]
async fn test_wrong_method_on_known_route_is_json_404() {
    for (method, uri) in [("GET", "/api/chat"), ("POST", "/health"), ("DELETE", "/test")] {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        let body: NotFoundResponse = read_json(response).await;
        assert!(!body.success);
        assert_eq!(body.error, "Endpoint not found");
    }
}

#[tokio::test]
async fn test_index_page_is_served() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8_lossy(&body_bytes);
    assert!(html.contains("midmes-chatbot-widget"));
}

async fn boom() -> &'static str {
    panic!("catalog exploded")
}

#[tokio::test]
async fn test_panic_becomes_contact_reply() {
    // Same route wiring as `create_router`, with a handler that panics.
    let app = Router::new()
        .route("/api/chat", chat_route(boom))
        .with_state(Arc::new(AppState::fallback_only().unwrap()));

    let (status, resp) = post_chat(app, r#"{"message": "hello"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert!(resp.success);
    assert_eq!(resp.source, ResponseSource::Error);
    assert_eq!(resp.response, CONTACT_REPLY);
}
