use std::any::Any;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use tracing::{error, warn};

use crate::{
    message::{ChatRequest, ChatResponse, HealthResponse, ResponseSource, TestResponse},
    services::{catalog::CONTACT_REPLY, chatbot::generate_reply},
    state::SharedState,
};

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// Always 200: the widget only reads `success` and `response`.
pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Json<ChatResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "unreadable chat body, treating as empty message");
            ChatRequest::default()
        }
    };

    Json(generate_reply(&state.catalog, state.upstream.as_deref(), &request).await)
}

/// Panic hook for the chat route: the client still gets text to display.
pub fn chat_panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(%detail, "chat handler panicked");

    (
        StatusCode::OK,
        Json(ChatResponse {
            success: true,
            response: CONTACT_REPLY.to_string(),
            source: ResponseSource::Error,
        }),
    )
        .into_response()
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "MIDMES Chatbot is running!".to_string(),
        timestamp: timestamp(),
    })
}

pub async fn test_handler() -> Json<TestResponse> {
    Json(TestResponse {
        message: "API test successful!".to_string(),
        status: "working".to_string(),
        timestamp: timestamp(),
    })
}
