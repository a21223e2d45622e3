// src/routes/mod.rs
pub mod chat;

use std::path::Path;

use crate::{error::AppError, state::SharedState};
use axum::{
    Router,
    handler::{Handler, HandlerWithoutStateExt},
    routing::{MethodRouter, get, post},
};
use chat::{chat_handler, chat_panic_response, health_handler, test_handler};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// API routes plus static files from `public_dir`; anything else is a JSON 404.
pub fn create_router(public_dir: impl AsRef<Path>) -> Router<SharedState> {
    let static_files = ServeDir::new(public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    Router::new()
        .route("/api/chat", chat_route(chat_handler))
        .route("/health", get(health_handler).fallback(not_found))
        .route("/test", get(test_handler).fallback(not_found))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
}

/// POST-only chat endpoint: panics become a contact reply, other methods a
/// JSON 404.
pub fn chat_route<H, T>(handler: H) -> MethodRouter<SharedState>
where
    H: Handler<T, SharedState>,
    T: 'static,
{
    post(handler)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(chat_panic_response))
}

async fn not_found() -> AppError {
    AppError::NotFound
}
