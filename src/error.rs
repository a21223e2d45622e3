// src/error.rs
use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::NotFoundResponse;
use crate::services::catalog::CatalogError;

/// Failures of the hosted completion call. Never shown to the chat client;
/// the caller logs them and answers from the catalog instead.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream timed out after {0:?}")]
    Timeout(Duration),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream payload malformed: {0}")]
    MalformedPayload(String),
}

/// Anything that stops `AppState` from being built.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid reply catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("cannot build upstream client: {0}")]
    Upstream(#[from] UpstreamError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("endpoint not found")]
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, Json(NotFoundResponse::default())).into_response()
            }
        }
    }
}
