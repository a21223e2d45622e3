// src/message.rs
use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "en";

pub const AVAILABLE_ENDPOINTS: [&str; 4] = ["/", "/health", "/test", "/api/chat"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            language: Some(language.into()),
        }
    }

    /// Lower-cased language tag, `en` when absent or blank.
    pub fn language_tag(&self) -> String {
        self.language
            .as_deref()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    }
}

/// Which path produced the reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseSource {
    UpstreamAi,
    Fallback,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub source: ResponseSource,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TestResponse {
    pub message: String,
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotFoundResponse {
    pub success: bool,
    pub error: String,
    pub available_endpoints: Vec<String>,
}

impl Default for NotFoundResponse {
    fn default() -> Self {
        Self {
            success: false,
            error: "Endpoint not found".to_string(),
            available_endpoints: AVAILABLE_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        }
    }
}
