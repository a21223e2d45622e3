//! Hosted completion providers (Gemini, OpenAI-compatible).
//!
//! A provider turns a user message into reply text or an `UpstreamError`.
//! Callers always have the keyword catalog to fall back on, so nothing here
//! retries.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ProviderKind, UpstreamConfig};
use crate::error::UpstreamError;

const BUSINESS_FACTS: &str = "\
You are the MIDMES AI assistant for MIDMES Digital Marketing Agency in Addis Ababa, Ethiopia.
Services: web design & development (custom websites, e-commerce, responsive design), \
SEO optimization (Google ranking, local SEO, technical SEO), social media management \
(content creation, community management, paid advertising), branding & identity \
(logo design, brand guides, marketing materials), digital advertising (Google Ads, \
social media ads, retargeting).
Pricing is customized per project; offer a free quote.
Contact: phone +251 979 029 768, email contactmidmes@gmail.com.
Business hours: Mon-Fri 8:30 AM - 5:30 PM, Sat 9:00 AM - 1:00 PM.
Be friendly and concise (at most a few short paragraphs) and steer the conversation \
towards MIDMES services.";

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Hard ceiling for one completion.
    fn timeout(&self) -> Duration;

    async fn complete(&self, message: &str, language: &str) -> Result<String, UpstreamError>;
}

/// Run one completion under the provider's hard timeout. The in-flight
/// request is dropped when the deadline passes.
pub async fn try_upstream_completion(
    provider: &dyn CompletionProvider,
    message: &str,
    language: &str,
) -> Result<String, UpstreamError> {
    let limit = provider.timeout();
    match tokio::time::timeout(limit, provider.complete(message, language)).await {
        Ok(result) => result,
        Err(_) => Err(UpstreamError::Timeout(limit)),
    }
}

/// Reply language for the prompt. Only catalog tags are recognised; any
/// other tag is English and is never copied into the prompt.
pub fn language_name(tag: &str) -> &'static str {
    match tag {
        "am" => "Amharic",
        _ => "English",
    }
}

/// Context for the model: business facts plus the reply language.
pub fn system_prompt(language: &str) -> String {
    format!(
        "{BUSINESS_FACTS}\nAlways reply in {}.",
        language_name(language)
    )
}

/// Single-turn prompt for providers without a separate system role.
pub fn build_prompt(message: &str, language: &str) -> String {
    format!("{}\n\nCustomer message: {message}", system_prompt(language))
}

pub fn provider_from_config(
    config: &UpstreamConfig,
) -> Result<Arc<dyn CompletionProvider>, UpstreamError> {
    let client = reqwest::Client::builder().timeout(config.timeout).build()?;
    let provider: Arc<dyn CompletionProvider> = match config.kind {
        ProviderKind::Gemini => Arc::new(GeminiProvider::new(client, config)),
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(client, config)),
    };
    Ok(provider)
}

fn transport_error(err: reqwest::Error, limit: Duration) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout(limit)
    } else {
        UpstreamError::Transport(err)
    }
}

async fn read_body(resp: reqwest::Response, limit: Duration) -> Result<String, UpstreamError> {
    let status = resp.status();
    let body = resp.text().await.map_err(|e| transport_error(e, limit))?;
    if !status.is_success() {
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

fn non_empty(text: Option<&str>) -> Result<String, UpstreamError> {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(UpstreamError::MalformedPayload("no text in completion".into())),
    }
}

// --- Gemini ---

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    max_tokens: u32,
}

impl GeminiProvider {
    pub fn new(client: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

fn parse_gemini(body: &str) -> Result<String, UpstreamError> {
    let parsed: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| UpstreamError::MalformedPayload(format!("gemini: {e}")))?;
    let text = parsed
        .candidates
        .as_ref()
        .and_then(|c| c.first())
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.first())
        .map(|p| p.text.as_str());
    non_empty(text)
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn complete(&self, message: &str, language: &str) -> Result<String, UpstreamError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: build_prompt(message, language),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                max_output_tokens: self.max_tokens,
                temperature: 0.7,
            },
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!("gemini: POST models/{}:generateContent", self.model);

        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;

        parse_gemini(&read_body(resp, self.timeout).await?)
    }
}

// --- OpenAI-compatible chat completions ---

pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    max_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(client: reqwest::Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            max_tokens: config.max_tokens,
        }
    }
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

fn parse_openai(body: &str) -> Result<String, UpstreamError> {
    let parsed: OpenAiResponse = serde_json::from_str(body)
        .map_err(|e| UpstreamError::MalformedPayload(format!("openai: {e}")))?;
    let text = parsed
        .choices
        .first()
        .and_then(|c| c.message.content.as_deref());
    non_empty(text)
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn complete(&self, message: &str, language: &str) -> Result<String, UpstreamError> {
        let body = OpenAiRequest {
            model: &self.model,
            messages: vec![
                OpenAiMessage {
                    role: "system".to_string(),
                    content: Some(system_prompt(language)),
                },
                OpenAiMessage {
                    role: "user".to_string(),
                    content: Some(message.to_string()),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: 0.7,
        };

        debug!("openai: POST chat/completions model={}", self.model);

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;

        parse_openai(&read_body(resp, self.timeout).await?)
    }
}
