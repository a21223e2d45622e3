// src/services/chatbot.rs
use tracing::{debug, info, warn};

use crate::{
    message::{ChatRequest, ChatResponse, ResponseSource},
    services::{
        catalog::{ResponseCatalog, Topic},
        upstream::{CompletionProvider, try_upstream_completion},
    },
};

pub const EMPTY_MESSAGE_REPLY: &str = "Please type a message";

/// Keyword sets in priority order; the first topic with any substring hit wins.
/// "hi" also hits "this" and "which", "call" hits "recall"; the order settles it.
pub const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (Topic::Greeting, &["hello", "hi", "ሰላም"]),
    (
        Topic::Services,
        &["service", "what do you do", "offer", "አገልግሎት"],
    ),
    (Topic::Pricing, &["price", "cost", "how much", "ዋጋ"]),
    (
        Topic::Contact,
        &["contact", "call", "email", "phone", "አንግል"],
    ),
    (Topic::Website, &["website", "web", "site", "ድር"]),
    (Topic::Seo, &["seo", "search", "google"]),
    (Topic::Social, &["social media", "facebook", "instagram"]),
    (Topic::Branding, &["brand", "logo", "identity", "ብሬንድ"]),
    (Topic::Thanks, &["thank", "thanks"]),
    (Topic::Farewell, &["bye", "goodbye", "see you"]),
];

pub fn detect_topic(msg: &str) -> Topic {
    let msg_lower = msg.trim().to_lowercase();

    TOPIC_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| msg_lower.contains(k)))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::Default)
}

/// Keyword-matched catalog reply. `msg` must already be non-empty.
pub fn select_response<'a>(catalog: &'a ResponseCatalog, msg: &str, language: &str) -> &'a str {
    let topic = detect_topic(msg);
    debug!(%topic, language, "catalog topic");
    catalog.lookup(language, topic)
}

/// Full chat flow: validate, try the upstream provider when one is set,
/// otherwise (or on any upstream failure) answer from the catalog.
pub async fn generate_reply(
    catalog: &ResponseCatalog,
    provider: Option<&dyn CompletionProvider>,
    request: &ChatRequest,
) -> ChatResponse {
    let trimmed = request.message.as_deref().map(str::trim).unwrap_or_default();

    if trimmed.is_empty() {
        debug!("empty chat message");
        return ChatResponse {
            success: false,
            response: EMPTY_MESSAGE_REPLY.to_string(),
            source: ResponseSource::Fallback,
        };
    }

    let language = request.language_tag();

    if let Some(provider) = provider {
        match try_upstream_completion(provider, trimmed, &language).await {
            Ok(text) => {
                info!(provider = provider.name(), %language, "answered by upstream");
                return ChatResponse {
                    success: true,
                    response: text,
                    source: ResponseSource::UpstreamAi,
                };
            }
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "upstream failed, using fallback");
            }
        }
    }

    info!(%language, "answered from catalog");

    ChatResponse {
        success: true,
        response: select_response(catalog, trimmed, &language).to_string(),
        source: ResponseSource::Fallback,
    }
}
