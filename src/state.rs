// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::error::StartupError;
use crate::services::catalog::ResponseCatalog;
use crate::services::upstream::{CompletionProvider, provider_from_config};

pub type SharedState = Arc<AppState>;

/// Read-only per-process state; requests never mutate it.
pub struct AppState {
    pub catalog: ResponseCatalog,
    pub upstream: Option<Arc<dyn CompletionProvider>>,
}

impl AppState {
    pub fn new(catalog: ResponseCatalog, upstream: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self { catalog, upstream }
    }

    /// Built-in catalog, no upstream provider.
    pub fn fallback_only() -> Result<Self, StartupError> {
        Ok(Self::new(ResponseCatalog::builtin()?, None))
    }

    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let upstream = config
            .upstream
            .as_ref()
            .map(provider_from_config)
            .transpose()?;
        Ok(Self::new(ResponseCatalog::builtin()?, upstream))
    }
}
