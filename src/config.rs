// src/config.rs
use std::{path::PathBuf, time::Duration};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const MAX_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_TOKENS: u32 = 300;

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const OPENAI_MODEL: &str = "gpt-3.5-turbo";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    OpenAi,
}

/// Settings for the hosted completion API. Only present when a key is set.
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub kind: ProviderKind,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_tokens: u32,
}

// Keep the key out of logs.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("kind", &self.kind)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub public_dir: PathBuf,
    pub upstream: Option<UpstreamConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            upstream: None,
        }
    }
}

impl Config {
    /// Read the process environment. Call `dotenvy::dotenv()` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let public_dir = get("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR));

        let enabled = match get("CHATBOT_UPSTREAM").map(|m| m.to_lowercase()) {
            None => true,
            Some(mode) if mode == "auto" || mode == "on" => true,
            Some(mode) if mode == "off" => false,
            Some(mode) => {
                return Err(ConfigError::Invalid {
                    key: "CHATBOT_UPSTREAM",
                    value: mode,
                });
            }
        };

        let timeout_secs = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid {
                    key: "UPSTREAM_TIMEOUT_SECS",
                    value: raw,
                })?
                .clamp(1, MAX_TIMEOUT_SECS),
            None => DEFAULT_TIMEOUT_SECS,
        };

        let max_tokens = match get("UPSTREAM_MAX_TOKENS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "UPSTREAM_MAX_TOKENS",
                        value: raw,
                    });
                }
            },
            None => DEFAULT_MAX_TOKENS,
        };

        let timeout = Duration::from_secs(timeout_secs);
        let upstream = if !enabled {
            None
        } else if let Some(api_key) = get("GEMINI_API_KEY") {
            Some(UpstreamConfig {
                kind: ProviderKind::Gemini,
                api_key,
                model: get("GEMINI_MODEL").unwrap_or_else(|| GEMINI_MODEL.to_string()),
                base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| GEMINI_BASE_URL.to_string()),
                timeout,
                max_tokens,
            })
        } else if let Some(api_key) = get("OPENAI_API_KEY") {
            Some(UpstreamConfig {
                kind: ProviderKind::OpenAi,
                api_key,
                model: get("OPENAI_MODEL").unwrap_or_else(|| OPENAI_MODEL.to_string()),
                base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| OPENAI_BASE_URL.to_string()),
                timeout,
                max_tokens,
            })
        } else {
            None
        };

        Ok(Self {
            port,
            public_dir,
            upstream,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(cfg.upstream.is_none());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "PORT",
                value: "eighty".into()
            }
        );
    }

    #[test]
    fn gemini_key_wins_over_openai() {
        let cfg = load(&[("GEMINI_API_KEY", "g-key"), ("OPENAI_API_KEY", "o-key")]).unwrap();
        let up = cfg.upstream.unwrap();
        assert_eq!(up.kind, ProviderKind::Gemini);
        assert_eq!(up.api_key, "g-key");
        assert_eq!(up.model, GEMINI_MODEL);
        assert_eq!(up.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn openai_used_when_only_key() {
        let cfg = load(&[("OPENAI_API_KEY", "o-key"), ("OPENAI_MODEL", "gpt-4o-mini")]).unwrap();
        let up = cfg.upstream.unwrap();
        assert_eq!(up.kind, ProviderKind::OpenAi);
        assert_eq!(up.model, "gpt-4o-mini");
        assert_eq!(up.base_url, OPENAI_BASE_URL);
    }

    #[test]
    fn blank_key_means_fallback_only() {
        let cfg = load(&[("GEMINI_API_KEY", "   ")]).unwrap();
        assert!(cfg.upstream.is_none());
    }

    #[test]
    fn upstream_off_ignores_keys() {
        let cfg = load(&[("GEMINI_API_KEY", "g-key"), ("CHATBOT_UPSTREAM", "OFF")]).unwrap();
        assert!(cfg.upstream.is_none());
    }

    #[test]
    fn timeout_is_clamped() {
        let cfg = load(&[("OPENAI_API_KEY", "k"), ("UPSTREAM_TIMEOUT_SECS", "120")]).unwrap();
        assert_eq!(
            cfg.upstream.unwrap().timeout,
            Duration::from_secs(MAX_TIMEOUT_SECS)
        );
    }

    #[test]
    fn debug_hides_api_key() {
        let cfg = load(&[("GEMINI_API_KEY", "super-secret")]).unwrap();
        let printed = format!("{:?}", cfg);
        assert!(!printed.contains("super-secret"));
    }
}
