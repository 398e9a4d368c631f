//! Configuration management for the gateway
//!
//! Configuration is loaded from environment variables. Provider credentials
//! are optional at startup; a request targeting an unconfigured provider is
//! rejected at request time instead of preventing the process from starting.

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Optional whole-request timeout for upstream calls (seconds).
    /// Unset means no timeout is imposed by this layer.
    pub upstream_timeout_seconds: Option<u64>,

    /// Gemini API base URL
    pub gemini_api_url: String,
    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// OpenAI API base URL (includes the /v1 prefix)
    pub openai_api_url: String,
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Claude (Anthropic) API base URL
    pub claude_api_url: String,
    /// Claude API key
    pub claude_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("GATEWAY_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid GATEWAY_PORT")?,

            upstream_timeout_seconds: match env::var("GATEWAY_UPSTREAM_TIMEOUT_SECONDS") {
                Ok(v) => Some(
                    v.parse()
                        .context("Invalid GATEWAY_UPSTREAM_TIMEOUT_SECONDS")?,
                ),
                Err(_) => None,
            },

            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),

            openai_api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),

            claude_api_url: env::var("CLAUDE_API_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".to_string()),
            claude_api_key: env::var("CLAUDE_API_KEY").ok(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        // No env vars are required; everything has a default or is optional
        let config = Config::from_env().unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream_timeout_seconds, None);
        assert_eq!(
            config.gemini_api_url,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(config.openai_api_url, "https://api.openai.com/v1");
        assert_eq!(config.claude_api_url, "https://api.anthropic.com");
    }
}
