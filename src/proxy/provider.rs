//! Provider registry
//!
//! The supported upstream providers form a closed set. Each variant carries
//! its invocation rules: base URL, credential lookup, how streaming output is
//! requested, and whether a client-supplied `path` is required. The registry
//! is pure configuration lookup; no I/O happens here.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// Anthropic API version token sent with every Claude request
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Gemini operation suffix for non-streaming generation
pub const GEMINI_GENERATE_SUFFIX: &str = ":generateContent";

/// Gemini operation suffix for streaming generation
pub const GEMINI_STREAM_SUFFIX: &str = ":streamGenerateContent";

/// How a provider is told to produce streaming output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamSignal {
    /// Streaming is selected by rewriting the operation suffix in the URL
    /// path; the `stream` body field must not be forwarded.
    UrlSuffix,
    /// Streaming is selected by the `stream` body field, passed through
    /// unchanged.
    BodyFlag,
}

/// A supported upstream LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAI,
    Claude,
}

impl Provider {
    /// Resolve a provider from the `provider` query parameter.
    ///
    /// Matching is case-insensitive. An absent parameter defaults to Gemini
    /// for backward compatibility; an unrecognized value is a client error,
    /// never a silent default.
    pub fn resolve(value: Option<&str>) -> AppResult<Self> {
        let Some(value) = value else {
            return Ok(Provider::Gemini);
        };

        match value.to_ascii_lowercase().as_str() {
            "gemini" => Ok(Provider::Gemini),
            "openai" => Ok(Provider::OpenAI),
            "claude" => Ok(Provider::Claude),
            _ => Err(AppError::BadRequest("Invalid 'provider'.".to_string())),
        }
    }

    /// Provider name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAI => "openai",
            Provider::Claude => "claude",
        }
    }

    /// Whether the client must supply a `path` query parameter
    pub fn requires_path(&self) -> bool {
        !matches!(self, Provider::Claude)
    }

    /// How this provider activates streaming output
    pub fn stream_signal(&self) -> StreamSignal {
        match self {
            Provider::Gemini => StreamSignal::UrlSuffix,
            Provider::OpenAI | Provider::Claude => StreamSignal::BodyFlag,
        }
    }

    /// Base URL for this provider from configuration
    pub fn base_url<'a>(&self, config: &'a Config) -> &'a str {
        match self {
            Provider::Gemini => &config.gemini_api_url,
            Provider::OpenAI => &config.openai_api_url,
            Provider::Claude => &config.claude_api_url,
        }
    }

    /// API key for this provider, or a 503 if it is not configured
    pub fn api_key<'a>(&self, config: &'a Config) -> AppResult<&'a str> {
        let key = match self {
            Provider::Gemini => config.gemini_api_key.as_deref(),
            Provider::OpenAI => config.openai_api_key.as_deref(),
            Provider::Claude => config.claude_api_key.as_deref(),
        };

        key.ok_or_else(|| {
            AppError::ServiceUnavailable(format!(
                "Provider '{}' is not configured on this gateway",
                self.name()
            ))
        })
    }

    /// Build the outbound header set for this provider.
    ///
    /// The credential is always the gateway's own, never the client's.
    pub fn build_headers(&self, api_key: &str) -> AppResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let credential = |value: String| {
            HeaderValue::from_str(&value).map_err(|_| {
                AppError::ServiceUnavailable(format!(
                    "Provider '{}' credential is not a valid header value",
                    self.name()
                ))
            })
        };

        match self {
            Provider::Gemini => {
                headers.insert("x-goog-api-key", credential(api_key.to_string())?);
            }
            Provider::OpenAI => {
                headers.insert(AUTHORIZATION, credential(format!("Bearer {}", api_key))?);
            }
            Provider::Claude => {
                headers.insert("x-api-key", credential(api_key.to_string())?);
                headers.insert(
                    "anthropic-version",
                    HeaderValue::from_static(ANTHROPIC_VERSION),
                );
            }
        }

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_providers_case_insensitively() {
        assert_eq!(Provider::resolve(Some("gemini")).unwrap(), Provider::Gemini);
        assert_eq!(Provider::resolve(Some("OpenAI")).unwrap(), Provider::OpenAI);
        assert_eq!(Provider::resolve(Some("CLAUDE")).unwrap(), Provider::Claude);
    }

    #[test]
    fn absent_provider_defaults_to_gemini() {
        assert_eq!(Provider::resolve(None).unwrap(), Provider::Gemini);
    }

    #[test]
    fn unknown_provider_is_a_client_error() {
        let err = Provider::resolve(Some("mistral")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn path_requirement_per_provider() {
        assert!(Provider::Gemini.requires_path());
        assert!(Provider::OpenAI.requires_path());
        assert!(!Provider::Claude.requires_path());
    }

    #[test]
    fn stream_signal_per_provider() {
        assert_eq!(Provider::Gemini.stream_signal(), StreamSignal::UrlSuffix);
        assert_eq!(Provider::OpenAI.stream_signal(), StreamSignal::BodyFlag);
        assert_eq!(Provider::Claude.stream_signal(), StreamSignal::BodyFlag);
    }

    #[test]
    fn gemini_headers_carry_goog_api_key() {
        let headers = Provider::Gemini.build_headers("secret-key").unwrap();
        assert_eq!(headers.get("x-goog-api-key").unwrap(), "secret-key");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn openai_headers_carry_bearer_token() {
        let headers = Provider::OpenAI.build_headers("secret-key").unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer secret-key");
    }

    #[test]
    fn claude_headers_carry_api_key_and_version() {
        let headers = Provider::Claude.build_headers("secret-key").unwrap();
        assert_eq!(headers.get("x-api-key").unwrap(), "secret-key");
        assert_eq!(headers.get("anthropic-version").unwrap(), ANTHROPIC_VERSION);
    }

    #[test]
    fn missing_api_key_is_service_unavailable() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            upstream_timeout_seconds: None,
            gemini_api_url: "http://gemini.test".to_string(),
            gemini_api_key: None,
            openai_api_url: "http://openai.test/v1".to_string(),
            openai_api_key: Some("sk-test".to_string()),
            claude_api_url: "http://claude.test".to_string(),
            claude_api_key: None,
        };

        assert!(matches!(
            Provider::Gemini.api_key(&config),
            Err(AppError::ServiceUnavailable(_))
        ));
        assert_eq!(Provider::OpenAI.api_key(&config).unwrap(), "sk-test");
    }
}
