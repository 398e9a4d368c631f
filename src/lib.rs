//! LLM Gateway
//!
//! A single-endpoint HTTP gateway that accepts chat/generation requests,
//! rewrites them into the wire format of the targeted provider (Gemini,
//! OpenAI, or Claude), forwards them, and relays the response back either
//! buffered or as an incrementally streamed byte sequence.

pub mod config;
pub mod error;
pub mod proxy;
pub mod routes;

use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::proxy::UpstreamClient;

/// Application state shared across all request handlers.
///
/// Everything here is read-only after startup; concurrent requests share it
/// without locking.
pub struct AppState {
    pub config: Config,
    pub upstream: UpstreamClient,
    pub start_time: Instant,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // One pooled HTTP client for all upstream calls
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(100);
        if let Some(secs) = config.upstream_timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let http_client = builder.build()?;

        Ok(Self {
            config,
            upstream: UpstreamClient::new(http_client),
            start_time: Instant::now(),
        })
    }
}
