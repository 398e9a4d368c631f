//! Common test utilities for the gateway
//!
//! Shared fixtures for integration tests: a config wired to mock upstream
//! servers and a test server running the real router.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use llm_gateway::{routes, AppState, Config};

/// Test configuration constants
pub mod constants {
    /// Test API key for Gemini
    pub const TEST_GEMINI_API_KEY: &str = "test-gemini-api-key";
    /// Test API key for OpenAI
    pub const TEST_OPENAI_API_KEY: &str = "test-openai-api-key";
    /// Test API key for Claude
    pub const TEST_CLAUDE_API_KEY: &str = "test-claude-api-key";
}

/// Build a gateway config pointing every provider at the given base URLs.
///
/// `openai_url` should be the bare mock server URI; the `/v1` prefix is
/// appended here, matching the production default.
pub fn test_config(gemini_url: &str, openai_url: &str, claude_url: &str) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        upstream_timeout_seconds: None,
        gemini_api_url: gemini_url.to_string(),
        gemini_api_key: Some(constants::TEST_GEMINI_API_KEY.to_string()),
        openai_api_url: format!("{}/v1", openai_url),
        openai_api_key: Some(constants::TEST_OPENAI_API_KEY.to_string()),
        claude_api_url: claude_url.to_string(),
        claude_api_key: Some(constants::TEST_CLAUDE_API_KEY.to_string()),
    }
}

/// Start a test server running the real gateway router
pub fn gateway_server(config: Config) -> TestServer {
    let state = Arc::new(AppState::new(config).expect("failed to build app state"));
    let app = routes::create_router(state);
    TestServer::new(app).expect("failed to start test server")
}
