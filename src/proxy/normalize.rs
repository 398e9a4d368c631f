//! Request normalizer
//!
//! Turns an inbound gateway request plus a resolved provider into the exact
//! outbound HTTP request for that provider: target URL, header set, and
//! serialized body. All provider dialect differences are decided here, in one
//! place, so the dispatcher never branches on provider identity.

use reqwest::header::HeaderMap;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::proxy::provider::{
    Provider, StreamSignal, GEMINI_GENERATE_SUFFIX, GEMINI_STREAM_SUFFIX,
};

/// A fully normalized outbound request, ready to send
#[derive(Debug)]
pub struct OutboundRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Build the outbound request for one inbound call.
///
/// `body` is the inbound JSON object; ownership is taken because the Gemini
/// dialect mutates it (the `stream` field is stripped before serialization).
/// For providers that accept `stream` in the body it is passed through
/// unchanged.
pub fn build_outbound(
    provider: Provider,
    path: Option<&str>,
    mut body: Map<String, Value>,
    streaming: bool,
    config: &Config,
) -> AppResult<OutboundRequest> {
    let url = match provider {
        Provider::Claude => format!("{}/v1/messages", provider.base_url(config)),
        Provider::OpenAI => {
            let path = require_path(provider, path)?;
            format!("{}/{}", provider.base_url(config), path)
        }
        Provider::Gemini => {
            let path = require_path(provider, path)?;
            let path = if streaming {
                path.replace(GEMINI_GENERATE_SUFFIX, GEMINI_STREAM_SUFFIX)
            } else {
                path.to_string()
            };
            format!("{}/{}", provider.base_url(config), path)
        }
    };

    let api_key = provider.api_key(config)?;
    let headers = provider.build_headers(api_key)?;

    // Gemini signals streaming purely via the URL; an unrecognized `stream`
    // field in the body would be rejected upstream.
    if provider.stream_signal() == StreamSignal::UrlSuffix {
        body.remove("stream");
    }

    let body = serde_json::to_vec(&Value::Object(body))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize body: {}", e)))?;

    Ok(OutboundRequest { url, headers, body })
}

fn require_path<'a>(provider: Provider, path: Option<&'a str>) -> AppResult<&'a str> {
    match path {
        Some(path) if !path.is_empty() => Ok(path),
        _ => {
            debug_assert!(provider.requires_path());
            Err(AppError::BadRequest("Missing 'path' parameter".to_string()))
        }
    }
}
