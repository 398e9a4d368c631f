//! Gateway proxy endpoint
//!
//! The single dispatch point: resolves the target provider from query
//! parameters, validates the request, normalizes it into the provider's
//! dialect, invokes the upstream, and relays the response back in the
//! selected transfer mode.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::{
    error::{AppError, AppResult},
    proxy::{build_outbound, Provider, TransferMode},
    AppState,
};

/// Query parameters accepted by the proxy endpoint
#[derive(Debug, Deserialize)]
pub struct ProxyParams {
    /// Target provider; defaults to `gemini` when absent
    pub provider: Option<String>,
    /// Provider-relative API path; required for gemini and openai
    pub path: Option<String>,
}

/// Parse the inbound body as a JSON object.
///
/// Anything else (arrays, scalars, malformed JSON) is a client error reported
/// before any outbound call is attempted.
fn parse_body_object(bytes: &Bytes) -> AppResult<Map<String, Value>> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

/// Handle one gateway request end to end
pub async fn proxy(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProxyParams>,
    body: Bytes,
) -> Result<Response, AppError> {
    let start_time = Instant::now();

    let provider = Provider::resolve(params.provider.as_deref())?;
    let body = parse_body_object(&body)?;

    let streaming = body
        .get("stream")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let mode = TransferMode::for_request(provider, streaming);

    let outbound = build_outbound(
        provider,
        params.path.as_deref(),
        body,
        streaming,
        &state.config,
    )?;

    info!(
        provider = provider.name(),
        stream = streaming,
        mode = ?mode,
        url = %outbound.url,
        "Forwarding request to provider"
    );

    let upstream = state.upstream.send(outbound).await?;

    debug!(
        provider = provider.name(),
        status = %upstream.status,
        content_type = ?upstream.headers.get(axum::http::header::CONTENT_TYPE),
        "Received upstream response headers"
    );

    let response = match mode {
        TransferMode::Buffered => crate::proxy::relay::buffered(upstream).await?,
        TransferMode::Streamed => crate::proxy::relay::streamed(upstream)?,
    };

    info!(
        provider = provider.name(),
        status = %response.status(),
        duration_ms = %format!("{:.2}", start_time.elapsed().as_secs_f64() * 1000.0),
        "Relaying response to client"
    );

    Ok(response)
}
