//! Response relay
//!
//! Copies the upstream response back to the client. Buffered mode drains and
//! re-serializes a JSON body; streamed mode forwards body chunks as they
//! arrive, in order, without materializing the payload. Once streaming
//! headers are committed, a mid-stream failure can only terminate the
//! connection; the client detects truncation at the transport layer.

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::TryStreamExt;
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::proxy::provider::{Provider, StreamSignal};
use crate::proxy::upstream::UpstreamResponse;

/// How the upstream body is transferred to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// Read the full body, parse as JSON, return one JSON response
    Buffered,
    /// Copy bytes incrementally as they arrive
    Streamed,
}

impl TransferMode {
    /// Select the transfer mode for a request.
    ///
    /// Providers that signal streaming via the URL (Gemini) are always
    /// stream-relayed: their non-streaming JSON response forwards safely
    /// byte-for-byte, and the client receives an equivalent result.
    pub fn for_request(provider: Provider, streaming: bool) -> Self {
        if streaming || provider.stream_signal() == StreamSignal::UrlSuffix {
            TransferMode::Streamed
        } else {
            TransferMode::Buffered
        }
    }
}

/// Relay an upstream response in buffered mode.
///
/// The upstream status is preserved, which transparently forwards provider
/// 4xx/5xx responses along with their JSON error bodies.
pub async fn buffered(upstream: UpstreamResponse) -> AppResult<Response> {
    let status = upstream.status;

    let chunks: Vec<_> = upstream.body.try_collect().await.map_err(|e| {
        warn!(status = %status, error = %e, "Upstream body failed before completion");
        AppError::RelayFailed
    })?;
    let bytes = chunks.concat();

    let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
        warn!(status = %status, error = %e, "Upstream returned non-JSON body in buffered mode");
        AppError::RelayFailed
    })?;

    Ok((status, Json(value)).into_response())
}

/// Relay an upstream response in streamed mode.
///
/// The upstream status is committed together with event-transport headers,
/// then body chunks are copied through one by one. If the client disconnects,
/// the body stream is dropped and the upstream connection closes with it.
pub fn streamed(upstream: UpstreamResponse) -> AppResult<Response> {
    let status = upstream.status;

    let body = upstream.body.inspect_err(move |e| {
        // Headers are already on the wire; all we can do is log and cut off.
        warn!(status = %status, error = %e, "Upstream stream failed mid-transfer");
    });

    Response::builder()
        .status(status)
        .header(
            header::CONTENT_TYPE,
            "text/event-stream; charset=utf-8",
        )
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .header("x-accel-buffering", "no")
        .body(Body::from_stream(body))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build response: {}", e)))
}
