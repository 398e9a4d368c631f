//! Upstream invoker
//!
//! Issues exactly one outbound HTTP POST per inbound request and hands back
//! the raw upstream response: status, headers, and a single-pass byte stream
//! for the body. No retries, no body inspection. An upstream HTTP error
//! status is not an error at this layer; only transport-level failure is.

use std::pin::Pin;

use axum::http::{HeaderMap, StatusCode};
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use tracing::error;

use crate::error::{AppError, AppResult};
use crate::proxy::normalize::OutboundRequest;

/// Boxed error type carried by the upstream body stream
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Single-pass stream of upstream body chunks.
///
/// Consumed exactly once by the relay; dropping it early (e.g. on client
/// disconnect) closes the underlying connection.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, BoxError>> + Send>>;

/// An open upstream response handle
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ByteStream,
}

/// HTTP client for upstream provider calls
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Send one outbound request and return the open response.
    ///
    /// Connection, DNS, TLS, and timeout failures surface as
    /// [`AppError::UpstreamUnreachable`]; the transport error itself is
    /// logged here and never reaches the client.
    pub async fn send(&self, request: OutboundRequest) -> AppResult<UpstreamResponse> {
        let response = self
            .client
            .post(&request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(|e| {
                error!(url = %request.url, error = %e, "Failed to reach upstream provider");
                AppError::UpstreamUnreachable
            })?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let headers = response.headers().clone();

        Ok(UpstreamResponse {
            status,
            headers,
            body: Box::pin(response.bytes_stream().map_err(|e| Box::new(e) as BoxError)),
        })
    }
}
