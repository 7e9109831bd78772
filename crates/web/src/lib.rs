//! Agrow web application library.
//!
//! Server-rendered farming advisory site: onboarding, a weather and market
//! dashboard, a mandi price explorer, leaf disease detection and a scripted
//! farm assistant. The binary in `main.rs` wires this router to a listener;
//! the integration tests drive it in memory.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod chat;
pub mod config;
pub mod diagnosis;
pub mod error;
pub mod i18n;
pub mod market;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod weather;

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Request, Response},
    routing::get,
};
use tower_http::{
    services::ServeDir,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::diagnosis::MAX_UPLOAD_BYTES;
use crate::middleware::{
    create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Room for multipart boundaries and the other form fields.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the application router with every middleware layer except Sentry,
/// which the binary adds outermost.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(DefaultBodyLimit::max(
            MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the providers.
async fn health() -> &'static str {
    "ok"
}
