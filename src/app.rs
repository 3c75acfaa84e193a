//! Router assembly
//!
//! Wires the handlers to their routes and wraps them in the request-id,
//! tracing and CORS layers.

use crate::api;
use crate::config::CorsConfig;
use crate::state::AppState;
use anyhow::Context;
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    response
}

/// Build the CORS layer admitting exactly the configured origin
pub fn build_cors_layer(config: &CorsConfig) -> anyhow::Result<CorsLayer> {
    // Credentialed requests cannot use a wildcard origin
    if config.allowed_origin.trim() == "*" {
        anyhow::bail!("CORS origin must be a single origin, not \"*\"");
    }

    let origin = HeaderValue::from_str(&config.allowed_origin)
        .with_context(|| format!("Invalid CORS origin: {}", config.allowed_origin))?;

    // A list only echoes the origin back when the request carries it
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Build the application router
pub fn build_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(api::health_check))
        .route("/files", get(api::list_files).post(api::create_file))
        .route("/files/", get(api::list_files).post(api::create_file))
        .route(
            "/files/:filename",
            get(api::read_file)
                .put(api::update_file)
                .delete(api::delete_file),
        )
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(cors)
        .with_state(state)
}
