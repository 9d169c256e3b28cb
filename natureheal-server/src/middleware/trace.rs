use axum::{
    body::Body,
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

pub static X_TRACE_ID: &str = "x-trace-id";

/// Tag each request with a trace id and log its status and latency.
///
/// Bodies are never logged: chat messages and health data are personal.
pub async fn trace_middleware(mut req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    // A hyphenated UUID is always a valid header value.
    let header_value = HeaderValue::from_str(&trace_id.to_string()).ok();

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("→ request started");
        if let Some(value) = &header_value {
            req.headers_mut().insert(X_TRACE_ID, value.clone());
        }

        let mut response = next.run(req).await;

        if let Some(value) = header_value {
            response.headers_mut().insert(X_TRACE_ID, value);
        }
        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );
        response
    }
    .instrument(span)
    .await
}
