//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional Swagger UI / OpenAPI document (disable with `NATUREHEAL_ENABLE_SWAGGER=false`)
//! - Health / heartbeat route
//! - AI assistant routes under `/api/ai`

pub mod ai;
pub mod doc;
mod health;

use crate::middleware::{cors, trace};
use crate::state::AppState;
use axum::{Router, middleware};
use std::sync::Arc;
use utoipa_swagger_ui::SwaggerUi;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(health::router())
        .nest("/api/ai", ai::router());

    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(cors::cors_layer(&state.config))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}
