pub mod assist;
pub mod chat;
pub mod generate;
pub mod stats;

use crate::state::AppState;
use utoipa::OpenApi;

use axum::Router;
use std::sync::Arc;

/// Routes nested under `/api/ai`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(chat::router())
        .merge(generate::router())
        .merge(stats::router())
        .merge(assist::router())
}

#[derive(OpenApi)]
#[openapi()]
pub struct AiApi;

pub fn api_docs() -> utoipa::openapi::OpenApi {
    let mut doc = AiApi::openapi();
    doc.merge(chat::ChatApi::openapi());
    doc.merge(generate::GenerateApi::openapi());
    doc.merge(stats::StatsApi::openapi());
    doc.merge(assist::AssistApi::openapi());
    doc
}
