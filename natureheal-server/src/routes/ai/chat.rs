use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tracing::info;
use utoipa::OpenApi;

use crate::entities::{ChatExchangeStore, Category, Feedback};
use crate::error::ServerError;
use crate::handlers;
use crate::middleware::{AuthUser, MaybeUser};
use crate::schemas::ai::chat::{
    ChatRequest, ChatResponse, FeedbackRequest, HistoryEntry, HistoryQuery, HistoryResponse,
    MessageResponse,
};
use crate::state::AppState;

pub const HISTORY_PAGE_SIZE: i64 = 20;

#[derive(OpenApi)]
#[openapi(
    paths(chat, history, submit_feedback),
    components(schemas(
        ChatRequest,
        ChatResponse,
        Category,
        Feedback,
        HistoryEntry,
        HistoryResponse,
        FeedbackRequest,
        MessageResponse
    ))
)]
pub struct ChatApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(chat))
        .route("/history", get(history))
        .route("/feedback/{id}", put(submit_feedback))
}

#[utoipa::path(
    post,
    path = "/api/ai/chat",
    tag = "ai",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply (canned when the model is not configured)", body = ChatResponse),
        (status = 400, description = "Message missing or too long"),
        (status = 500, description = "AI service temporarily unavailable"),
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ServerError> {
    let Json(req) = payload?;
    let resp = handlers::chat::chat(&*state.store, &state.gateway, user.as_ref(), req).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/ai/history",
    tag = "ai",
    params(HistoryQuery),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller's chat history, newest first", body = HistoryResponse),
        (status = 401, description = "Not authorized"),
    )
)]
pub async fn history(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ServerError> {
    let Query(query) = query?;
    let page = query.page();
    let offset = HISTORY_PAGE_SIZE.saturating_mul(page - 1);
    let (rows, total) = state
        .store
        .list_exchanges_for_user(&user.id, query.category, HISTORY_PAGE_SIZE, offset)
        .await?;
    Ok(Json(HistoryResponse {
        queries: rows.iter().map(|r| r.to_history_entry()).collect(),
        page,
        pages: (total + HISTORY_PAGE_SIZE - 1) / HISTORY_PAGE_SIZE,
        total,
    }))
}

#[utoipa::path(
    put,
    path = "/api/ai/feedback/{id}",
    tag = "ai",
    params(("id" = String, Path, description = "Chat exchange id")),
    request_body = FeedbackRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Feedback stored", body = MessageResponse),
        (status = 400, description = "Unknown feedback value"),
        (status = 401, description = "Caller does not own the exchange"),
        (status = 404, description = "Query not found"),
    )
)]
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ServerError> {
    let Json(req) = payload?;
    let exchange = state
        .store
        .get_exchange(&id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Query not found".into()))?;

    if exchange.user_id.as_deref() != Some(user.id.as_str()) {
        return Err(ServerError::Unauthorized("Not authorized".into()));
    }

    state.store.set_feedback(&id, req.feedback).await?;
    info!(exchange_id = %id, feedback = %req.feedback, "feedback recorded");
    Ok(Json(MessageResponse {
        message: "Feedback submitted successfully".into(),
    }))
}
