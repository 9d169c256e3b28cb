use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::ai::fallback::Outcome;
use crate::error::ServerError;
use crate::handlers::generation;
use crate::middleware::AuthUser;
use crate::schemas::ai::generate::{
    CurrentStats, DietPlanRequest, DietPlanResponse, InsightsRequest, InsightsResponse,
    PredictionsRequest, PredictionsResponse,
};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(generate_diet, health_insights, health_predictions),
    components(schemas(
        CurrentStats,
        DietPlanRequest,
        InsightsRequest,
        InsightsResponse,
        PredictionsRequest,
        PredictionsResponse
    ))
)]
pub struct GenerateApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/generate-diet", post(generate_diet))
        .route("/health-insights", post(health_insights))
        .route("/health-predictions", post(health_predictions))
}

#[utoipa::path(
    post,
    path = "/api/ai/generate-diet",
    tag = "ai",
    request_body = DietPlanRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Generated plan with isAIGenerated, aiPrompt and generatedAt", body = serde_json::Value),
        (status = 401, description = "Not authorized"),
        (status = 500, description = "Model failed or returned no plan (`fallback: true`)"),
        (status = 503, description = "AI service not available (`fallback: true`)"),
    )
)]
pub async fn generate_diet(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    payload: Result<Json<DietPlanRequest>, JsonRejection>,
) -> Result<Outcome<Json<DietPlanResponse>>, ServerError> {
    let Json(req) = payload?;
    Ok(generation::diet_plan(&state.gateway, Some(&user), &req).await)
}

#[utoipa::path(
    post,
    path = "/api/ai/health-insights",
    tag = "ai",
    request_body = InsightsRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Insights over the caller's recent progress (placeholder when unparseable)", body = InsightsResponse),
        (status = 401, description = "Not authorized"),
        (status = 500, description = "Failed to generate health insights"),
        (status = 503, description = "AI service not available"),
    )
)]
pub async fn health_insights(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    payload: Result<Json<InsightsRequest>, JsonRejection>,
) -> Result<Outcome<Json<InsightsResponse>>, ServerError> {
    let Json(req) = payload?;
    Ok(generation::health_insights(&*state.store, &state.gateway, &user.id, &req).await)
}

#[utoipa::path(
    post,
    path = "/api/ai/health-predictions",
    tag = "ai",
    request_body = PredictionsRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Predicted outcomes (placeholder when unparseable)", body = PredictionsResponse),
        (status = 401, description = "Not authorized"),
        (status = 500, description = "Failed to generate predictions"),
        (status = 503, description = "AI service not available"),
    )
)]
pub async fn health_predictions(
    State(state): State<Arc<AppState>>,
    AuthUser(_user): AuthUser,
    payload: Result<Json<PredictionsRequest>, JsonRejection>,
) -> Result<Outcome<Json<PredictionsResponse>>, ServerError> {
    let Json(req) = payload?;
    Ok(generation::health_predictions(&state.gateway, &req).await)
}
