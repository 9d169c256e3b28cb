use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use tracing::debug;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::handlers::assist::{self, has_content};
use crate::middleware::AuthUser;
use crate::schemas::ai::assist::{
    AppointmentSuggestionRequest, AppointmentSuggestions, DailyRoutine, NutritionFocus,
    SymptomAnalysis, SymptomAnalysisRequest, SymptomRecommendations, WeeklyGoal, WellnessPlan,
    WellnessPlanRequest,
};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(appointment_suggestions, symptom_analysis, wellness_plan),
    components(schemas(
        AppointmentSuggestionRequest,
        AppointmentSuggestions,
        SymptomAnalysisRequest,
        SymptomRecommendations,
        SymptomAnalysis,
        WellnessPlanRequest,
        DailyRoutine,
        WeeklyGoal,
        NutritionFocus,
        WellnessPlan
    ))
)]
pub struct AssistApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/appointment-suggestions", post(appointment_suggestions))
        .route("/symptom-analysis", post(symptom_analysis))
        .route("/wellness-plan", post(wellness_plan))
}

#[utoipa::path(
    post,
    path = "/api/ai/appointment-suggestions",
    tag = "ai",
    request_body = AppointmentSuggestionRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Suggested specialty and preparation", body = AppointmentSuggestions),
        (status = 401, description = "Not authorized"),
    )
)]
pub async fn appointment_suggestions(
    AuthUser(user): AuthUser,
    payload: Result<Json<AppointmentSuggestionRequest>, JsonRejection>,
) -> Result<Json<AppointmentSuggestions>, ServerError> {
    let Json(req) = payload?;
    debug!(user_id = %user.id, has_symptoms = has_content(req.symptoms.as_ref()), "appointment suggestions");
    Ok(Json(assist::appointment_suggestions()))
}

#[utoipa::path(
    post,
    path = "/api/ai/symptom-analysis",
    tag = "ai",
    request_body = SymptomAnalysisRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "General guidance with disclaimer", body = SymptomAnalysis),
        (status = 401, description = "Not authorized"),
    )
)]
pub async fn symptom_analysis(
    AuthUser(user): AuthUser,
    payload: Result<Json<SymptomAnalysisRequest>, JsonRejection>,
) -> Result<Json<SymptomAnalysis>, ServerError> {
    let Json(req) = payload?;
    debug!(user_id = %user.id, has_symptoms = has_content(req.symptoms.as_ref()), "symptom analysis");
    Ok(Json(assist::symptom_analysis()))
}

#[utoipa::path(
    post,
    path = "/api/ai/wellness-plan",
    tag = "ai",
    request_body = WellnessPlanRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Daily routine and weekly goals", body = WellnessPlan),
        (status = 400, description = "Goals are required"),
        (status = 401, description = "Not authorized"),
    )
)]
pub async fn wellness_plan(
    AuthUser(_user): AuthUser,
    payload: Result<Json<WellnessPlanRequest>, JsonRejection>,
) -> Result<Json<WellnessPlan>, ServerError> {
    let Json(req) = payload?;
    Ok(Json(assist::wellness_plan(&req)?))
}

#[cfg(test)]
mod test {
    use crate::ai::Gateway;
    use crate::routes::ai::testing::{app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn assist_routes_answer_without_a_model() {
        let (app, state) = app(Gateway::unconfigured()).await;
        state.store.seed_user("u1", "patient").await;

        let (status, body) = send(&app, "POST", "/api/ai/appointment-suggestions", Some("u1"), Some(json!({"symptoms": ["cough"]}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommendedSpecialty"], "General Medicine");

        let (status, body) = send(&app, "POST", "/api/ai/symptom-analysis", Some("u1"), Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["recommendations"]["whenToSeeDoctor"], "If symptoms persist beyond 7 days");

        let (status, body) = send(
            &app,
            "POST",
            "/api/ai/wellness-plan",
            Some("u1"),
            Some(json!({"goals": ["sleep"], "preferences": {"dietaryPreferences": ["vegetarian"]}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["weeklyGoals"][0]["weeklyTarget"], "5 days");
        assert_eq!(body["nutrition"]["focus"], json!(["vegetarian"]));
    }

    #[tokio::test]
    async fn wellness_plan_without_goals_is_400() {
        let (app, state) = app(Gateway::unconfigured()).await;
        state.store.seed_user("u1", "patient").await;
        let (status, body) = send(&app, "POST", "/api/ai/wellness-plan", Some("u1"), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Goals are required");
    }
}
