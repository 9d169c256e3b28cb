use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::entities::ChatExchangeStore;
use crate::error::ServerError;
use crate::middleware::AdminUser;
use crate::schemas::ai::stats::{CategoryCount, StatsResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_stats), components(schemas(CategoryCount, StatsResponse)))]
pub struct StatsApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/stats", get(get_stats))
}

/// Aggregate chat usage across all users. Admin only.
#[utoipa::path(
    get,
    path = "/api/ai/stats",
    tag = "ai",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Usage statistics", body = StatsResponse),
        (status = 401, description = "Not authorized as an admin"),
    )
)]
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<StatsResponse>, ServerError> {
    let stats = state.store.exchange_stats().await?;
    Ok(Json(stats.into()))
}

#[cfg(test)]
mod test {
    use crate::ai::Gateway;
    use crate::ai::gateway::ScriptedModel;
    use crate::routes::ai::testing::{app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn stats_are_admin_only() {
        let (app, state) = app(Gateway::unconfigured()).await;
        state.store.seed_user("p1", "patient").await;
        let (status, body) = send(&app, "GET", "/api/ai/stats", Some("p1"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Not authorized as an admin");
    }

    #[tokio::test]
    async fn stats_aggregate_logged_chats() {
        let (app, state) = app(Gateway::new(ScriptedModel::replying("Namaste."))).await;
        state.store.seed_user("admin", "admin").await;
        state.store.seed_user("p1", "patient").await;

        for (user, message) in [(Some("p1"), "yoga flow"), (Some("p1"), "asana list"), (None, "diet tips")] {
            let (status, _) = send(&app, "POST", "/api/ai/chat", user, Some(json!({"message": message}))).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send(&app, "GET", "/api/ai/stats", Some("admin"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalQueries"], 3);
        assert_eq!(body["uniqueUsers"], 1);
        assert_eq!(body["categoryStats"][0], json!({"category": "yoga", "count": 2}));
        assert_eq!(body["categoryStats"][1], json!({"category": "nutrition", "count": 1}));
        assert!(body["avgResponseTime"].as_f64().unwrap() >= 0.0);
    }
}
