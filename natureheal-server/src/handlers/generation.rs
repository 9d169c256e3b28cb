//! Structured generation: diet plans, health insights, health predictions.
//!
//! Each orchestrator builds a prompt, calls the model and extracts a JSON
//! object from the reply. Every failure maps to a [`Fallback`] instead of an
//! error, with per-endpoint status codes:
//!
//! | endpoint    | not configured | model failed | unparseable reply    |
//! |-------------|----------------|--------------|----------------------|
//! | diet plan   | 503            | 500          | 500                  |
//! | insights    | 503            | 500          | 200 with placeholder |
//! | predictions | 503            | 500          | 200 with placeholder |

use axum::Json;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::ai::extract::extract_json;
use crate::ai::fallback::{self, Fallback, Outcome};
use crate::ai::{Gateway, generated_at, prompts};
use crate::entities::{HealthProgressRecord, HealthProgressStore, UserProfile};
use crate::schemas::ai::generate::{
    DietPlanRequest, DietPlanResponse, InsightsRequest, InsightsResponse, PredictionsRequest,
    PredictionsResponse, ProgressPoint,
};

/// Keys the response sets itself; a model-supplied value is dropped.
const DIET_METADATA_KEYS: [&str; 3] = ["isAIGenerated", "aiPrompt", "generatedAt"];

async fn complete_or(
    gateway: &Gateway,
    prompt: &str,
    endpoint: &'static str,
    on_failure: fn() -> Fallback,
) -> Result<String, Fallback> {
    match gateway.complete(prompt).await {
        Ok(text) => {
            debug!(endpoint, raw = %text, "model reply");
            Ok(text)
        }
        Err(e) => {
            warn!(endpoint, error = %e, "language model call failed; using fallback");
            Err(on_failure())
        }
    }
}

pub async fn diet_plan(
    gateway: &Gateway,
    profile: Option<&UserProfile>,
    req: &DietPlanRequest,
) -> Outcome<Json<DietPlanResponse>> {
    if !gateway.is_configured() {
        info!("language model not configured; diet plan unavailable");
        return Outcome::Degraded(fallback::diet_not_configured());
    }

    let prompt = prompts::diet_plan(req, profile);
    let text = match complete_or(gateway, &prompt, "diet_plan", fallback::diet_gateway_failed).await {
        Ok(text) => text,
        Err(fb) => return Outcome::Degraded(fb),
    };

    let mut plan = match extract_json(&text) {
        Ok(plan) => plan,
        Err(e) => {
            warn!(error = %e, "could not parse diet plan from model reply");
            return Outcome::Degraded(fallback::diet_unparseable());
        }
    };
    for key in DIET_METADATA_KEYS {
        plan.remove(key);
    }

    Outcome::Generated(Json(DietPlanResponse {
        plan,
        is_ai_generated: true,
        ai_prompt: prompt,
        generated_at: generated_at(),
    }))
}

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Start of a look-back window of `days` (fractions allowed). Saturates at the earliest time.
fn window_start(days: f64) -> DateTime<Utc> {
    // `as` saturates out-of-range floats at i64::MAX.
    Duration::try_milliseconds((days * MILLIS_PER_DAY) as i64)
        .and_then(|span| Utc::now().checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

impl From<&HealthProgressRecord> for ProgressPoint {
    fn from(r: &HealthProgressRecord) -> Self {
        ProgressPoint {
            date: r.recorded_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            weight: r.weight,
            energy: r.energy,
            sleep: r.sleep_quality,
            stress: r.stress,
            mood: r.mood,
            exercise: r.exercise_count,
            symptoms: r.symptom_count,
        }
    }
}

pub async fn health_insights<S: HealthProgressStore>(
    store: &S,
    gateway: &Gateway,
    user_id: &str,
    req: &InsightsRequest,
) -> Outcome<Json<InsightsResponse>> {
    if !gateway.is_configured() {
        info!("language model not configured; insights unavailable");
        return Outcome::Degraded(fallback::insights_not_configured());
    }

    let days = req.days();
    let records = match store.list_progress_since(user_id, window_start(days)).await {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, user_id, "could not load health progress for insights");
            return Outcome::Degraded(fallback::insights_gateway_failed());
        }
    };
    let points: Vec<ProgressPoint> = records.iter().map(ProgressPoint::from).collect();

    let prompt = prompts::health_insights(&points);
    let text = match complete_or(gateway, &prompt, "health_insights", fallback::insights_gateway_failed).await {
        Ok(text) => text,
        Err(fb) => return Outcome::Degraded(fb),
    };

    let insights = match extract_json(&text) {
        Ok(obj) => Value::Object(obj),
        Err(e) => {
            warn!(error = %e, "could not parse insights from model reply; serving placeholder");
            fallback::placeholder_insights()
        }
    };

    Outcome::Generated(Json(InsightsResponse {
        insights,
        data_points: points.len(),
        analysis_period: format!("{days} days"),
        generated_at: generated_at(),
    }))
}

pub async fn health_predictions(
    gateway: &Gateway,
    req: &PredictionsRequest,
) -> Outcome<Json<PredictionsResponse>> {
    if !gateway.is_configured() {
        info!("language model not configured; predictions unavailable");
        return Outcome::Degraded(fallback::predictions_not_configured());
    }

    let prompt = prompts::health_predictions(req.current_metrics.as_ref(), req.goals.as_ref());
    let text = match complete_or(
        gateway,
        &prompt,
        "health_predictions",
        fallback::predictions_gateway_failed,
    )
    .await
    {
        Ok(text) => text,
        Err(fb) => return Outcome::Degraded(fb),
    };

    let predictions = match extract_json(&text) {
        Ok(obj) => Value::Object(obj),
        Err(e) => {
            warn!(error = %e, "could not parse predictions from model reply; serving placeholder");
            fallback::placeholder_predictions()
        }
    };

    Outcome::Generated(Json(PredictionsResponse {
        predictions,
        generated_at: generated_at(),
    }))
}
