use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use utoipa::ToSchema;

/// A form value the web client may send as a JSON number or as raw input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumOrText {
    Num(Number),
    Text(String),
}

impl NumOrText {
    /// `false` for `0` and `""`, which the client uses for "not filled in".
    pub fn is_present(&self) -> bool {
        match self {
            NumOrText::Num(n) => n.as_f64() != Some(0.0),
            NumOrText::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumOrText::Num(n) => n.as_f64(),
            NumOrText::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for NumOrText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole floats print without a trailing ".0".
            NumOrText::Num(n) if n.is_f64() => match n.as_f64() {
                Some(v) => write!(f, "{v}"),
                None => write!(f, "{n}"),
            },
            NumOrText::Num(n) => write!(f, "{n}"),
            NumOrText::Text(s) => f.write_str(s),
        }
    }
}

/// Body stats that override the stored profile when present.
///
/// Numeric fields accept numbers or numeric text; empty values fall through to the profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStats {
    #[schema(value_type = Option<f64>)]
    pub age: Option<NumOrText>,
    /// Centimetres.
    #[schema(value_type = Option<f64>)]
    pub height: Option<NumOrText>,
    /// Kilograms.
    #[schema(value_type = Option<f64>)]
    pub weight: Option<NumOrText>,
    pub activity_level: Option<String>,
    pub health_conditions: Option<Vec<String>>,
}

/// Request body for `POST /api/ai/generate-diet`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanRequest {
    pub goals: Option<Vec<String>>,
    pub preferences: Option<Vec<String>>,
    pub restrictions: Option<Vec<String>>,
    pub current_stats: Option<CurrentStats>,
}

/// Request body for `POST /api/ai/health-insights`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightsRequest {
    /// Accepted for client compatibility; the analysis reads stored progress records.
    #[schema(value_type = Option<Object>)]
    pub health_data: Option<Value>,
    /// Look-back window in days (default 30); a number or numeric text.
    #[schema(value_type = Option<f64>)]
    pub time_range: Option<NumOrText>,
}

impl InsightsRequest {
    pub fn days(&self) -> f64 {
        self.time_range
            .as_ref()
            .and_then(NumOrText::as_f64)
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(30.0)
    }
}

/// Request body for `POST /api/ai/health-predictions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionsRequest {
    #[schema(value_type = Option<Object>)]
    pub current_metrics: Option<Value>,
    pub goals: Option<Vec<String>>,
}

/// One record of the caller's progress as embedded in the insights prompt.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressPoint {
    pub date: String,
    pub weight: Option<f64>,
    pub energy: Option<i64>,
    pub sleep: Option<i64>,
    pub stress: Option<i64>,
    pub mood: Option<i64>,
    pub exercise: i64,
    pub symptoms: i64,
}

/// Generated diet plan: the model's object plus generation metadata.
///
/// The plan's own keys sit at the top level, so this is documented as a free-form object.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlanResponse {
    #[serde(flatten)]
    pub plan: serde_json::Map<String, Value>,
    #[serde(rename = "isAIGenerated")]
    pub is_ai_generated: bool,
    pub ai_prompt: String,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    #[schema(value_type = Object)]
    pub insights: Value,
    pub data_points: usize,
    pub analysis_period: String,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PredictionsResponse {
    #[schema(value_type = Object)]
    pub predictions: Value,
    pub generated_at: String,
}

#[cfg(test)]
mod test {
    use super::*;

    fn insights(body: &str) -> InsightsRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn time_range_defaults_to_thirty_days() {
        assert_eq!(InsightsRequest::default().days(), 30.0);
        assert_eq!(insights(r#"{"timeRange": 7}"#).days(), 7.0);
        assert_eq!(insights(r#"{"timeRange": 0}"#).days(), 30.0);
        assert_eq!(insights(r#"{"timeRange": -4}"#).days(), 30.0);
        assert_eq!(insights(r#"{"timeRange": null}"#).days(), 30.0);
    }

    #[test]
    fn time_range_accepts_text_and_fractions() {
        assert_eq!(insights(r#"{"timeRange": "14"}"#).days(), 14.0);
        assert_eq!(insights(r#"{"timeRange": 1.5}"#).days(), 1.5);
        assert_eq!(insights(r#"{"timeRange": "soon"}"#).days(), 30.0);
        assert_eq!(insights(r#"{"timeRange": ""}"#).days(), 30.0);
    }

    #[test]
    fn current_stats_accept_form_text() {
        let req: DietPlanRequest = serde_json::from_str(
            r#"{"currentStats": {"age": "34", "height": 170, "weight": 64.5, "activityLevel": ""}}"#,
        )
        .unwrap();
        let stats = req.current_stats.unwrap();
        let age = stats.age.unwrap();
        assert_eq!(age, NumOrText::Text("34".into()));
        assert_eq!(age.to_string(), "34");
        assert_eq!(stats.height.unwrap().to_string(), "170");
        assert_eq!(stats.weight.unwrap().to_string(), "64.5");
    }

    #[test]
    fn blank_and_zero_values_are_not_present() {
        assert!(!NumOrText::Text(String::new()).is_present());
        assert!(!NumOrText::Num(0.into()).is_present());
        assert!(NumOrText::Text("0".into()).is_present());
        assert_eq!(NumOrText::Num(Number::from_f64(61.0).unwrap()).to_string(), "61");
    }

    #[test]
    fn diet_response_flattens_the_plan() {
        let mut plan = serde_json::Map::new();
        plan.insert("title".into(), Value::from("Calm gut"));
        let body = serde_json::to_value(DietPlanResponse {
            plan,
            is_ai_generated: true,
            ai_prompt: "p".into(),
            generated_at: "2025-01-01T00:00:00.000Z".into(),
        })
        .unwrap();
        assert_eq!(body["title"], "Calm gut");
        assert_eq!(body["isAIGenerated"], true);
        assert_eq!(body["aiPrompt"], "p");
    }
}
