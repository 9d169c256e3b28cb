//! Rule-based assistant endpoints that never reach the language model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AppointmentSuggestionRequest {
    #[schema(value_type = Option<Object>)]
    pub symptoms: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub preferences: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSuggestions {
    pub recommended_specialty: String,
    pub urgency: String,
    pub suggested_doctors: Vec<String>,
    pub preparation_tips: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnalysisRequest {
    #[schema(value_type = Option<Object>)]
    pub symptoms: Option<Value>,
    #[schema(value_type = Option<Object>)]
    pub user_profile: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymptomRecommendations {
    pub immediate: String,
    pub when_to_see_doctor: String,
    pub home_remedies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnalysis {
    pub possible_conditions: Vec<String>,
    pub severity: String,
    pub recommendations: SymptomRecommendations,
    pub disclaimer: String,
}

/// Request body for `POST /api/ai/wellness-plan`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WellnessPlanRequest {
    /// Required; one weekly goal is produced per entry.
    pub goals: Option<Vec<String>>,
    #[schema(value_type = Option<Object>)]
    pub current_health: Option<Value>,
    /// `dietaryPreferences` is read from here when present.
    #[schema(value_type = Option<Object>)]
    pub preferences: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DailyRoutine {
    pub morning: Vec<String>,
    pub afternoon: Vec<String>,
    pub evening: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGoal {
    pub goal: String,
    pub weekly_target: String,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NutritionFocus {
    #[schema(value_type = Object)]
    pub focus: Value,
    pub sample_meal: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WellnessPlan {
    pub daily_routine: DailyRoutine,
    pub weekly_goals: Vec<WeeklyGoal>,
    pub nutrition: NutritionFocus,
    pub tracking: Vec<String>,
}
