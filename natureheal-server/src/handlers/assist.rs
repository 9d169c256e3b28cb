//! Deterministic assistant answers. No model call is made here.

use serde_json::{Value, json};

use crate::error::ServerError;
use crate::schemas::ai::assist::{
    AppointmentSuggestions, DailyRoutine, NutritionFocus, SymptomAnalysis, SymptomRecommendations,
    WeeklyGoal, WellnessPlan, WellnessPlanRequest,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

pub fn appointment_suggestions() -> AppointmentSuggestions {
    AppointmentSuggestions {
        recommended_specialty: "General Medicine".into(),
        urgency: "medium".into(),
        suggested_doctors: strings(&["Dr. Smith", "Dr. Johnson"]),
        preparation_tips: strings(&["Bring medical history", "List current medications"]),
    }
}

pub fn symptom_analysis() -> SymptomAnalysis {
    SymptomAnalysis {
        possible_conditions: strings(&["Common cold", "Allergies", "Stress-related symptoms"]),
        severity: "mild".into(),
        recommendations: SymptomRecommendations {
            immediate: "Rest and hydration".into(),
            when_to_see_doctor: "If symptoms persist beyond 7 days".into(),
            home_remedies: strings(&["Warm tea with honey", "Steam inhalation", "Adequate rest"]),
        },
        disclaimer: "This is not a medical diagnosis. Please consult a healthcare professional."
            .into(),
    }
}

pub fn wellness_plan(req: &WellnessPlanRequest) -> Result<WellnessPlan, ServerError> {
    let goals = req
        .goals
        .as_ref()
        .ok_or_else(|| ServerError::BadRequest("Goals are required".into()))?;

    let focus = req
        .preferences
        .as_ref()
        .and_then(|p| p.get("dietaryPreferences"))
        .filter(|v| !v.is_null())
        .cloned()
        .unwrap_or_else(|| json!(["balanced"]));

    Ok(WellnessPlan {
        daily_routine: DailyRoutine {
            morning: strings(&["Meditation (10 min)", "Light exercise", "Healthy breakfast"]),
            afternoon: strings(&["Short walk", "Healthy snack"]),
            evening: strings(&["Yoga session", "Light dinner", "Reading before bed"]),
        },
        weekly_goals: goals
            .iter()
            .map(|goal| WeeklyGoal {
                goal: goal.clone(),
                weekly_target: "5 days".into(),
                activities: vec![format!("Activity for {goal}")],
            })
            .collect(),
        nutrition: NutritionFocus {
            focus,
            sample_meal: "Grilled chicken with vegetables and quinoa".into(),
        },
        tracking: strings(&["Daily mood", "Energy levels", "Sleep quality"]),
    })
}

/// `true` when `value` carries any non-null content; used for request logging only.
pub fn has_content(value: Option<&Value>) -> bool {
    value.is_some_and(|v| !v.is_null())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wellness_plan_needs_goals() {
        let err = wellness_plan(&WellnessPlanRequest::default()).unwrap_err();
        assert!(matches!(err, ServerError::BadRequest(_)));
    }

    #[test]
    fn one_weekly_goal_per_requested_goal() {
        let req = WellnessPlanRequest {
            goals: Some(vec!["better sleep".into(), "less stress".into()]),
            ..Default::default()
        };
        let plan = wellness_plan(&req).unwrap();
        assert_eq!(plan.weekly_goals.len(), 2);
        assert_eq!(plan.weekly_goals[1].goal, "less stress");
        assert_eq!(plan.weekly_goals[0].activities, ["Activity for better sleep"]);
        assert_eq!(plan.nutrition.focus, json!(["balanced"]));
    }

    #[test]
    fn dietary_preferences_drive_nutrition_focus() {
        let req = WellnessPlanRequest {
            goals: Some(vec![]),
            preferences: Some(json!({"dietaryPreferences": ["vegan"]})),
            ..Default::default()
        };
        let plan = wellness_plan(&req).unwrap();
        assert!(plan.weekly_goals.is_empty());
        assert_eq!(plan.nutrition.focus, json!(["vegan"]));
    }

    #[test]
    fn canned_answers_are_stable() {
        assert_eq!(appointment_suggestions().suggested_doctors.len(), 2);
        assert_eq!(symptom_analysis().severity, "mild");
        assert!(has_content(Some(&json!({"a": 1}))));
        assert!(!has_content(Some(&Value::Null)));
        assert!(!has_content(None));
    }
}
