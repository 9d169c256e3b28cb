//! Prompt templates for each generation endpoint.

use std::fmt::Display;

use serde_json::Value;

use crate::entities::UserProfile;
use crate::schemas::ai::generate::{DietPlanRequest, NumOrText, ProgressPoint};

const NOT_SPECIFIED: &str = "Not specified";

const SYSTEM_PROMPT: &str = "\
You are an AI assistant for a naturopathy and homeopathy website called NatureHeal.
You provide information on natural remedies, yoga asanas, meditation, healthy home remedies, and homeopathic methods to improve health without harmful medicines.
Always emphasize natural and holistic approaches. If a user mentions a disease, suggest consulting a doctor and provide general natural wellness tips.
Do not give medical advice or diagnose conditions. Encourage healthy lifestyle choices.

Categories you can help with:
- General wellness and lifestyle
- Natural remedies for common ailments
- Yoga asanas and their benefits
- Meditation techniques
- Homeopathic principles
- Nutrition and healthy eating
- Stress management and relaxation

Keep responses helpful, informative, and focused on natural health approaches.";

const DIET_LAYOUT: &str = r#"{
  "title": "Plan title",
  "description": "Brief description",
  "duration": 30,
  "dailyCalories": 2200,
  "meals": {
    "breakfast": ["Option 1", "Option 2", "Option 3"],
    "lunch": ["Option 1", "Option 2", "Option 3"],
    "dinner": ["Option 1", "Option 2", "Option 3"],
    "snacks": ["Snack 1", "Snack 2"]
  },
  "tips": ["Tip 1", "Tip 2", "Tip 3"],
  "supplements": [
    {
      "name": "Supplement name",
      "dosage": "dosage info",
      "timing": "when to take",
      "benefits": "health benefits"
    }
  ],
  "weeklyRoutine": {
    "exercise": ["Exercise recommendations"],
    "meditation": ["Meditation suggestions"],
    "sleep": "Sleep recommendations"
  }
}"#;

const INSIGHTS_LAYOUT: &str = r#"{
  "patterns": ["Pattern 1", "Pattern 2", "Pattern 3"],
  "recommendations": ["Recommendation 1", "Recommendation 2"],
  "correlations": ["Correlation 1", "Correlation 2"],
  "predictions": ["Prediction 1", "Prediction 2"],
  "risks": ["Potential risk 1", "Potential risk 2"],
  "strengths": ["Strength 1", "Strength 2"]
}"#;

const PREDICTIONS_LAYOUT: &str = r#"{
  "shortTerm": ["1-week prediction", "2-week prediction"],
  "longTerm": ["1-month prediction", "3-month prediction"],
  "recommendations": ["Action 1", "Action 2", "Action 3"],
  "milestones": ["Milestone 1", "Milestone 2"],
  "challenges": ["Potential challenge 1", "Potential challenge 2"],
  "successFactors": ["Factor 1", "Factor 2"]
}"#;

pub fn chat(message: &str) -> String {
    format!("{SYSTEM_PROMPT}\n\nUser: {message}")
}

/// Comma-joined list, or `fallback` when absent or empty.
fn joined(items: Option<&Vec<String>>, fallback: &str) -> String {
    match items {
        Some(items) if !items.is_empty() => items.join(", "),
        _ => fallback.to_owned(),
    }
}

/// The request value as sent, else the stored profile value.
fn stat_or_profile<P: Display>(stat: Option<&NumOrText>, stored: Option<P>) -> String {
    stat.filter(|v| v.is_present())
        .map(ToString::to_string)
        .or_else(|| stored.map(|v| v.to_string()))
        .unwrap_or_else(|| NOT_SPECIFIED.to_owned())
}

/// Request stats take precedence over the stored profile.
pub fn diet_plan(req: &DietPlanRequest, profile: Option<&UserProfile>) -> String {
    let stats = req.current_stats.clone().unwrap_or_default();
    let age = stat_or_profile(stats.age.as_ref(), profile.and_then(|p| p.age));
    let height = stat_or_profile(stats.height.as_ref(), profile.and_then(|p| p.height));
    let weight = stat_or_profile(stats.weight.as_ref(), profile.and_then(|p| p.weight));
    let gender = profile
        .and_then(|p| p.gender.as_deref())
        .filter(|g| !g.is_empty())
        .unwrap_or(NOT_SPECIFIED);
    let activity = stats
        .activity_level
        .as_deref()
        .filter(|a| !a.is_empty())
        .unwrap_or("moderate");
    let conditions = joined(stats.health_conditions.as_ref(), "None specified");

    format!(
        "Generate a personalized 7-day diet plan for a person with the following profile:

User Profile:
- Age: {age}
- Gender: {gender}
- Height: {height} cm
- Weight: {weight} kg
- Activity Level: {activity}
- Health Conditions: {conditions}

Goals: {goals}
Dietary Preferences: {preferences}
Restrictions/Allergies: {restrictions}

Please provide a comprehensive diet plan in the following JSON format:
{DIET_LAYOUT}

Focus on natural, whole foods and ensure the plan is nutritionally balanced. Consider any restrictions and preferences provided.",
        goals = joined(req.goals.as_ref(), "General health"),
        preferences = joined(req.preferences.as_ref(), "None"),
        restrictions = joined(req.restrictions.as_ref(), "None"),
    )
}

pub fn health_insights(points: &[ProgressPoint]) -> String {
    let data = serde_json::to_string_pretty(points).unwrap_or_else(|_| "[]".to_owned());
    format!(
        "Analyze the following health progress data and provide insights:

Health Data Summary:
{data}

Please provide analysis in the following JSON format:
{INSIGHTS_LAYOUT}

Focus on natural health approaches and holistic wellness. Be encouraging and provide actionable insights."
    )
}

pub fn health_predictions(current_metrics: Option<&Value>, goals: Option<&Vec<String>>) -> String {
    let metrics = current_metrics
        .filter(|m| !m.is_null())
        .and_then(|m| serde_json::to_string_pretty(m).ok())
        .unwrap_or_else(|| NOT_SPECIFIED.to_owned());
    let goals = joined(goals, "General health improvement");
    format!(
        "Based on current health metrics and goals, predict health outcomes and provide recommendations:

Current Metrics:
{metrics}

Goals:
{goals}

Please provide predictions in the following JSON format:
{PREDICTIONS_LAYOUT}

Focus on realistic, achievable outcomes and natural health approaches."
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::schemas::ai::generate::CurrentStats;
    use serde_json::json;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".into(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            role: "patient".into(),
            age: Some(41),
            gender: Some("female".into()),
            height: Some(162.5),
            weight: Some(58.0),
        }
    }

    #[test]
    fn chat_prompt_appends_user_turn() {
        let prompt = chat("How do I sleep better?");
        assert!(prompt.starts_with("You are an AI assistant"));
        assert!(prompt.ends_with("\n\nUser: How do I sleep better?"));
    }

    #[test]
    fn diet_prompt_prefers_request_stats_over_profile() {
        let req = DietPlanRequest {
            goals: Some(vec!["weight loss".into(), "energy".into()]),
            current_stats: Some(CurrentStats {
                age: Some(NumOrText::Text(String::new())),
                weight: Some(NumOrText::Text("61".into())),
                health_conditions: Some(vec!["asthma".into()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let prompt = diet_plan(&req, Some(&profile()));
        assert!(prompt.contains("- Age: 41\n"));
        assert!(prompt.contains("- Gender: female\n"));
        assert!(prompt.contains("- Height: 162.5 cm\n"));
        assert!(prompt.contains("- Weight: 61 kg\n"));
        assert!(prompt.contains("- Activity Level: moderate\n"));
        assert!(prompt.contains("- Health Conditions: asthma\n"));
        assert!(prompt.contains("Goals: weight loss, energy\n"));
        assert!(prompt.contains("Dietary Preferences: None\n"));
        assert!(prompt.contains("\"weeklyRoutine\""));
    }

    #[test]
    fn diet_prompt_without_profile_says_not_specified() {
        let prompt = diet_plan(&DietPlanRequest::default(), None);
        assert!(prompt.contains("- Age: Not specified\n"));
        assert!(prompt.contains("- Height: Not specified cm\n"));
        assert!(prompt.contains("- Health Conditions: None specified\n"));
        assert!(prompt.contains("Goals: General health\n"));
    }

    #[test]
    fn insights_prompt_embeds_points_as_pretty_json() {
        let points = vec![ProgressPoint {
            date: "2025-03-01T00:00:00.000Z".into(),
            weight: Some(70.5),
            energy: Some(7),
            sleep: None,
            stress: Some(3),
            mood: Some(8),
            exercise: 2,
            symptoms: 0,
        }];
        let prompt = health_insights(&points);
        assert!(prompt.contains("\"weight\": 70.5"));
        assert!(prompt.contains("\"exercise\": 2"));
        assert!(prompt.contains("\"strengths\""));
    }

    #[test]
    fn predictions_prompt_defaults() {
        let prompt = health_predictions(None, None);
        assert!(prompt.contains("Current Metrics:\nNot specified\n"));
        assert!(prompt.contains("Goals:\nGeneral health improvement\n"));

        let metrics = json!({"weight": 72});
        let prompt = health_predictions(Some(&metrics), Some(&vec!["run 5k".into()]));
        assert!(prompt.contains("\"weight\": 72"));
        assert!(prompt.contains("Goals:\nrun 5k\n"));
    }
}
