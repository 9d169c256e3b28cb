use chrono::{DateTime, Utc};

/// A row in the `health_progress` table.
#[derive(Debug, Clone)]
pub struct HealthProgressRecord {
    pub id: String,
    pub user_id: String,
    pub recorded_at: DateTime<Utc>,
    pub weight: Option<f64>,
    /// Self-reported scores on a 1-10 scale.
    pub energy: Option<i64>,
    pub sleep_quality: Option<i64>,
    pub stress: Option<i64>,
    pub mood: Option<i64>,
    pub exercise_count: i64,
    pub symptom_count: i64,
}
