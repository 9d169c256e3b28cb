use crate::entities::ExchangeStats;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Response body for `GET /api/ai/stats`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_queries: i64,
    pub unique_users: i64,
    pub category_stats: Vec<CategoryCount>,
    /// Mean response time in milliseconds; 0 when nothing is logged.
    pub avg_response_time: f64,
}

impl From<ExchangeStats> for StatsResponse {
    fn from(stats: ExchangeStats) -> Self {
        Self {
            total_queries: stats.total,
            unique_users: stats.unique_users,
            category_stats: stats
                .by_category
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
            avg_response_time: stats.avg_response_time_ms,
        }
    }
}
