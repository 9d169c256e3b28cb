use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

/// Maximum stored length of a user query, in characters.
pub const MAX_QUERY_CHARS: usize = 1000;

/// Maximum stored length of a model reply, in characters.
pub const MAX_RESPONSE_CHARS: usize = 2000;

/// Topic label attached to every chat exchange.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    #[default]
    General,
    Symptoms,
    Remedies,
    Yoga,
    Meditation,
    Nutrition,
    Lifestyle,
}

/// User rating of a single reply.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ToSchema,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Feedback {
    Helpful,
    NotHelpful,
    Neutral,
}

/// A row in the `chat_exchanges` table.
///
/// Written once per successful gateway call; only `feedback` changes later.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub id: String,
    /// `None` for anonymous callers.
    pub user_id: Option<String>,
    pub session_id: String,
    pub query: String,
    pub response: String,
    pub category: Category,
    /// Fixed-scale confidence in `0.0..=1.0`.
    pub confidence: f64,
    pub feedback: Option<Feedback>,
    pub response_time_ms: i64,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}

/// Aggregates across every stored exchange.
#[derive(Debug, Clone, Default)]
pub struct ExchangeStats {
    pub total: i64,
    /// Distinct authenticated users; anonymous rows are not counted.
    pub unique_users: i64,
    /// `(category, count)` pairs, most frequent first.
    pub by_category: Vec<(String, i64)>,
    pub avg_response_time_ms: f64,
}

/// Truncate `text` to at most `max` characters on a char boundary.
pub fn clip_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_owned(),
        None => text.to_owned(),
    }
}
