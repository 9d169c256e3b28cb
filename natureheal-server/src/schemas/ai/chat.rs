use crate::entities::{Category, ChatExchange, Feedback};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request body for `POST /api/ai/chat`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's question.
    #[serde(default)]
    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub message: Option<String>,
    /// Conversation thread id; generated when absent.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Explicit topic; skips keyword classification.
    #[serde(default)]
    pub category: Option<Category>,
}

/// Response body for `POST /api/ai/chat`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub category: Category,
    pub session_id: String,
}

/// Query string for `GET /api/ai/history`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// 1-based page; anything unparseable or below 1 reads as page 1.
    pub page_number: Option<String>,
    /// Only return exchanges in this category.
    pub category: Option<Category>,
}

impl HistoryQuery {
    pub fn page(&self) -> i64 {
        self.page_number
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub query: String,
    pub response: String,
    pub category: Category,
    pub created_at: String,
}

/// Response body for `GET /api/ai/history`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub queries: Vec<HistoryEntry>,
    pub page: i64,
    pub pages: i64,
    pub total: i64,
}

/// Request body for `PUT /api/ai/feedback/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedbackRequest {
    pub feedback: Feedback,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl ChatExchange {
    pub fn to_history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            id: self.id.clone(),
            query: self.query.clone(),
            response: self.response.clone(),
            category: self.category,
            created_at: self
                .created_at
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        }
    }
}
