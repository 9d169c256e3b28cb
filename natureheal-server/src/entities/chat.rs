use crate::entities::{
    SqliteStore,
    dao::{Category, ChatExchange, ExchangeStats, Feedback, parse_timestamp, timestamp},
};
use std::future::Future;
use std::str::FromStr;

type ExchangeRow = (
    String,
    Option<String>,
    String,
    String,
    String,
    String,
    f64,
    Option<String>,
    i64,
    bool,
    String,
);

const EXCHANGE_COLUMNS: &str = "id, user_id, session_id, query, response, category, confidence, \
     feedback, response_time_ms, is_anonymous, created_at";

pub trait ChatExchangeStore: Send + Sync + 'static {
    fn insert_exchange(
        &self,
        exchange: ChatExchange,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
    fn get_exchange(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<ChatExchange>, sqlx::Error>> + Send;
    /// Newest first. Returns the requested page plus the total matching row count.
    fn list_exchanges_for_user(
        &self,
        user_id: &str,
        category: Option<Category>,
        limit: i64,
        offset: i64,
    ) -> impl Future<Output = Result<(Vec<ChatExchange>, i64), sqlx::Error>> + Send;
    fn set_feedback(
        &self,
        id: &str,
        feedback: Feedback,
    ) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
    fn exchange_stats(&self) -> impl Future<Output = Result<ExchangeStats, sqlx::Error>> + Send;
}

fn exchange_from_row(row: ExchangeRow) -> ChatExchange {
    let (
        id,
        user_id,
        session_id,
        query,
        response,
        category,
        confidence,
        feedback,
        response_time_ms,
        is_anonymous,
        created_at,
    ) = row;
    ChatExchange {
        category: Category::from_str(&category).unwrap_or_else(|_| {
            tracing::warn!(id = %id, raw = %category, "unknown stored category; using general");
            Category::General
        }),
        feedback: feedback.and_then(|raw| Feedback::from_str(&raw).ok()),
        created_at: parse_timestamp(&created_at, "chat_exchanges.created_at"),
        id,
        user_id,
        session_id,
        query,
        response,
        confidence,
        response_time_ms,
        is_anonymous,
    }
}

impl ChatExchangeStore for SqliteStore {
    async fn insert_exchange(&self, exchange: ChatExchange) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO chat_exchanges \
             (id, user_id, session_id, query, response, category, confidence, feedback, \
              response_time_ms, is_anonymous, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .bind(&exchange.id)
        .bind(&exchange.user_id)
        .bind(&exchange.session_id)
        .bind(&exchange.query)
        .bind(&exchange.response)
        .bind(exchange.category.as_ref())
        .bind(exchange.confidence)
        .bind(exchange.feedback.as_ref().map(AsRef::<str>::as_ref))
        .bind(exchange.response_time_ms)
        .bind(exchange.is_anonymous)
        .bind(timestamp(&exchange.created_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_exchange(&self, id: &str) -> Result<Option<ChatExchange>, sqlx::Error> {
        let row: Option<ExchangeRow> = sqlx::query_as(&format!(
            "SELECT {EXCHANGE_COLUMNS} FROM chat_exchanges WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(exchange_from_row))
    }

    async fn list_exchanges_for_user(
        &self,
        user_id: &str,
        category: Option<Category>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ChatExchange>, i64), sqlx::Error> {
        // NULL ?2 disables the category filter.
        let category = category.map(|c| c.as_ref().to_owned());
        let rows: Vec<ExchangeRow> = sqlx::query_as(&format!(
            "SELECT {EXCHANGE_COLUMNS} FROM chat_exchanges \
             WHERE user_id = ?1 AND (?2 IS NULL OR category = ?2) \
             ORDER BY created_at DESC, rowid DESC LIMIT ?3 OFFSET ?4"
        ))
        .bind(user_id)
        .bind(&category)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM chat_exchanges \
             WHERE user_id = ?1 AND (?2 IS NULL OR category = ?2)",
        )
        .bind(user_id)
        .bind(&category)
        .fetch_one(&self.pool)
        .await?;
        Ok((rows.into_iter().map(exchange_from_row).collect(), total))
    }

    async fn set_feedback(&self, id: &str, feedback: Feedback) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE chat_exchanges SET feedback = ?1 WHERE id = ?2")
            .bind(feedback.as_ref())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn exchange_stats(&self) -> Result<ExchangeStats, sqlx::Error> {
        let (total, unique_users, avg): (i64, i64, Option<f64>) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(DISTINCT user_id), AVG(response_time_ms) FROM chat_exchanges",
        )
        .fetch_one(&self.pool)
        .await?;
        let by_category: Vec<(String, i64)> = sqlx::query_as(
            "SELECT category, COUNT(*) AS n FROM chat_exchanges \
             GROUP BY category ORDER BY n DESC, category ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(ExchangeStats {
            total,
            unique_users,
            by_category,
            avg_response_time_ms: avg.unwrap_or(0.0),
        })
    }
}
