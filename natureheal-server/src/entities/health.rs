use crate::entities::{
    SqliteStore,
    dao::{HealthProgressRecord, parse_timestamp, timestamp},
};
use chrono::{DateTime, Utc};
use std::future::Future;

type ProgressRow = (
    String,
    String,
    String,
    Option<f64>,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    i64,
    i64,
);

pub trait HealthProgressStore: Send + Sync + 'static {
    /// Records for `user_id` with `recorded_at >= since`, oldest first.
    fn list_progress_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<HealthProgressRecord>, sqlx::Error>> + Send;
}

impl HealthProgressStore for SqliteStore {
    async fn list_progress_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<HealthProgressRecord>, sqlx::Error> {
        let rows: Vec<ProgressRow> = sqlx::query_as(
            "SELECT id, user_id, recorded_at, weight, energy, sleep_quality, stress, mood, \
                    exercise_count, symptom_count \
             FROM health_progress WHERE user_id = ?1 AND recorded_at >= ?2 \
             ORDER BY recorded_at ASC",
        )
        .bind(user_id)
        .bind(timestamp(&since))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(
                |(
                    id,
                    user_id,
                    recorded_at,
                    weight,
                    energy,
                    sleep_quality,
                    stress,
                    mood,
                    exercise_count,
                    symptom_count,
                )| HealthProgressRecord {
                    id,
                    user_id,
                    recorded_at: parse_timestamp(&recorded_at, "health_progress.recorded_at"),
                    weight,
                    energy,
                    sleep_quality,
                    stress,
                    mood,
                    exercise_count,
                    symptom_count,
                },
            )
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;

    fn record(id: &str, user: &str, days_ago: i64) -> HealthProgressRecord {
        HealthProgressRecord {
            id: id.to_owned(),
            user_id: user.to_owned(),
            recorded_at: Utc::now() - Duration::days(days_ago),
            weight: Some(70.0),
            energy: Some(6),
            sleep_quality: Some(7),
            stress: Some(4),
            mood: Some(8),
            exercise_count: 1,
            symptom_count: 0,
        }
    }

    #[tokio::test]
    async fn only_records_inside_the_window_are_returned() {
        let store = SqliteStore::memory().await;
        store.seed_progress(&record("old", "u1", 40)).await;
        store.seed_progress(&record("mid", "u1", 10)).await;
        store.seed_progress(&record("new", "u1", 1)).await;
        store.seed_progress(&record("other", "u2", 1)).await;

        let since = Utc::now() - Duration::days(30);
        let got = store.list_progress_since("u1", since).await.unwrap();
        let ids: Vec<_> = got.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["mid", "new"]);
    }
}
