use crate::entities::{SqliteStore, dao::UserProfile};
use std::future::Future;

pub trait UserStore: Send + Sync + 'static {
    fn get_user(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<UserProfile>, sqlx::Error>> + Send;
}

impl UserStore for SqliteStore {
    async fn get_user(&self, id: &str) -> Result<Option<UserProfile>, sqlx::Error> {
        #[allow(clippy::type_complexity)]
        let row: Option<(
            String,
            String,
            String,
            String,
            Option<i64>,
            Option<String>,
            Option<f64>,
            Option<f64>,
        )> = sqlx::query_as(
            "SELECT id, name, email, role, age, gender, height, weight FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(
            |(id, name, email, role, age, gender, height, weight)| UserProfile {
                id,
                name,
                email,
                role,
                age,
                gender,
                height,
                weight,
            },
        ))
    }
}
