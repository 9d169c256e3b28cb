//! Database abstraction layer.
//!
//! Each table gets a store trait ([`ChatExchangeStore`], [`UserStore`],
//! [`HealthProgressStore`]) implemented on the single concrete
//! [`SqliteStore`]. Handlers are generic over the traits so tests can run
//! against an in-memory database.
//!
//! Trait methods use `impl Future` in their signatures; no `async-trait`
//! needed on this side.

pub mod chat;
pub mod dao;
pub mod health;
pub mod user;

pub use dao::{Category, ChatExchange, ExchangeStats, Feedback, HealthProgressRecord, UserProfile};

pub use chat::ChatExchangeStore;
pub use health::HealthProgressStore;
pub use user::UserStore;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the SQLite database at `url` and run pending migrations.
    ///
    /// `url` is a sqlx SQLite URL such as `"sqlite://natureheal.db"` or
    /// `"sqlite::memory:"`.
    pub async fn connect(url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let mut pool_options = SqlitePoolOptions::new();
        if url.contains(":memory:") {
            // Every connection to :memory: is a fresh database; pin one.
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_options.connect_with(options).await?;
        // Path is resolved relative to CARGO_MANIFEST_DIR at compile time.
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

#[cfg(test)]
impl SqliteStore {
    pub async fn memory() -> Self {
        Self::connect("sqlite::memory:").await.expect("open in-memory store")
    }

    pub async fn seed_user(&self, id: &str, role: &str) -> UserProfile {
        let profile = UserProfile {
            id: id.to_owned(),
            name: format!("User {id}"),
            email: format!("{id}@example.com"),
            role: role.to_owned(),
            age: Some(34),
            gender: Some("female".into()),
            height: Some(168.0),
            weight: Some(64.5),
        };
        sqlx::query(
            "INSERT INTO users (id, name, email, role, age, gender, height, weight) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&profile.id)
        .bind(&profile.name)
        .bind(&profile.email)
        .bind(&profile.role)
        .bind(profile.age)
        .bind(&profile.gender)
        .bind(profile.height)
        .bind(profile.weight)
        .execute(&self.pool)
        .await
        .expect("seed user");
        profile
    }

    pub async fn seed_progress(&self, record: &HealthProgressRecord) {
        sqlx::query(
            "INSERT INTO health_progress \
             (id, user_id, recorded_at, weight, energy, sleep_quality, stress, mood, exercise_count, symptom_count) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&record.id)
        .bind(&record.user_id)
        .bind(dao::timestamp(&record.recorded_at))
        .bind(record.weight)
        .bind(record.energy)
        .bind(record.sleep_quality)
        .bind(record.stress)
        .bind(record.mood)
        .bind(record.exercise_count)
        .bind(record.symptom_count)
        .execute(&self.pool)
        .await
        .expect("seed progress");
    }
}
