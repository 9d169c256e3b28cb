pub mod chat_exchange;
pub mod health;
pub mod user;

pub use chat_exchange::{Category, ChatExchange, ExchangeStats, Feedback};
pub use health::HealthProgressRecord;
pub use user::UserProfile;

use chrono::{DateTime, SecondsFormat, Utc};

/// Column encoding for timestamps. Fixed width so TEXT ordering matches time ordering.
pub(crate) fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str, column: &'static str) -> DateTime<Utc> {
    raw.parse().unwrap_or_else(|e: chrono::ParseError| {
        tracing::warn!(raw = %raw, column, error = %e, "failed to parse stored timestamp; using now");
        Utc::now()
    })
}
