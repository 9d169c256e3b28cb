//! Language-model integration: gateway, prompt templates, output parsing,
//! topic classification and the fallback payloads used when any of those fail.

pub mod classifier;
pub mod extract;
pub mod fallback;
pub mod gateway;
pub mod prompts;

pub use gateway::{Gateway, GatewayError, LanguageModel};

use chrono::{SecondsFormat, Utc};

/// `generatedAt` value stamped on every generated payload.
pub fn generated_at() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
