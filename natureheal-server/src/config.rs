//! Server configuration, loaded from environment variables at startup.

use std::time::Duration;

/// Runtime configuration for natureheal-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set. Missing credentials are an
/// expected state: without `GOOGLE_AI_API_KEY` the AI endpoints serve their
/// fallback payloads, without `JWT_SECRET` authenticated routes answer 401.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:5000"`).
    pub bind_address: String,

    /// SQLite database URL (default: `"sqlite://natureheal.db"`).
    pub database_url: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Optional directory for daily-rotated log files.
    pub log_dir: Option<String>,

    /// Comma-separated list of allowed CORS origins; `None` allows any.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI at `/swagger-ui`.
    pub enable_swagger: bool,

    /// Generative-language settings.
    pub ai: AiConfig,

    /// HS256 secret used to verify bearer tokens.
    pub jwt_secret: Option<String>,
}

/// Settings for the language-model gateway.
#[derive(Clone)]
pub struct AiConfig {
    /// API credential. `None` means the gateway is not configured.
    pub api_key: Option<String>,
    /// Model identifier, e.g. `"gemini-2.0-flash-exp"`.
    pub model: String,
    /// API base URL without a trailing slash.
    pub endpoint: String,
    /// Outbound request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("NATUREHEAL_BIND", "0.0.0.0:5000"),
            database_url: env_or("NATUREHEAL_DATABASE_URL", "sqlite://natureheal.db"),
            log_level: env_or("NATUREHEAL_LOG", "info"),
            log_json: parse_flag("NATUREHEAL_LOG_JSON", false),
            log_dir: env_opt("NATUREHEAL_LOG_DIR"),
            cors_allowed_origins: env_opt("NATUREHEAL_CORS_ORIGINS"),
            enable_swagger: parse_flag("NATUREHEAL_ENABLE_SWAGGER", true),
            ai: AiConfig {
                api_key: env_opt("GOOGLE_AI_API_KEY"),
                model: env_or("NATUREHEAL_AI_MODEL", "gemini-2.0-flash-exp"),
                endpoint: env_or(
                    "NATUREHEAL_AI_ENDPOINT",
                    "https://generativelanguage.googleapis.com",
                )
                .trim_end_matches('/')
                .to_owned(),
                timeout: Duration::from_secs(parse_env("NATUREHEAL_AI_TIMEOUT_SECS", 60)),
            },
            jwt_secret: env_opt("JWT_SECRET"),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Returns `None` for unset or blank variables.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
