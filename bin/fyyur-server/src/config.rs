//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for fyyur-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// SQLite (or other) database URL (default: `"sqlite://fyyur.db"`).
    /// Supports any sqlx-compatible connection string.
    pub database_url: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,sqlx=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// When set, also append log records to this file.
    pub log_file: Option<String>,

    /// Comma-separated list of allowed CORS origins; unset means wildcard.
    pub cors_allowed_origins: Option<String>,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("FYYUR_BIND", "0.0.0.0:3000"),
            database_url: env_or("FYYUR_DATABASE_URL", "sqlite://fyyur.db"),
            log_level: env_or("FYYUR_LOG", "info"),
            log_json: std::env::var("FYYUR_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            log_file: std::env::var("FYYUR_LOG_FILE").ok(),
            cors_allowed_origins: std::env::var("FYYUR_CORS_ORIGINS").ok(),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}
