//! Application settings and the server configuration object.
//!
//! Settings load through OrthoConfig (environment, CLI, and file layering);
//! the richer [`ServerConfig`] is assembled in `main` once the process-wide
//! handles (database pool, provider client settings) exist.

use std::net::SocketAddr;

use backend::outbound::assist::GeminiSettings;
use backend::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
/// Bearer tokens stay valid for a week unless configured otherwise.
const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// Configuration values read at startup (`EDITOR_*` environment variables).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EDITOR")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; absent means in-memory stores.
    pub database_url: Option<String>,
    /// HMAC secret for bearer tokens.
    pub token_secret: Option<String>,
    /// Token lifetime override in days.
    pub token_ttl_days: Option<i64>,
    /// Gemini API key; absent disables the AI endpoints.
    pub gemini_api_key: Option<String>,
    /// Gemini model override.
    pub gemini_model: Option<String>,
    /// Gemini endpoint override.
    pub gemini_endpoint: Option<String>,
}

impl AppSettings {
    /// The configured bind address, falling back to the default.
    #[must_use]
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// The configured token lifetime, falling back to seven days.
    #[must_use]
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.token_ttl_days.unwrap_or(DEFAULT_TOKEN_TTL_DAYS))
    }

    /// Provider settings when an API key is configured.
    #[must_use]
    pub fn gemini(&self) -> Option<GeminiSettings> {
        self.gemini_api_key.as_ref().map(|key| GeminiSettings {
            api_key: key.clone(),
            model: self
                .gemini_model
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_owned()),
            endpoint: self
                .gemini_endpoint
                .clone()
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_owned()),
        })
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: Vec<u8>,
    pub(crate) token_ttl: chrono::Duration,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) gemini: Option<GeminiSettings>,
}

impl ServerConfig {
    /// Construct a server configuration from the mandatory pieces.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        token_secret: Vec<u8>,
        token_ttl: chrono::Duration,
    ) -> Self {
        Self {
            bind_addr,
            token_secret,
            token_ttl,
            db_pool: None,
            gemini: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses database-backed repositories; without
    /// it, in-memory stores keep the process usable for local development.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach provider settings for the AI endpoints.
    #[must_use]
    pub fn with_gemini(mut self, settings: Option<GeminiSettings>) -> Self {
        self.gemini = settings;
        self
    }
}
