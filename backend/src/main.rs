//! Backend entry-point: configuration, process-wide handles, HTTP server.

mod server;

use std::env;

use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::persistence::{DbPool, PoolConfig};
use server::{AppSettings, ServerConfig};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(env::args_os())
        .map_err(|err| std::io::Error::other(format!("configuration error: {err}")))?;

    let bind_addr = settings
        .bind_addr()
        .parse()
        .map_err(|err| std::io::Error::other(format!("invalid bind address: {err}")))?;

    let token_secret = match settings.token_secret.as_deref() {
        Some(secret) if !secret.is_empty() => secret.as_bytes().to_vec(),
        _ => {
            if cfg!(debug_assertions) {
                // Tokens stop verifying across restarts with a random secret.
                warn!("no token secret configured; using an ephemeral one (dev only)");
                uuid::Uuid::new_v4().into_bytes().to_vec()
            } else {
                return Err(std::io::Error::other("EDITOR_TOKEN_SECRET must be set"));
            }
        }
    };

    let db_pool = match settings.database_url.as_deref() {
        Some(url) => Some(
            DbPool::new(PoolConfig::new(url))
                .await
                .map_err(std::io::Error::other)?,
        ),
        None => None,
    };

    let mut config = ServerConfig::new(bind_addr, token_secret, settings.token_ttl())
        .with_gemini(settings.gemini());
    if let Some(pool) = db_pool {
        config = config.with_db_pool(pool);
    }

    info!(addr = %bind_addr, "starting server");
    server::create_server(config)?.await
}
