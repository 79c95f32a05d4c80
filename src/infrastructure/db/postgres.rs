use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};
use std::time::Duration;

use crate::settings::AppConfig;

/// Connects to the project store, retrying with exponential backoff so a
/// database that comes up alongside the API does not kill the process.
/// Pool size and retry behavior come from `AppConfig`.
pub async fn create_pool(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 0;
    let mut backoff = Duration::from_secs(config.db_retry_backoff_seconds);

    loop {
        match PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => {
                info!(
                    max_connections = config.db_max_connections,
                    "Project store connected"
                );
                return Ok(pool);
            }
            Err(e) if attempt < config.db_connect_retries => {
                attempt += 1;
                warn!(
                    "Project store connection attempt {}/{} failed: {}. Retrying in {:?}",
                    attempt, config.db_connect_retries, e, backoff
                );

                tokio::time::sleep(backoff).await;

                backoff *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}
