use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use super::PostgresConfig;
use crate::common::{RetryConfig, retry_with_backoff};

/// Open a pool described by `config`.
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

/// Open a pool with caller-built options.
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let max = options.get_max_connections();
    let db = Database::connect(options).await?;
    info!(max_connections = ?max, "Connected to PostgreSQL");
    Ok(db)
}

/// Open a pool, retrying with exponential backoff while the server is unreachable.
///
/// Only meant for startup; request paths never retry.
///
/// ```ignore
/// let config = PostgresConfig::from_env()?;
/// let retry = RetryConfig::new().with_max_retries(10);
/// let db = connect_from_config_with_retry(config, Some(retry)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();
    retry_with_backoff(
        || connect_with_options(options.clone()),
        retry_config.unwrap_or_default(),
    )
    .await
}
