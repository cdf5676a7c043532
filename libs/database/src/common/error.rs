/// Error type for every database operation in this crate
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver or query failure reported by SeaORM/sqlx
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Schema bootstrap or validation problem
    #[error("Schema error: {0}")]
    SchemaError(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
