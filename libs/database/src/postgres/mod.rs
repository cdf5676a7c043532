//! PostgreSQL connection management, health probing and statement execution

mod config;
mod connector;
mod health;
pub mod schema;
pub mod sql;

pub use config::{DEFAULT_MAX_CONNECTIONS, PostgresConfig};
pub use connector::{connect_from_config, connect_from_config_with_retry, connect_with_options};
pub use health::check_health;

// Re-export SeaORM types for convenience
pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
