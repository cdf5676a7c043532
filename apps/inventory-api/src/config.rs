//! Configuration for Inventory API

use core_config::{AppInfo, FromEnv, app_info, env_flag, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Apply the embedded schema before serving (`DB_BOOTSTRAP_SCHEMA`)
    pub bootstrap_schema: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            bootstrap_schema: env_flag("DB_BOOTSTRAP_SCHEMA", false),
        })
    }
}
