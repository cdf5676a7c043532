//! Database library: PostgreSQL connection management and a thin SQL execution layer.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//! - `all` - everything above
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, sql};
//! use sea_orm::{DatabaseBackend, Statement};
//!
//! let db = postgres::connect_from_config(config).await?;
//! let stmt = Statement::from_string(DatabaseBackend::Postgres, "DELETE FROM products");
//! let removed = sql::execute(&db, stmt).await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
