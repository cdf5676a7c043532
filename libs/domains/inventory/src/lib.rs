//! Inventory Domain
//!
//! Products, their stock levels and the reports derived from them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, PDF attachments
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, existence checks, report rendering
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │    Query    │  ← Parameterized SQL assembly
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_inventory::{
//!     handlers,
//!     repository::InMemoryProductRepository,
//!     service::ProductService,
//! };
//!
//! let service = ProductService::new(InMemoryProductRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod query;
pub mod reports;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use models::{
    CategoryList, CategoryStats, CreateProduct, DashboardStats, DeleteResponse, Pagination,
    Product, ProductFilter, ProductListQuery, UpdateProduct,
};
pub use postgres::PgProductRepository;
pub use query::ProductOrder;
pub use reports::Document;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
