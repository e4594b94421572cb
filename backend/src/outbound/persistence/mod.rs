//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories here only translate between Diesel rows and domain types.
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module. Connections come from a shared `bb8` pool through
//! `diesel-async`, and every database error is mapped onto the matching port
//! error.
//!
//! ```ignore
//! use inventory_backend::outbound::persistence::{DbPool, DieselProductRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/inventario")).await?;
//! let products = DieselProductRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_category_repository;
mod diesel_credential_repository;
mod diesel_demo_user_repository;
mod diesel_product_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_credential_repository::DieselCredentialRepository;
pub use diesel_demo_user_repository::DieselDemoUserRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
