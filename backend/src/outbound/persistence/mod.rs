//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Implements the recipe repository port on PostgreSQL through `diesel-async`
//! with `bb8` pooling. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module; only validated domain types
//! cross the port.
//!
//! ```ignore
//! use cookbook::outbound::persistence::{DbPool, DieselRecipeRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/cookbook")).await?;
//! let repo = DieselRecipeRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_recipe_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_recipe_repository::DieselRecipeRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
