//! Outbound adapters implementing the recipe repository port.
//!
//! - **persistence**: PostgreSQL via Diesel, used when a database URL is set.
//! - **memory**: process-local store for database-less runs and tests.
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules.

pub mod memory;
pub mod persistence;
