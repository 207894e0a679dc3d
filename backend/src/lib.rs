//! Cookbook library: recipe catalogue domain, HTTP adapter and stores.
//!
//! The binary in `main.rs` wires these modules into an Actix server; the
//! library is kept separate so integration tests and the `openapi-dump`
//! tool can reach the same types.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
