//! Domain ports for the hexagonal boundary.
//!
//! `RecipeCatalog` is the driving port used by inbound adapters;
//! `RecipeRepository` is the driven port implemented by storage adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod recipe_catalog;
mod recipe_repository;

#[cfg(test)]
pub use recipe_catalog::MockRecipeCatalog;
pub use recipe_catalog::{FixtureRecipeCatalog, RecipeCatalog};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{FixtureRecipeRepository, RecipeRepository, RecipeRepositoryError};
