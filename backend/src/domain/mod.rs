//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the recipe catalogue in strongly typed terms, independent
//! of HTTP and SQL. Adapters live under `inbound` and `outbound` and talk to
//! the domain only through [`ports`].
//!
//! Public surface:
//! - `Recipe`, `RecipeDraft`, `NewRecipe`, `RecipePreview`, `Ingredient`:
//!   the aggregate and its create and list projections.
//! - `Cuisine`: the closed set of cuisines.
//! - `RecipeCatalogService`: the catalogue use-cases.
//! - `Error`, `ErrorCode`: transport-agnostic failures.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod ports;
pub mod recipe;
mod recipe_catalog_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::recipe::{
    CookingTime, Cuisine, Ingredient, IngredientName, IngredientQuantity, NewRecipe, RangeError,
    Recipe, RecipeDescription, RecipeDraft, RecipeId, RecipeName, RecipePreview, TextLengthError,
    UnknownCuisine, ViewCount,
};
pub use self::recipe_catalog_service::RecipeCatalogService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Message returned whenever an operation names a recipe id that does not exist.
pub const RECIPE_NOT_FOUND: &str = "Recipe not found";
