//! Recipe catalogue service.
//!
//! Implements the [`RecipeCatalog`] driving port on top of a
//! [`RecipeRepository`]. The service owns the defaults applied at creation
//! time and the translation of store failures into domain errors; each
//! operation is a single repository call, hence a single transaction.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{RecipeCatalog, RecipeRepository, RecipeRepositoryError};
use crate::domain::{Error, Recipe, RecipeDraft, RecipeId, RecipePreview, RECIPE_NOT_FOUND};

fn map_repository_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recipe store unavailable: {message}"))
        }
        RecipeRepositoryError::Query { message } => {
            Error::internal(format!("recipe store error: {message}"))
        }
    }
}

/// Catalogue service backed by a recipe repository.
#[derive(Clone)]
pub struct RecipeCatalogService<R> {
    recipes: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> RecipeCatalogService<R> {
    /// Create a service; `clock` supplies the default `created_at`.
    pub fn new(recipes: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { recipes, clock }
    }
}

#[async_trait]
impl<R> RecipeCatalog for RecipeCatalogService<R>
where
    R: RecipeRepository,
{
    async fn list_recipes(&self) -> Result<Vec<RecipePreview>, Error> {
        let previews = self
            .recipes
            .list_previews()
            .await
            .map_err(map_repository_error)?;
        debug!(count = previews.len(), "listed recipes");
        Ok(previews)
    }

    async fn create_recipe(&self, draft: RecipeDraft) -> Result<Recipe, Error> {
        let new_recipe = draft.resolve(self.clock.utc().naive_utc());
        let recipe = self
            .recipes
            .create(&new_recipe)
            .await
            .map_err(map_repository_error)?;
        info!(
            recipe_id = %recipe.id,
            ingredient_count = recipe.ingredients.len(),
            "recipe created"
        );
        Ok(recipe)
    }

    async fn get_recipe(&self, id: RecipeId) -> Result<Recipe, Error> {
        let recipe = self
            .recipes
            .record_view(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                debug!(recipe_id = %id, "recipe lookup missed");
                Error::not_found(RECIPE_NOT_FOUND)
            })?;
        debug!(
            recipe_id = %id,
            views_amount = recipe.views_amount.get(),
            "recipe viewed"
        );
        Ok(recipe)
    }

    async fn delete_recipe(&self, id: RecipeId) -> Result<(), Error> {
        let deleted = self
            .recipes
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            debug!(recipe_id = %id, "delete targeted a missing recipe");
            return Err(Error::not_found(RECIPE_NOT_FOUND));
        }
        info!(recipe_id = %id, "recipe deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "recipe_catalog_service_tests.rs"]
mod tests;
