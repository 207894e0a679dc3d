//! Driving port for the recipe catalogue use-cases.
//!
//! Inbound adapters depend on this trait only; they never see the repository.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeDraft, RecipeId, RecipePreview, RECIPE_NOT_FOUND};

/// The four catalogue operations.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() {
/// use cookbook::domain::ports::{FixtureRecipeCatalog, RecipeCatalog};
/// use cookbook::domain::RecipeId;
///
/// let catalog = FixtureRecipeCatalog;
/// assert!(catalog.get_recipe(RecipeId::new(1)).await.is_err());
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// Every recipe as a preview, in store order.
    async fn list_recipes(&self) -> Result<Vec<RecipePreview>, Error>;

    /// Persist a recipe with its ingredients and return it with its new id.
    async fn create_recipe(&self, draft: RecipeDraft) -> Result<Recipe, Error>;

    /// Fetch one recipe, counting the fetch as a view.
    ///
    /// The returned entity carries the incremented `views_amount`.
    async fn get_recipe(&self, id: RecipeId) -> Result<Recipe, Error>;

    /// Remove a recipe and its ingredients.
    async fn delete_recipe(&self, id: RecipeId) -> Result<(), Error>;
}

/// Empty catalogue for tests that do not exercise recipe storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeCatalog;

#[async_trait]
impl RecipeCatalog for FixtureRecipeCatalog {
    async fn list_recipes(&self) -> Result<Vec<RecipePreview>, Error> {
        Ok(Vec::new())
    }

    async fn create_recipe(&self, draft: RecipeDraft) -> Result<Recipe, Error> {
        Ok(draft
            .resolve(chrono::NaiveDateTime::default())
            .into_recipe(RecipeId::new(1)))
    }

    async fn get_recipe(&self, _id: RecipeId) -> Result<Recipe, Error> {
        Err(Error::not_found(RECIPE_NOT_FOUND))
    }

    async fn delete_recipe(&self, _id: RecipeId) -> Result<(), Error> {
        Err(Error::not_found(RECIPE_NOT_FOUND))
    }
}
