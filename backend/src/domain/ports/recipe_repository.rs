//! Driven port for recipe persistence.
//!
//! Every method is one unit of work against the store: adapters must either
//! apply all of its writes or none of them.

use async_trait::async_trait;

use crate::domain::{NewRecipe, Recipe, RecipeId, RecipePreview};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// The store could not be reached or a connection could not be checked out.
        Connection { message: String } =>
            "recipe repository connection failed: {message}",
        /// A statement failed, or stored data violated a domain invariant.
        Query { message: String } =>
            "recipe repository query failed: {message}",
    }
}

/// Port for reading and writing recipes together with their ingredients.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// All recipes as previews, in ascending id order.
    async fn list_previews(&self) -> Result<Vec<RecipePreview>, RecipeRepositoryError>;

    /// Insert a recipe and its ingredients atomically; returns the stored entity.
    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, RecipeRepositoryError>;

    /// Increment the view counter and return the recipe after the increment.
    ///
    /// Returns `Ok(None)` when no recipe has this id; nothing is written then.
    async fn record_view(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Delete a recipe and all of its ingredients.
    ///
    /// Returns `Ok(false)` when no recipe has this id.
    async fn delete(&self, id: RecipeId) -> Result<bool, RecipeRepositoryError>;
}

/// Stateless fixture for tests that never reach the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeRepository;

#[async_trait]
impl RecipeRepository for FixtureRecipeRepository {
    async fn list_previews(&self) -> Result<Vec<RecipePreview>, RecipeRepositoryError> {
        Ok(Vec::new())
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, RecipeRepositoryError> {
        Ok(recipe.clone().into_recipe(RecipeId::new(1)))
    }

    async fn record_view(&self, _id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::test_support::sample_new_recipe;

    #[rstest]
    #[tokio::test]
    async fn fixture_lists_nothing() {
        let previews = FixtureRecipeRepository
            .list_previews()
            .await
            .expect("fixture list succeeds");
        assert!(previews.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_create_echoes_input_with_an_id() {
        let new_recipe = sample_new_recipe();
        let created = FixtureRecipeRepository
            .create(&new_recipe)
            .await
            .expect("fixture create succeeds");
        assert_eq!(created, new_recipe.into_recipe(RecipeId::new(1)));
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_knows_no_recipes() {
        let repo = FixtureRecipeRepository;
        assert!(repo.record_view(RecipeId::new(1)).await.expect("lookup").is_none());
        assert!(!repo.delete(RecipeId::new(1)).await.expect("delete"));
    }

    #[rstest]
    fn errors_format_their_message() {
        let err = RecipeRepositoryError::connection("pool timed out");
        assert_eq!(
            err.to_string(),
            "recipe repository connection failed: pool timed out"
        );
    }
}
