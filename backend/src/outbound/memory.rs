//! Process-local recipe store.
//!
//! Used when the server runs without a database URL and by tests that need a
//! stateful store without PostgreSQL. Each port call takes the lock once, so
//! every operation is atomic with respect to the others; nothing survives a
//! restart.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{NewRecipe, Recipe, RecipeId, RecipePreview};

#[derive(Debug, Default)]
struct Store {
    last_id: i32,
    recipes: BTreeMap<RecipeId, Recipe>,
}

/// In-memory implementation of [`RecipeRepository`].
///
/// Ids start at 1 and are never reused, mirroring a `SERIAL` column.
#[derive(Debug, Default)]
pub struct InMemoryRecipeRepository {
    store: Mutex<Store>,
}

impl InMemoryRecipeRepository {
    /// Empty store whose first id is 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, RecipeRepositoryError> {
        self.store
            .lock()
            .map_err(|_| RecipeRepositoryError::query("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn list_previews(&self) -> Result<Vec<RecipePreview>, RecipeRepositoryError> {
        let store = self.lock()?;
        Ok(store.recipes.values().map(Recipe::preview).collect())
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, RecipeRepositoryError> {
        let mut store = self.lock()?;
        let next = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| RecipeRepositoryError::query("recipe id sequence exhausted"))?;
        store.last_id = next;
        let stored = recipe.clone().into_recipe(RecipeId::new(next));
        store.recipes.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn record_view(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut store = self.lock()?;
        Ok(store.recipes.get_mut(&id).map(|recipe| {
            recipe.views_amount = recipe.views_amount.incremented();
            recipe.clone()
        }))
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut store = self.lock()?;
        Ok(store.recipes.remove(&id).is_some())
    }
}
