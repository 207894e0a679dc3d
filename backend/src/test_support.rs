//! Test utilities shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for tests and behind the `test-support` feature.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::RecipeCatalog;
use crate::domain::{
    CookingTime, Cuisine, Ingredient, IngredientName, IngredientQuantity, NewRecipe,
    RecipeCatalogService, RecipeDescription, RecipeDraft, RecipeName, ViewCount,
};
use crate::outbound::memory::InMemoryRecipeRepository;

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The instant [`fixed_clock`] reports: 2024-10-25 13:08:06.730568 UTC.
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 10, 25)
        .and_then(|date| date.and_hms_micro_opt(13, 8, 6, 730_568))
        .unwrap_or_default()
}

/// Clock frozen at [`fixed_now`].
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(Utc.from_utc_datetime(&fixed_now())))
}

/// Build a valid ingredient line, panicking on out-of-range text.
pub fn ingredient(name: &str, quantity: &str) -> Ingredient {
    match (IngredientName::new(name), IngredientQuantity::new(quantity)) {
        (Ok(name), Ok(quantity)) => Ingredient { name, quantity },
        _ => panic!("sample ingredient must be valid: {name} / {quantity}"),
    }
}

/// A valid create draft with two ingredients and no timestamp.
pub fn sample_draft() -> RecipeDraft {
    named_draft("Новый рецепт")
}

/// Same as [`sample_draft`] with a different name.
pub fn named_draft(name: &str) -> RecipeDraft {
    let (Ok(name), Ok(description), Ok(cooking_time)) = (
        RecipeName::new(name),
        RecipeDescription::new("Готовить так-то"),
        CookingTime::new(10),
    ) else {
        panic!("sample draft fields must be valid");
    };
    RecipeDraft {
        name,
        cuisine: Some(Cuisine::Russian),
        description,
        cooking_time,
        created_at: None,
        views_amount: ViewCount::default(),
        ingredients: vec![
            ingredient("ингредиент 1", "1 шт"),
            ingredient("ингредиент 2", "100 г"),
        ],
    }
}

/// [`sample_draft`] resolved at [`fixed_now`].
pub fn sample_new_recipe() -> NewRecipe {
    sample_draft().resolve(fixed_now())
}

/// Catalogue service over a fresh in-memory store and [`fixed_clock`].
pub fn in_memory_catalog() -> Arc<dyn RecipeCatalog> {
    Arc::new(RecipeCatalogService::new(
        Arc::new(InMemoryRecipeRepository::new()),
        fixed_clock(),
    ))
}
