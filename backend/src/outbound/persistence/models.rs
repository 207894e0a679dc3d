//! Internal Diesel row structs.
//!
//! These never leave the persistence module; repositories convert them into
//! validated domain types.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{ingredients, recipes};

/// Full row of the `recipes` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: i32,
    pub name: String,
    pub cuisine: Option<String>,
    pub description: String,
    pub cooking_time: i16,
    pub created_at: NaiveDateTime,
    pub views_amount: i32,
}

/// Listing projection of the `recipes` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipePreviewRow {
    pub name: String,
    pub cooking_time: i16,
    pub views_amount: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub name: &'a str,
    pub cuisine: Option<&'a str>,
    pub description: &'a str,
    pub cooking_time: i16,
    pub created_at: NaiveDateTime,
    pub views_amount: i32,
}

/// Row of the `ingredients` table, minus the owning recipe id.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub name: String,
    pub quantity: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ingredients)]
pub(crate) struct NewIngredientRow<'a> {
    pub recipe_id: i32,
    pub name: &'a str,
    pub quantity: &'a str,
}
