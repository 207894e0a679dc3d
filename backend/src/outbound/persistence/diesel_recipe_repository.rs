//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.
//!
//! Writes that touch both tables run in one transaction. Rows read back are
//! rebuilt through the domain constructors, so a row that slipped past the
//! schema constraints surfaces as a query error rather than a bad response.

use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    CookingTime, Cuisine, Ingredient, IngredientName, IngredientQuantity, NewRecipe, Recipe,
    RecipeDescription, RecipeId, RecipeName, RecipePreview, ViewCount,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{IngredientRow, NewIngredientRow, NewRecipeRow, RecipePreviewRow, RecipeRow};
use super::pool::DbPool;
use super::schema::{ingredients, recipes};

/// Diesel-backed implementation of the recipe repository port.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    /// Repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn invalid_column(column: &str, error: impl std::fmt::Display) -> RecipeRepositoryError {
    RecipeRepositoryError::query(format!("stored {column} is invalid: {error}"))
}

fn decode_name(name: String) -> Result<RecipeName, RecipeRepositoryError> {
    RecipeName::new(name).map_err(|err| invalid_column("recipes.name", err))
}

fn decode_cooking_time(minutes: i16) -> Result<CookingTime, RecipeRepositoryError> {
    CookingTime::new(i64::from(minutes)).map_err(|err| invalid_column("recipes.cooking_time", err))
}

fn decode_views(count: i32) -> Result<ViewCount, RecipeRepositoryError> {
    ViewCount::new(i64::from(count)).map_err(|err| invalid_column("recipes.views_amount", err))
}

fn row_to_preview(row: RecipePreviewRow) -> Result<RecipePreview, RecipeRepositoryError> {
    Ok(RecipePreview {
        name: decode_name(row.name)?,
        cooking_time: decode_cooking_time(row.cooking_time)?,
        views_amount: decode_views(row.views_amount)?,
    })
}

fn row_to_ingredient(row: IngredientRow) -> Result<Ingredient, RecipeRepositoryError> {
    Ok(Ingredient {
        name: IngredientName::new(row.name).map_err(|err| invalid_column("ingredients.name", err))?,
        quantity: IngredientQuantity::new(row.quantity)
            .map_err(|err| invalid_column("ingredients.quantity", err))?,
    })
}

fn row_to_recipe(
    row: RecipeRow,
    ingredient_rows: Vec<IngredientRow>,
) -> Result<Recipe, RecipeRepositoryError> {
    let RecipeRow {
        id,
        name,
        cuisine,
        description,
        cooking_time,
        created_at,
        views_amount,
    } = row;

    let cuisine = cuisine
        .map(|value| value.parse::<Cuisine>())
        .transpose()
        .map_err(|err| invalid_column("recipes.cuisine", err))?;
    let ingredients = ingredient_rows
        .into_iter()
        .map(row_to_ingredient)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Recipe {
        id: RecipeId::new(id),
        name: decode_name(name)?,
        cuisine,
        description: RecipeDescription::new(description)
            .map_err(|err| invalid_column("recipes.description", err))?,
        cooking_time: decode_cooking_time(cooking_time)?,
        created_at,
        views_amount: decode_views(views_amount)?,
        ingredients,
    })
}

/// `views_amount + 1`, pinned at `i32::MAX` instead of overflowing.
fn saturating_view_increment() -> SqlLiteral<Integer> {
    sql::<Integer>("LEAST(views_amount::bigint + 1, 2147483647)::integer")
}

/// Failure inside the view transaction: a statement error or an unusable row.
enum ViewError {
    Diesel(diesel::result::Error),
    Decode(RecipeRepositoryError),
}

impl From<diesel::result::Error> for ViewError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl ViewError {
    fn into_port_error(self) -> RecipeRepositoryError {
        match self {
            Self::Diesel(error) => map_diesel_error(error),
            Self::Decode(error) => error,
        }
    }
}

fn new_recipe_row(recipe: &NewRecipe) -> NewRecipeRow<'_> {
    NewRecipeRow {
        name: recipe.name.as_str(),
        cuisine: recipe.cuisine.map(Cuisine::as_str),
        description: recipe.description.as_str(),
        cooking_time: recipe.cooking_time.minutes(),
        created_at: recipe.created_at,
        views_amount: recipe.views_amount.get(),
    }
}

fn new_ingredient_rows(recipe_id: i32, recipe: &NewRecipe) -> Vec<NewIngredientRow<'_>> {
    recipe
        .ingredients
        .iter()
        .map(|ingredient| NewIngredientRow {
            recipe_id,
            name: ingredient.name.as_str(),
            quantity: ingredient.quantity.as_str(),
        })
        .collect()
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn list_previews(&self) -> Result<Vec<RecipePreview>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecipePreviewRow> = recipes::table
            .order(recipes::id.asc())
            .select(RecipePreviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_preview).collect()
    }

    async fn create(&self, recipe: &NewRecipe) -> Result<Recipe, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let header = new_recipe_row(recipe);

        let id = conn
            .transaction(|conn| {
                async move {
                    let id: i32 = diesel::insert_into(recipes::table)
                        .values(&header)
                        .returning(recipes::id)
                        .get_result(conn)
                        .await?;

                    let lines = new_ingredient_rows(id, recipe);
                    if !lines.is_empty() {
                        diesel::insert_into(ingredients::table)
                            .values(&lines)
                            .execute(conn)
                            .await?;
                    }

                    Ok(id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(recipe.clone().into_recipe(RecipeId::new(id)))
    }

    async fn record_view(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        conn.transaction::<_, ViewError, _>(|conn| {
            async move {
                let row = diesel::update(recipes::table.find(id.get()))
                    .set(recipes::views_amount.eq(saturating_view_increment()))
                    .returning(RecipeRow::as_returning())
                    .get_result::<RecipeRow>(conn)
                    .await
                    .optional()?;

                let Some(row) = row else {
                    return Ok(None);
                };

                let lines: Vec<IngredientRow> = ingredients::table
                    .filter(ingredients::recipe_id.eq(row.id))
                    .order(ingredients::id.asc())
                    .select(IngredientRow::as_select())
                    .load(conn)
                    .await?;

                // Decoding inside the transaction rolls the increment back
                // when the stored row is unusable.
                row_to_recipe(row, lines)
                    .map(Some)
                    .map_err(ViewError::Decode)
            }
            .scope_boxed()
        })
        .await
        .map_err(ViewError::into_port_error)
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(recipes::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; statements run in `tests/diesel_recipe_repository.rs`.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::test_support::{fixed_now, sample_new_recipe};

    #[fixture]
    fn valid_row() -> RecipeRow {
        RecipeRow {
            id: 4,
            name: "Борщ".to_owned(),
            cuisine: Some("Русская".to_owned()),
            description: "Варить".to_owned(),
            cooking_time: 90,
            created_at: fixed_now(),
            views_amount: 3,
        }
    }

    fn line(name: &str, quantity: &str) -> IngredientRow {
        IngredientRow {
            name: name.to_owned(),
            quantity: quantity.to_owned(),
        }
    }

    #[rstest]
    fn row_conversion_keeps_ingredient_order(valid_row: RecipeRow) {
        let recipe = row_to_recipe(valid_row, vec![line("свёкла", "2 шт"), line("вода", "3 л")])
            .expect("valid row");

        assert_eq!(recipe.id, RecipeId::new(4));
        assert_eq!(recipe.cuisine, Some(Cuisine::Russian));
        assert_eq!(recipe.views_amount.get(), 3);
        let names: Vec<&str> = recipe.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["свёкла", "вода"]);
    }

    #[rstest]
    fn null_cuisine_is_allowed(mut valid_row: RecipeRow) {
        valid_row.cuisine = None;
        let recipe = row_to_recipe(valid_row, Vec::new()).expect("valid row");
        assert_eq!(recipe.cuisine, None);
    }

    #[rstest]
    fn unknown_cuisine_is_a_query_error(mut valid_row: RecipeRow) {
        valid_row.cuisine = Some("Марсианская".to_owned());

        let error = row_to_recipe(valid_row, Vec::new()).expect_err("unknown cuisine");
        assert!(matches!(error, RecipeRepositoryError::Query { .. }));
        assert!(error.to_string().contains("recipes.cuisine"));
    }

    #[rstest]
    #[case::cooking_time_zero(|row: &mut RecipeRow| row.cooking_time = 0, "recipes.cooking_time")]
    #[case::negative_views(|row: &mut RecipeRow| row.views_amount = -1, "recipes.views_amount")]
    #[case::empty_name(|row: &mut RecipeRow| row.name.clear(), "recipes.name")]
    fn invariant_violations_are_query_errors(
        mut valid_row: RecipeRow,
        #[case] corrupt: fn(&mut RecipeRow),
        #[case] column: &str,
    ) {
        corrupt(&mut valid_row);

        let error = row_to_recipe(valid_row, Vec::new()).expect_err("corrupt row");
        assert!(error.to_string().contains(column));
    }

    #[rstest]
    fn oversized_ingredient_quantity_is_rejected(valid_row: RecipeRow) {
        let error = row_to_recipe(valid_row, vec![line("соль", "очень много соли, правда")])
            .expect_err("quantity too long");
        assert!(error.to_string().contains("ingredients.quantity"));
    }

    #[rstest]
    fn insert_rows_borrow_from_the_recipe() {
        let recipe = sample_new_recipe();

        let header = new_recipe_row(&recipe);
        let lines = new_ingredient_rows(9, &recipe);

        assert_eq!(header.cuisine, Some("Русская"));
        assert_eq!(header.cooking_time, 10);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.recipe_id == 9));
        assert_eq!(lines[1].quantity, "100 г");
    }

    #[rstest]
    fn unusable_viewed_row_keeps_its_decode_error(mut valid_row: RecipeRow) {
        valid_row.cuisine = Some("Марсианская".to_owned());
        let decode = row_to_recipe(valid_row, Vec::new()).expect_err("unknown cuisine");

        let error = ViewError::Decode(decode).into_port_error();

        assert!(error.to_string().contains("recipes.cuisine"));
    }

    #[rstest]
    fn view_statement_failures_map_like_other_queries() {
        let error = ViewError::from(diesel::result::Error::NotFound).into_port_error();

        assert!(matches!(error, RecipeRepositoryError::Query { .. }));
    }

    #[rstest]
    fn preview_conversion_validates_columns() {
        let error = row_to_preview(RecipePreviewRow {
            name: "Суп".to_owned(),
            cooking_time: 301,
            views_amount: 0,
        })
        .expect_err("cooking time out of range");
        assert!(error.to_string().contains("recipes.cooking_time"));
    }
}
