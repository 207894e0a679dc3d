//! Recipe HTTP handlers.
//!
//! ```text
//! GET    /recipes
//! POST   /recipes
//! GET    /recipes/{recipe_id}
//! DELETE /recipes/{recipe_id}
//! ```

use actix_web::{delete, get, post, web};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, Ingredient, RECIPE_NOT_FOUND, Recipe, RecipeId, RecipePreview};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_config, path_integer, recipe_draft, validation_error};

/// Ingredient line as sent and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientBody {
    #[schema(min_length = 1, max_length = 100, example = "ингредиент 1")]
    pub name: String,
    #[schema(min_length = 1, max_length = 20, example = "100 г")]
    pub quantity: String,
}

/// Create payload. Documented here; the handler validates the raw JSON.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateRecipeBody {
    #[schema(min_length = 1, max_length = 100)]
    pub name: String,
    #[schema(minimum = 1, maximum = 300)]
    pub cooking_time: i16,
    #[schema(minimum = 0)]
    pub views_amount: Option<i32>,
    #[schema(min_length = 1, max_length = 1000)]
    pub description: String,
    #[schema(value_type = Option<String>, example = "Русская")]
    pub cuisine: Option<String>,
    /// Defaults to the time of the request.
    pub created_at: Option<NaiveDateTime>,
    pub ingredients: Vec<IngredientBody>,
}

/// Full recipe representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeBody {
    pub id: i32,
    pub name: String,
    pub cooking_time: i16,
    pub views_amount: i32,
    pub description: String,
    #[schema(value_type = Option<String>, example = "Русская")]
    pub cuisine: Option<String>,
    pub created_at: NaiveDateTime,
    pub ingredients: Vec<IngredientBody>,
}

/// Listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipePreviewBody {
    pub name: String,
    pub cooking_time: i16,
    pub views_amount: i32,
}

/// Delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    #[schema(example = "Recipe deleted")]
    pub message: String,
}

impl From<Ingredient> for IngredientBody {
    fn from(value: Ingredient) -> Self {
        Self {
            name: value.name.into(),
            quantity: value.quantity.into(),
        }
    }
}

impl From<Recipe> for RecipeBody {
    fn from(value: Recipe) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into(),
            cooking_time: value.cooking_time.minutes(),
            views_amount: value.views_amount.get(),
            description: value.description.into(),
            cuisine: value.cuisine.map(|cuisine| cuisine.as_str().to_owned()),
            created_at: value.created_at,
            ingredients: value
                .ingredients
                .into_iter()
                .map(IngredientBody::from)
                .collect(),
        }
    }
}

impl From<RecipePreview> for RecipePreviewBody {
    fn from(value: RecipePreview) -> Self {
        Self {
            name: value.name.into(),
            cooking_time: value.cooking_time.minutes(),
            views_amount: value.views_amount.get(),
        }
    }
}

/// Ids outside the store's integer range cannot name a recipe.
fn recipe_id(raw: &str) -> Result<RecipeId, Error> {
    match path_integer("recipe_id", raw) {
        Ok(Some(id)) => Ok(RecipeId::new(id)),
        Ok(None) => Err(Error::not_found(RECIPE_NOT_FOUND)),
        Err(violation) => Err(validation_error(&[violation])),
    }
}

/// List every recipe as a preview.
#[utoipa::path(
    get,
    path = "/recipes",
    responses(
        (status = 200, description = "Recipe previews in creation order", body = [RecipePreviewBody]),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<RecipePreviewBody>>> {
    let previews = state.recipes.list_recipes().await?;
    Ok(web::Json(
        previews.into_iter().map(RecipePreviewBody::from).collect(),
    ))
}

/// Create a recipe with its ingredients.
#[utoipa::path(
    post,
    path = "/recipes",
    request_body = CreateRecipeBody,
    responses(
        (status = 200, description = "Recipe created", body = RecipeBody),
        (status = 422, description = "Validation failed; `detail` lists every violation", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<RecipeBody>> {
    let draft = recipe_draft(&payload).map_err(|violations| validation_error(&violations))?;
    let recipe = state.recipes.create_recipe(draft).await?;
    Ok(web::Json(RecipeBody::from(recipe)))
}

/// Fetch a recipe; each successful fetch counts one view.
#[utoipa::path(
    get,
    path = "/recipes/{recipe_id}",
    params(("recipe_id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe with the incremented view count", body = RecipeBody),
        (status = 404, description = "Recipe not found", body = ErrorBody),
        (status = 422, description = "Identifier is not an integer", body = ErrorBody)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{recipe_id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecipeBody>> {
    let id = recipe_id(&path)?;
    let recipe = state.recipes.get_recipe(id).await?;
    Ok(web::Json(RecipeBody::from(recipe)))
}

/// Delete a recipe and its ingredients.
#[utoipa::path(
    delete,
    path = "/recipes/{recipe_id}",
    params(("recipe_id" = i64, Path, description = "Recipe identifier")),
    responses(
        (status = 200, description = "Recipe deleted", body = MessageBody),
        (status = 404, description = "Recipe not found", body = ErrorBody),
        (status = 422, description = "Identifier is not an integer", body = ErrorBody)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{recipe_id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageBody>> {
    let id = recipe_id(&path)?;
    state.recipes.delete_recipe(id).await?;
    Ok(web::Json(MessageBody {
        message: "Recipe deleted".to_owned(),
    }))
}

/// Register the recipe routes and their extractor configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(list_recipes)
        .service(create_recipe)
        .service(get_recipe)
        .service(delete_recipe);
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
