//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects the recipe and health paths together with the request,
//! response and error schemas. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::recipes::{
    CreateRecipeBody, IngredientBody, MessageBody, RecipeBody, RecipePreviewBody,
};
use crate::inbound::http::validation::{Violation, ViolationKind};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cookbook API",
        description = "Recipe catalogue with ingredient lists and view counters."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateRecipeBody,
        IngredientBody,
        RecipeBody,
        RecipePreviewBody,
        MessageBody,
        ErrorBody,
        Violation,
        ViolationKind
    )),
    tags(
        (name = "recipes", description = "Recipe catalogue operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn object_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(object)) => object.properties.keys().cloned().collect(),
            _ => panic!("expected object schema for {name}"),
        }
    }

    #[rstest]
    #[case("RecipeBody", &["id", "name", "cooking_time", "views_amount", "description", "cuisine", "created_at", "ingredients"])]
    #[case("RecipePreviewBody", &["name", "cooking_time", "views_amount"])]
    #[case("Violation", &["type", "loc", "msg", "input", "ctx"])]
    fn schemas_expose_wire_fields(#[case] schema: &str, #[case] fields: &[&str]) {
        let present = object_fields(schema);
        for field in fields {
            assert!(present.iter().any(|name| name == field), "{schema} lacks {field}");
        }
    }

    #[rstest]
    fn every_recipe_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/recipes"));
        assert!(paths.contains_key("/recipes/{recipe_id}"));
        assert!(paths.contains_key("/health/ready"));
    }
}
