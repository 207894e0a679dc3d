//! Builders for the HTTP state and the repository behind it.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use cookbook::domain::RecipeCatalogService;
use cookbook::domain::ports::RecipeCatalog;
use cookbook::inbound::http::state::HttpState;
use cookbook::outbound::memory::InMemoryRecipeRepository;
use cookbook::outbound::persistence::DieselRecipeRepository;

use super::ServerConfig;

/// Build the recipe catalogue for the configured store.
///
/// A configured pool selects the PostgreSQL repository; otherwise recipes
/// are kept in memory and lost on restart.
fn build_recipe_catalog(config: &ServerConfig, clock: Arc<dyn Clock>) -> Arc<dyn RecipeCatalog> {
    match &config.db_pool {
        Some(pool) => {
            info!("recipe catalogue backed by PostgreSQL");
            Arc::new(RecipeCatalogService::new(
                Arc::new(DieselRecipeRepository::new(pool.clone())),
                clock,
            ))
        }
        None => {
            warn!("no database configured; recipes are kept in memory");
            Arc::new(RecipeCatalogService::new(
                Arc::new(InMemoryRecipeRepository::new()),
                clock,
            ))
        }
    }
}

/// Build the shared HTTP state handed to every worker.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let recipes = build_recipe_catalog(config, Arc::new(DefaultClock));
    web::Data::new(HttpState::new(recipes))
}
