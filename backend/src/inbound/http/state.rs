//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`, so they depend only
//! on the driving port and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::RecipeCatalog;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub recipes: Arc<dyn RecipeCatalog>,
}

impl HttpState {
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use cookbook::domain::ports::FixtureRecipeCatalog;
    /// use cookbook::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureRecipeCatalog));
    /// let _recipes = state.recipes.clone();
    /// ```
    pub fn new(recipes: Arc<dyn RecipeCatalog>) -> Self {
        Self { recipes }
    }
}
