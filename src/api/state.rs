use std::sync::Arc;

use crate::catalog::Catalog;
use crate::services::{providers::RecommendationProvider, SearchCoordinator};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub provider: Arc<dyn RecommendationProvider>,
    pub search: Arc<SearchCoordinator>,
}

impl AppState {
    /// Creates state around a loaded catalog and a recommendation provider
    pub fn new(catalog: Catalog, provider: Arc<dyn RecommendationProvider>) -> Self {
        Self {
            catalog,
            provider,
            search: Arc::new(SearchCoordinator::new()),
        }
    }
}
