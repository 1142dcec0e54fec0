use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{FilterOptions, PriceRange, Product, SortOption};
use crate::services::{
    recommendations, BrowseSession, Completion, Facets, ResultStatus, ResultsView,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct BrowseRequest {
    #[serde(default)]
    pub filters: Option<FilterOptions>,
    #[serde(default)]
    pub sort: Option<SortOption>,
}

#[derive(Debug, Serialize)]
pub struct CatalogView {
    pub status: ResultStatus,
    pub shown: usize,
    pub total: usize,
    pub products: Vec<Product>,
    pub facets: Facets,
    pub filters: FilterOptions,
    pub sort: Option<SortOption>,
}

impl From<BrowseSession<Product>> for CatalogView {
    fn from(session: BrowseSession<Product>) -> Self {
        let (shown, total) = session.counts();
        Self {
            status: session.status(),
            shown,
            total,
            products: session.projection().to_vec(),
            facets: session.facets().clone(),
            filters: session.filters().clone(),
            sort: session.sort().cloned(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FacetToggleRequest {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SortRequest {
    #[serde(default)]
    pub sort: Option<SortOption>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Facets of the whole catalog
pub async fn get_catalog_facets(State(state): State<AppState>) -> Json<Facets> {
    Json(Facets::from_products(state.catalog.products()))
}

/// Filter and sort the whole catalog without touching the search session
pub async fn browse_catalog(
    State(state): State<AppState>,
    Json(request): Json<BrowseRequest>,
) -> Json<CatalogView> {
    let mut session = BrowseSession::new(state.catalog.products().to_vec());
    if let Some(filters) = request.filters {
        session.set_filters(filters);
    }
    session.set_sort(request.sort);

    Json(CatalogView::from(session))
}

/// Run a recommendation search and publish it as the current results
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SearchRequest>,
) -> AppResult<Json<ResultsView>> {
    let query = request.query.trim().to_string();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    tracing::info!(request_id = %request_id, query = %query, "Processing search request");

    let ticket = state.search.begin(&query).await;

    // The fetch runs detached so a dropped connection still completes its ticket
    let task_state = state.clone();
    let fetch = tokio::spawn(async move {
        let result = recommendations::get_recommendations(
            task_state.provider.as_ref(),
            &task_state.catalog,
            &query,
        )
        .await;

        match result {
            Ok(recommendations) => {
                let count = recommendations.len();
                let completion = task_state.search.complete(ticket, Ok(recommendations)).await;
                (completion, Ok(count))
            }
            Err(e) => {
                let completion = task_state.search.complete(ticket, Err(e.to_string())).await;
                (completion, Err(e))
            }
        }
    });

    let (completion, outcome) = fetch
        .await
        .map_err(|e| AppError::Internal(format!("Search task failed: {}", e)))?;

    match completion {
        Completion::Superseded => Err(AppError::Superseded),
        Completion::Applied => {
            let count = outcome?;
            tracing::info!(
                request_id = %request_id,
                recommendations = count,
                "Search completed"
            );
            Ok(Json(state.search.view().await))
        }
    }
}

/// Current search results
pub async fn get_results(State(state): State<AppState>) -> Json<ResultsView> {
    Json(state.search.view().await)
}

/// Replace the result filters
pub async fn set_filters(
    State(state): State<AppState>,
    Json(filters): Json<FilterOptions>,
) -> Json<ResultsView> {
    Json(state.search.update(|session| session.set_filters(filters)).await)
}

/// Reset the result filters to the full price range and no selections
pub async fn clear_filters(State(state): State<AppState>) -> Json<ResultsView> {
    Json(state.search.update(|session| session.clear_filters()).await)
}

/// Toggle one category in the result filters
pub async fn toggle_category(
    State(state): State<AppState>,
    Json(request): Json<FacetToggleRequest>,
) -> Json<ResultsView> {
    Json(
        state
            .search
            .update(|session| session.toggle_category(&request.value))
            .await,
    )
}

/// Toggle one brand in the result filters
pub async fn toggle_brand(
    State(state): State<AppState>,
    Json(request): Json<FacetToggleRequest>,
) -> Json<ResultsView> {
    Json(
        state
            .search
            .update(|session| session.toggle_brand(&request.value))
            .await,
    )
}

/// Narrow the result price range, clamped to the current bounds
pub async fn set_price_range(
    State(state): State<AppState>,
    Json(range): Json<PriceRange>,
) -> Json<ResultsView> {
    Json(state.search.update(|session| session.set_price_range(range)).await)
}

/// Change the result ordering; a missing or null key restores rank order
pub async fn set_sort(
    State(state): State<AppState>,
    Json(request): Json<SortRequest>,
) -> Json<ResultsView> {
    Json(state.search.update(|session| session.set_sort(request.sort)).await)
}
