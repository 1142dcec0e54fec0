use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Whole catalog
        .route("/catalog/facets", get(handlers::get_catalog_facets))
        .route("/catalog/browse", post(handlers::browse_catalog))
        // Recommendation search
        .route("/search", post(handlers::search))
        // Current results
        .route("/results", get(handlers::get_results))
        .route("/results/filters", put(handlers::set_filters))
        .route("/results/filters", delete(handlers::clear_filters))
        .route("/results/filters/categories", post(handlers::toggle_category))
        .route("/results/filters/brands", post(handlers::toggle_brand))
        .route("/results/filters/price", put(handlers::set_price_range))
        .route("/results/sort", put(handlers::set_sort))
}
