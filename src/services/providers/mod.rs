/// Recommendation provider abstraction
///
/// The recommender is an external LLM service. It is asked twice per search:
/// first to map the free-text query onto catalog categories, then to pick and
/// explain a handful of products from the narrowed catalog.
use crate::{
    error::AppResult,
    models::{Product, Recommendation},
};

pub mod gemini;
pub mod parse;

/// Trait for recommendation providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Picks the catalog categories relevant to `query` out of `available`
    async fn extract_categories(&self, query: &str, available: &[String])
        -> AppResult<Vec<String>>;

    /// Ranks a few `candidates` for `query`, each with a short rationale
    ///
    /// Records the model returns in an unusable shape are skipped rather than
    /// failing the whole call.
    async fn recommend(&self, query: &str, candidates: &[Product])
        -> AppResult<Vec<Recommendation>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
