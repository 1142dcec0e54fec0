use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::Recommendation,
    services::providers::RecommendationProvider,
};

/// Generates recommendations for a free-text query
///
/// The provider first maps the query onto catalog categories. The catalog is
/// narrowed to products in those categories, and only that subset is sent to
/// the provider for ranking, which keeps the prompt small. If nothing in the
/// catalog matches, the result is empty and the provider is not asked to rank.
///
/// Returned records with an unusable price are dropped.
pub async fn get_recommendations(
    provider: &dyn RecommendationProvider,
    catalog: &Catalog,
    query: &str,
) -> AppResult<Vec<Recommendation>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    let categories = provider
        .extract_categories(query, catalog.categories())
        .await?;

    let candidates = catalog.matching_categories(&categories);

    tracing::info!(
        query = %query,
        categories = categories.len(),
        candidates = candidates.len(),
        provider = provider.name(),
        "Narrowed catalog for recommendation"
    );

    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let recommendations = provider
        .recommend(query, &candidates)
        .await?
        .into_iter()
        .filter(|rec| match rec.product.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Dropping recommendation with invalid price");
                false
            }
        })
        .collect();

    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::services::providers::MockRecommendationProvider;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product("Sonic", "Earbuds", "Audio", 1999.0),
            product("FitCo", "Band", "Healthtech and Wellness", 2999.0),
            product("Sonic", "Speaker", "Audio", 4999.0),
        ])
        .unwrap()
    }

    fn product(brand: &str, name: &str, category: &str, price: f64) -> Product {
        Product {
            brand: brand.to_string(),
            product_name: name.to_string(),
            price,
            category: category.to_string(),
            description: String::new(),
        }
    }

    fn rec(product: Product, why: &str) -> Recommendation {
        Recommendation {
            product,
            why: why.to_string(),
        }
    }

    #[tokio::test]
    async fn test_empty_query_is_rejected_without_calling_provider() {
        let provider = MockRecommendationProvider::new();
        let result = get_recommendations(&provider, &catalog(), "   ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_only_matching_candidates_are_sent() {
        let mut provider = MockRecommendationProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_extract_categories()
            .withf(|query, available| {
                query.to_string() == "wireless music"
                    && available.to_vec()
                        == vec!["Audio".to_string(), "Healthtech and Wellness".to_string()]
            })
            .times(1)
            .returning(|_, _| Ok(vec!["audio".to_string()]));
        provider
            .expect_recommend()
            .withf(|_, candidates| {
                candidates.len() == 2 && candidates.iter().all(|p| p.category == "Audio")
            })
            .times(1)
            .returning(|_, candidates| Ok(vec![rec(candidates[1].clone(), "Loud")]));

        let recs = get_recommendations(&provider, &catalog(), "  wireless music ")
            .await
            .unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].product.product_name, "Speaker");
    }

    #[tokio::test]
    async fn test_no_candidates_skips_ranking() {
        let mut provider = MockRecommendationProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_extract_categories()
            .returning(|_, _| Ok(vec!["Garden".to_string()]));
        provider.expect_recommend().never();

        let recs = get_recommendations(&provider, &catalog(), "lawn mower")
            .await
            .unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_prices_are_dropped() {
        let mut provider = MockRecommendationProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_extract_categories()
            .returning(|_, _| Ok(vec!["Audio".to_string()]));
        provider.expect_recommend().returning(|_, _| {
            Ok(vec![
                rec(product("Sonic", "Earbuds", "Audio", 1999.0), "Good"),
                rec(product("Sonic", "Bogus", "Audio", -10.0), "Bad"),
            ])
        });

        let recs = get_recommendations(&provider, &catalog(), "earbuds")
            .await
            .unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].product.product_name, "Earbuds");
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let mut provider = MockRecommendationProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_extract_categories()
            .withf(|query, _| query.to_string() == "earbuds")
            .returning(|_, _| Err(AppError::ExternalApi("quota exceeded".to_string())));

        let result = get_recommendations(&provider, &catalog(), "earbuds").await;
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }
}
