use std::{path::Path, sync::Arc};

use crate::{
    error::{AppError, AppResult},
    models::Product,
    services::facets,
};

/// Read-only product catalog, loaded once at startup and shared by reference
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
    categories: Arc<[String]>,
}

impl Catalog {
    /// Builds a catalog from already-parsed products, validating every price
    pub fn new(products: Vec<Product>) -> AppResult<Self> {
        for product in &products {
            product
                .validate()
                .map_err(|e| AppError::Catalog(e.to_string()))?;
        }

        let categories = facets::extract_categories(&products);

        Ok(Self {
            products: products.into(),
            categories: categories.into(),
        })
    }

    /// Parses a catalog from a JSON array of products
    pub fn from_json(json: &str) -> AppResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)
            .map_err(|e| AppError::Catalog(format!("Failed to parse catalog: {}", e)))?;
        Self::new(products)
    }

    /// Loads a catalog file from disk
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Catalog(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let catalog = Self::from_json(&json)?;

        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            categories = catalog.categories.len(),
            "Loaded product catalog"
        );

        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Distinct catalog categories, sorted
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products whose category contains any of `categories`, ignoring case.
    ///
    /// This is the loose match used to narrow the catalog before handing it to
    /// the recommender, not the exact facet filter.
    pub fn matching_categories(&self, categories: &[String]) -> Vec<Product> {
        let needles: Vec<String> = categories.iter().map(|c| c.to_lowercase()).collect();

        self.products
            .iter()
            .filter(|product| {
                let haystack = product.category.to_lowercase();
                needles.iter().any(|needle| haystack.contains(needle.as_str()))
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"[
        {"brand": "Sonic", "product_name": "Earbuds", "price": 1999, "category": "Audio", "description": "Wireless earbuds"},
        {"brand": "FitCo", "product_name": "Band", "price": 2999, "category": "Healthtech and Wellness", "description": "Fitness band"},
        {"brand": "Sonic", "product_name": "Speaker", "price": 4999, "category": "Audio", "description": "Bluetooth speaker"},
        {"brand": "Streamly", "product_name": "Stick", "price": 3499, "category": "Entertainment", "description": "Streaming stick"}
    ]"#;

    #[test]
    fn test_from_json_collects_sorted_categories() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog.categories(),
            &[
                "Audio".to_string(),
                "Entertainment".to_string(),
                "Healthtech and Wellness".to_string()
            ]
        );
    }

    #[test]
    fn test_from_json_rejects_negative_price() {
        let json = r#"[{"brand": "A", "product_name": "P", "price": -5, "category": "C", "description": ""}]"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(AppError::Catalog(_))
        ));
    }

    #[test]
    fn test_matching_categories_is_case_insensitive_substring() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        let matched = catalog.matching_categories(&["wellness".to_string(), "AUDIO".to_string()]);

        let names: Vec<&str> = matched.iter().map(|p| p.product_name.as_str()).collect();
        assert_eq!(names, vec!["Earbuds", "Band", "Speaker"]);
    }

    #[test]
    fn test_matching_categories_none_requested() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert!(catalog.matching_categories(&[]).is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));
    }
}
