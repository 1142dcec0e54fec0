use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub mod filters;
pub mod gemini;

pub use filters::{FilterOptions, PriceRange, SortOption};

/// Fields the facet, filter and sort engines read from a record.
///
/// Everything else on a record (names, descriptions, rationale text) is
/// passthrough data the engines never inspect.
pub trait Listing {
    fn brand(&self) -> &str;
    fn category(&self) -> &str;
    fn price(&self) -> f64;
}

/// A catalog product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub brand: String,
    pub product_name: String,
    pub price: f64,
    pub category: String,
    pub description: String,
}

impl Product {
    /// Rejects prices the engines cannot order or bound (negative, NaN, infinite)
    pub fn validate(&self) -> AppResult<()> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(AppError::InvalidInput(format!(
                "Product '{}' has invalid price {}",
                self.product_name, self.price
            )));
        }
        Ok(())
    }
}

impl Listing for Product {
    fn brand(&self) -> &str {
        &self.brand
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn price(&self) -> f64 {
        self.price
    }
}

/// A product picked by the recommender, with its explanation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(flatten)]
    pub product: Product,
    pub why: String,
}

impl Listing for Recommendation {
    fn brand(&self) -> &str {
        &self.product.brand
    }

    fn category(&self) -> &str {
        &self.product.category
    }

    fn price(&self) -> f64 {
        self.product.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64) -> Product {
        Product {
            brand: "Acme".to_string(),
            product_name: "Widget".to_string(),
            price,
            category: "Tools".to_string(),
            description: "A widget".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_zero_and_positive() {
        assert!(product(0.0).validate().is_ok());
        assert!(product(2499.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_and_non_finite() {
        assert!(product(-1.0).validate().is_err());
        assert!(product(f64::NAN).validate().is_err());
        assert!(product(f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_recommendation_serde_is_flat() {
        let json = r#"{
            "brand": "Acme",
            "product_name": "Widget",
            "price": 99.5,
            "category": "Tools",
            "description": "A widget",
            "why": "Fits the budget"
        }"#;

        let rec: Recommendation = serde_json::from_str(json).unwrap();
        assert_eq!(rec.product.brand, "Acme");
        assert_eq!(rec.price(), 99.5);
        assert_eq!(rec.why, "Fits the budget");

        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["product_name"], "Widget");
        assert_eq!(value["why"], "Fits the budget");
        assert!(value.get("product").is_none());
    }

    #[test]
    fn test_listing_reads_through_recommendation() {
        let rec = Recommendation {
            product: product(10.0),
            why: "Cheap".to_string(),
        };
        assert_eq!(rec.brand(), "Acme");
        assert_eq!(rec.category(), "Tools");
    }
}
