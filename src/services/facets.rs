use serde::Serialize;
use std::collections::BTreeSet;

use crate::models::{FilterOptions, Listing, PriceRange};

/// Filter axes available for one product snapshot
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Facets {
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub price_range: PriceRange,
}

impl Facets {
    pub fn from_products<T: Listing>(products: &[T]) -> Self {
        Self {
            categories: extract_categories(products),
            brands: extract_brands(products),
            price_range: extract_price_range(products),
        }
    }
}

/// Distinct categories in ascending order.
///
/// Values are compared exactly: "audio" and "Audio" are two facets.
pub fn extract_categories<T: Listing>(products: &[T]) -> Vec<String> {
    distinct_sorted(products.iter().map(Listing::category))
}

/// Distinct brands in ascending order, compared exactly
pub fn extract_brands<T: Listing>(products: &[T]) -> Vec<String> {
    distinct_sorted(products.iter().map(Listing::brand))
}

/// Minimum and maximum price, or [`PriceRange::no_data`] for an empty list
pub fn extract_price_range<T: Listing>(products: &[T]) -> PriceRange {
    let mut prices = products.iter().map(Listing::price);

    let Some(first) = prices.next() else {
        return PriceRange::no_data();
    };

    let (min, max) = prices.fold((first, first), |(min, max), price| {
        (min.min(price), max.max(price))
    });

    // Only non-finite prices can fail here, and those are rejected on ingestion
    PriceRange::new(min, max).unwrap_or_else(|_| PriceRange::no_data())
}

/// Full price range of `products` with no category or brand constraint
pub fn default_filter_options<T: Listing>(products: &[T]) -> FilterOptions {
    FilterOptions::unconstrained(extract_price_range(products))
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
