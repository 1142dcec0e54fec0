use crate::models::{Listing, SortOption};

/// Returns `products` reordered by `sort`, leaving the input untouched.
///
/// Sorting is stable: products with equal prices keep the order the
/// recommender ranked them in. Date keys and unrecognized keys are identity,
/// since products carry no date.
pub fn sort_products<T: Listing + Clone>(products: &[T], sort: &SortOption) -> Vec<T> {
    let mut sorted = products.to_vec();

    match sort {
        SortOption::PriceLowHigh => sorted.sort_by(|a, b| a.price().total_cmp(&b.price())),
        SortOption::PriceHighLow => sorted.sort_by(|a, b| b.price().total_cmp(&a.price())),
        SortOption::DateNewest | SortOption::DateOldest => {}
        SortOption::Unrecognized(key) => {
            tracing::debug!(sort = %key, "Unrecognized sort key, keeping input order");
        }
    }

    sorted
}
