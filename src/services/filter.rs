use crate::models::{FilterOptions, Listing};

impl FilterOptions {
    /// True when `product` satisfies the price, category and brand constraints.
    ///
    /// Constraints are ANDed. An empty category or brand set matches anything;
    /// the price range is always applied.
    pub fn matches<T: Listing>(&self, product: &T) -> bool {
        let within_price_range = self.price_range.contains(product.price());

        let matches_category =
            self.categories.is_empty() || self.categories.contains(product.category());

        let matches_brand = self.brands.is_empty() || self.brands.contains(product.brand());

        within_price_range && matches_category && matches_brand
    }
}

/// Products passing `filters`, in their original relative order
pub fn filter_products<T: Listing + Clone>(products: &[T], filters: &FilterOptions) -> Vec<T> {
    products
        .iter()
        .filter(|product| filters.matches(*product))
        .cloned()
        .collect()
}
