use serde::Serialize;

use crate::models::{FilterOptions, Listing, PriceRange, SortOption};
use crate::services::{facets::Facets, filter::filter_products, sort::sort_products};

/// What the current projection shows
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    /// The snapshot itself is empty
    NoData,
    /// The snapshot has products but none pass the filters
    NoMatches,
    Showing,
}

/// Facets, filters and sort over one product snapshot.
///
/// Every mutation recomputes the displayed projection before returning, so
/// `projection()` is always `sort(filter(snapshot, filters), sort)`.
#[derive(Debug, Clone)]
pub struct BrowseSession<T> {
    snapshot: Vec<T>,
    facets: Facets,
    filters: FilterOptions,
    sort: Option<SortOption>,
    projection: Vec<T>,
}

impl<T: Listing + Clone> Default for BrowseSession<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Listing + Clone> BrowseSession<T> {
    pub fn new(snapshot: Vec<T>) -> Self {
        let facets = Facets::from_products(&snapshot);
        let filters = FilterOptions::unconstrained(facets.price_range);
        let mut session = Self {
            snapshot,
            facets,
            filters,
            sort: None,
            projection: Vec::new(),
        };
        session.recompute();
        session
    }

    /// Swaps in a new snapshot.
    ///
    /// Facets are rebuilt and the price filter is reset to the new full range.
    /// Category and brand selections carry over unchanged.
    pub fn replace_snapshot(&mut self, snapshot: Vec<T>) {
        self.snapshot = snapshot;
        self.facets = Facets::from_products(&self.snapshot);
        self.filters.price_range = self.facets.price_range;
        self.recompute();

        tracing::debug!(
            total = self.snapshot.len(),
            shown = self.projection.len(),
            categories = self.facets.categories.len(),
            brands = self.facets.brands.len(),
            "Snapshot replaced"
        );
    }

    pub fn set_filters(&mut self, filters: FilterOptions) {
        self.filters = filters;
        self.recompute();
    }

    /// `None` keeps the upstream rank order
    pub fn set_sort(&mut self, sort: Option<SortOption>) {
        self.sort = sort;
        self.recompute();
    }

    /// Narrows the price filter, clamped into the snapshot's price bounds
    pub fn set_price_range(&mut self, requested: PriceRange) {
        self.filters.price_range = requested.clamp_to(&self.facets.price_range);
        self.recompute();
    }

    /// Adds `category` to the selection, or removes it if already selected
    pub fn toggle_category(&mut self, category: &str) {
        if !self.filters.categories.remove(category) {
            self.filters.categories.insert(category.to_string());
        }
        self.recompute();
    }

    /// Adds `brand` to the selection, or removes it if already selected
    pub fn toggle_brand(&mut self, brand: &str) {
        if !self.filters.brands.remove(brand) {
            self.filters.brands.insert(brand.to_string());
        }
        self.recompute();
    }

    /// Back to the full price range with no category or brand selection
    pub fn clear_filters(&mut self) {
        self.filters = FilterOptions::unconstrained(self.facets.price_range);
        self.recompute();
    }

    /// Number of facet axes currently narrowing the result
    pub fn active_filter_count(&self) -> usize {
        let mut count = 0;
        if !self.filters.categories.is_empty() {
            count += 1;
        }
        if !self.filters.brands.is_empty() {
            count += 1;
        }
        if self.filters.price_range != self.facets.price_range {
            count += 1;
        }
        count
    }

    pub fn snapshot(&self) -> &[T] {
        &self.snapshot
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn filters(&self) -> &FilterOptions {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortOption> {
        self.sort.as_ref()
    }

    /// Filtered and sorted products, ready for display
    pub fn projection(&self) -> &[T] {
        &self.projection
    }

    /// `(shown, total)`
    pub fn counts(&self) -> (usize, usize) {
        (self.projection.len(), self.snapshot.len())
    }

    pub fn status(&self) -> ResultStatus {
        if self.snapshot.is_empty() {
            ResultStatus::NoData
        } else if self.projection.is_empty() {
            ResultStatus::NoMatches
        } else {
            ResultStatus::Showing
        }
    }

    fn recompute(&mut self) {
        let filtered = filter_products(&self.snapshot, &self.filters);
        self.projection = match &self.sort {
            Some(sort) => sort_products(&filtered, sort),
            None => filtered,
        };
    }
}
