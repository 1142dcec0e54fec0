use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt::Display};

use crate::error::{AppError, AppResult};

/// Lower bound returned when there is no price data to derive bounds from
pub const NO_DATA_PRICE_MIN: f64 = 0.0;
/// Upper bound returned when there is no price data to derive bounds from
pub const NO_DATA_PRICE_MAX: f64 = 1000.0;

/// Inclusive price bounds. `min <= max` always holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawPriceRange")]
pub struct PriceRange {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawPriceRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawPriceRange> for PriceRange {
    type Error = AppError;

    fn try_from(raw: RawPriceRange) -> Result<Self, Self::Error> {
        PriceRange::new(raw.min, raw.max)
    }
}

impl PriceRange {
    /// Creates a price range, rejecting inverted or non-finite bounds
    pub fn new(min: f64, max: f64) -> AppResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(AppError::InvalidInput(format!(
                "Price range bounds must be finite (got {} - {})",
                min, max
            )));
        }
        if min > max {
            return Err(AppError::InvalidInput(format!(
                "Price range minimum {} exceeds maximum {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// The `{0, 1000}` range reported for an empty product list.
    ///
    /// Callers must read this as "no data", not as a real bound.
    pub fn no_data() -> Self {
        Self {
            min: NO_DATA_PRICE_MIN,
            max: NO_DATA_PRICE_MAX,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Inclusive on both ends
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }

    /// Narrows this range so it fits inside `bounds`.
    ///
    /// A request lying entirely outside `bounds` collapses onto the nearest
    /// bound, so the result is never inverted.
    pub fn clamp_to(&self, bounds: &PriceRange) -> PriceRange {
        let min = self.min.max(bounds.min).min(bounds.max);
        let max = self.max.min(bounds.max).max(min);
        PriceRange { min, max }
    }
}

impl Display for PriceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

/// User-selected facet constraints.
///
/// Empty `categories` or `brands` place no constraint on that facet. The
/// price range is always enforced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterOptions {
    pub price_range: PriceRange,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub brands: BTreeSet<String>,
}

impl FilterOptions {
    /// No category or brand constraint, price limited to `price_range`
    pub fn unconstrained(price_range: PriceRange) -> Self {
        Self {
            price_range,
            categories: BTreeSet::new(),
            brands: BTreeSet::new(),
        }
    }
}

/// Display ordering for a product list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortOption {
    PriceLowHigh,
    PriceHighLow,
    /// No date field exists on products yet; sorts as identity
    DateNewest,
    /// No date field exists on products yet; sorts as identity
    DateOldest,
    /// Any key this build does not know; sorts as identity
    Unrecognized(String),
}

impl SortOption {
    pub fn as_str(&self) -> &str {
        match self {
            SortOption::PriceLowHigh => "price-low-high",
            SortOption::PriceHighLow => "price-high-low",
            SortOption::DateNewest => "date-newest",
            SortOption::DateOldest => "date-oldest",
            SortOption::Unrecognized(key) => key,
        }
    }

    /// Human-readable label for menus
    pub fn label(&self) -> &str {
        match self {
            SortOption::PriceLowHigh => "Price: Low to High",
            SortOption::PriceHighLow => "Price: High to Low",
            SortOption::DateNewest => "Date: Newest First",
            SortOption::DateOldest => "Date: Oldest First",
            SortOption::Unrecognized(key) => key,
        }
    }
}

impl From<&str> for SortOption {
    fn from(key: &str) -> Self {
        match key {
            "price-low-high" => SortOption::PriceLowHigh,
            "price-high-low" => SortOption::PriceHighLow,
            "date-newest" => SortOption::DateNewest,
            "date-oldest" => SortOption::DateOldest,
            other => SortOption::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for SortOption {
    fn from(key: String) -> Self {
        SortOption::from(key.as_str())
    }
}

impl From<SortOption> for String {
    fn from(option: SortOption) -> Self {
        option.as_str().to_string()
    }
}

impl Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
