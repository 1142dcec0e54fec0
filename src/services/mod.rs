pub mod browse;
pub mod facets;
pub mod filter;
pub mod providers;
pub mod recommendations;
pub mod search;
pub mod sort;

pub use browse::{BrowseSession, ResultStatus};
pub use facets::{
    default_filter_options, extract_brands, extract_categories, extract_price_range, Facets,
};
pub use filter::filter_products;
pub use search::{Completion, ResultsView, SearchCoordinator, SearchTicket};
pub use sort::sort_products;
