//! Presentational components rendered with Askama.
//!
//! Templates live under `templates/components/`.

mod product_grid;
mod product_section;
mod search_bar;
mod shopping_summary;

pub use product_grid::{ProductCard, ProductGrid};
pub use product_section::ProductSection;
pub use search_bar::SearchBar;
pub use shopping_summary::{DEFAULT_CHECKOUT_ACTION, ShoppingSummary};
