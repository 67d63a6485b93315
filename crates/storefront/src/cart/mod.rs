//! Cart page: line-item state, checkout quote, and the page controller.
//!
//! ```text
//! CartApi ──► CartPage ──dispatch──► CartState::reduce
//!                │                        │
//!                ├── Navigator            └── total / selected / quote
//!                └── Notifier
//! ```

mod page;
mod state;
mod summary;

pub use page::{CHECKOUT_FAILED, CartPage, CheckoutError, DeleteOutcome, QuantityChange};
pub use state::{CartEvent, CartState, LineItem, flatten_carts};
pub use summary::{CheckoutQuote, DeliveryFeePolicy};
