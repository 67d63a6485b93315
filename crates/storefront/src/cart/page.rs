//! Cart page controller.
//!
//! [`CartPage`] owns a [`CartState`] and turns user actions into backend
//! calls, committing each change to state only after the backend accepts it.

use blanja_core::{CheckoutId, LoadStatus, Price, PriceOverflow, ProductId};
use thiserror::Error;
use tracing::{error, info, instrument, warn};

use super::state::{CartEvent, CartState};
use super::summary::{CheckoutQuote, DeliveryFeePolicy};
use crate::api::{ApiError, CartApi, CartProductRequest, DeleteAllProductsRequest};
use crate::navigation::Navigator;
use crate::notify::{ErrorVisibility, Notifier};

/// Message shown when a checkout is rejected.
pub const CHECKOUT_FAILED: &str = "Checkout Failed";

/// Result of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No line item for that product; nothing was sent.
    NotFound,
    /// The change would make the quantity negative; nothing was sent.
    Rejected,
    /// The backend accepted the change.
    Updated { quantity: u32 },
    /// The quantity reached zero and the item left the cart.
    Removed,
    /// The backend refused; state is unchanged.
    Failed,
}

/// Result of deleting the selected items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The backend removed this many line items.
    Deleted(usize),
    /// The backend refused; state is unchanged.
    Failed,
}

/// Why a checkout did not go through.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The selection's amounts could not be computed; nothing was sent.
    #[error("Checkout amount error: {0}")]
    Amount(#[from] PriceOverflow),

    /// The backend refused the checkout.
    #[error("Checkout request failed: {0}")]
    Api(#[from] ApiError),
}

impl CheckoutError {
    /// Backend status code, if the backend refused.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.status(),
            Self::Amount(_) => None,
        }
    }
}

/// The cart page: state plus the collaborators it talks to.
pub struct CartPage<A, N, T> {
    api: A,
    navigator: N,
    notifier: T,
    state: CartState,
    delivery_fee: DeliveryFeePolicy,
    mutation_errors: ErrorVisibility,
}

impl<A, N, T> CartPage<A, N, T>
where
    A: CartApi,
    N: Navigator,
    T: Notifier,
{
    pub fn new(api: A, navigator: N, notifier: T) -> Self {
        Self {
            api,
            navigator,
            notifier,
            state: CartState::default(),
            delivery_fee: DeliveryFeePolicy::default(),
            mutation_errors: ErrorVisibility::default(),
        }
    }

    #[must_use]
    pub fn with_delivery_fee(mut self, policy: DeliveryFeePolicy) -> Self {
        self.delivery_fee = policy;
        self
    }

    #[must_use]
    pub fn with_mutation_errors(mut self, visibility: ErrorVisibility) -> Self {
        self.mutation_errors = visibility;
        self
    }

    pub const fn state(&self) -> &CartState {
        &self.state
    }

    pub const fn navigator(&self) -> &N {
        &self.navigator
    }

    pub const fn notifier(&self) -> &T {
        &self.notifier
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    fn dispatch(&mut self, event: CartEvent) {
        self.state = std::mem::take(&mut self.state).reduce(event);
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load carts and shipping addresses, replacing whatever was shown.
    ///
    /// A failed cart load leaves the page in [`LoadStatus::Error`]; a failed
    /// address load is only logged.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> LoadStatus {
        self.dispatch(CartEvent::LoadStarted);

        let (carts, addresses) = tokio::join!(self.api.get_carts(), self.api.get_addresses());

        match carts {
            Ok(carts) => {
                info!(carts = carts.len(), "Cart loaded");
                self.dispatch(CartEvent::Loaded(carts));
            }
            Err(e) => {
                error!(error = %e, "Failed to load cart");
                self.dispatch(CartEvent::LoadFailed);
            }
        }

        match addresses {
            Ok(addresses) => self.dispatch(CartEvent::AddressLoaded(addresses)),
            Err(e) => warn!(error = %e, "Failed to load shipping addresses"),
        }

        self.state.status
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select_all(&mut self, selected: bool) {
        self.dispatch(CartEvent::SelectAll(selected));
    }

    /// Toggle the first line item for `product_id`.
    pub fn select(&mut self, product_id: ProductId, selected: bool) {
        self.dispatch(CartEvent::Select {
            product_id,
            selected,
        });
    }

    /// Σ price × quantity over the selected items.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if the total is out of range.
    pub fn total(&self) -> Result<Price, PriceOverflow> {
        self.state.total()
    }

    /// What a checkout would submit right now.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if any amount is out of range.
    pub fn quote(&self) -> Result<CheckoutQuote, PriceOverflow> {
        CheckoutQuote::from_state(&self.state, self.delivery_fee)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Change a product's quantity by `delta`.
    ///
    /// Positive deltas go to `cart/addProduct`, everything else to
    /// `cart/removeProduct`; the request always carries `|delta|`.
    #[instrument(skip(self))]
    pub async fn change_quantity(&mut self, product_id: ProductId, delta: i32) -> QuantityChange {
        let Some(item) = self.state.find(product_id) else {
            return QuantityChange::NotFound;
        };
        let cart_id = item.cart_id;

        let Ok(quantity) = u32::try_from(i64::from(item.quantity) + i64::from(delta)) else {
            warn!(current = item.quantity, delta, "Quantity change would go below zero");
            return QuantityChange::Rejected;
        };

        let request = CartProductRequest {
            cart_id,
            product_id,
            quantity: delta.unsigned_abs(),
        };
        let result = if delta > 0 {
            self.api.add_product(&request).await
        } else {
            self.api.remove_product(&request).await
        };

        if let Err(e) = result {
            self.report_mutation_error("Updating quantity", &e);
            return QuantityChange::Failed;
        }

        self.dispatch(CartEvent::QuantityCommitted {
            cart_id,
            product_id,
            quantity,
        });

        if quantity == 0 {
            QuantityChange::Removed
        } else {
            QuantityChange::Updated { quantity }
        }
    }

    /// Delete every selected item in one request.
    ///
    /// The request is sent even when nothing is selected.
    #[instrument(skip(self))]
    pub async fn delete_selected(&mut self) -> DeleteOutcome {
        let (cart_id, product_id): (Vec<_>, Vec<_>) = self
            .state
            .selected()
            .map(|item| (item.cart_id, item.product_id))
            .unzip();
        let count = product_id.len();

        let request = DeleteAllProductsRequest {
            cart_id,
            product_id,
        };
        if let Err(e) = self.api.delete_all_products(&request).await {
            self.report_mutation_error("Deleting products", &e);
            return DeleteOutcome::Failed;
        }

        self.dispatch(CartEvent::SelectedDeleted);
        DeleteOutcome::Deleted(count)
    }

    /// Submit the selected items for checkout and navigate to the result.
    ///
    /// Cart state is left as it was either way.
    ///
    /// # Errors
    ///
    /// Alerts [`CHECKOUT_FAILED`], then returns the backend error, or
    /// [`CheckoutError::Amount`] without sending anything if the quote is
    /// out of range.
    #[instrument(skip(self))]
    pub async fn checkout(&mut self) -> Result<CheckoutId, CheckoutError> {
        let quote = match self.quote() {
            Ok(quote) => quote,
            Err(e) => {
                error!(error = %e, "Checkout amount out of range");
                self.notifier.alert(CHECKOUT_FAILED);
                return Err(e.into());
            }
        };
        match self.api.checkout(&quote.to_request()).await {
            Ok(response) => {
                let id = response.checkout_id;
                info!(checkout_id = %id, summary = %quote.summary, "Checkout created");
                self.navigator.navigate(&format!("/checkout/{id}"));
                Ok(id)
            }
            Err(e) => {
                error!(error = %e, "Checkout failed");
                self.notifier.alert(CHECKOUT_FAILED);
                Err(e.into())
            }
        }
    }

    fn report_mutation_error(&self, action: &str, error: &ApiError) {
        error!(error = %error, "{action} failed");
        if self.mutation_errors == ErrorVisibility::Notify {
            self.notifier.alert(&format!("{action} failed: {error}"));
        }
    }
}
