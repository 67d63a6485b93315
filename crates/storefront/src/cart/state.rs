//! Cart page state and its reducer.
//!
//! Every change to the cart page goes through [`CartState::reduce`], a pure
//! `state + event -> state` step. Network effects live in
//! [`CartPage`](super::CartPage); this module never performs I/O.

use blanja_core::{CartId, LoadStatus, Price, PriceOverflow, ProductId};
use serde::Serialize;

use crate::api::{Address, Cart};

/// One product in one cart, flattened out of its cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub cart_id: CartId,
    pub price: Price,
    pub quantity: u32,
    pub selected: bool,
    pub name: String,
    pub image: Option<String>,
    pub seller_name: Option<String>,
}

impl LineItem {
    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if the product is out of range.
    pub fn line_total(&self) -> Result<Price, PriceOverflow> {
        self.price.checked_mul(self.quantity)
    }
}

/// Flatten backend carts into unselected line items, preserving order.
#[must_use]
pub fn flatten_carts(carts: Vec<Cart>) -> Vec<LineItem> {
    carts
        .into_iter()
        .flat_map(|cart| {
            let cart_id = cart.id;
            cart.products.into_iter().map(move |product| LineItem {
                product_id: product.id,
                cart_id,
                price: product.price,
                quantity: product.quantity,
                selected: false,
                name: product.name.unwrap_or_default(),
                image: product.image,
                seller_name: product.seller_name,
            })
        })
        .collect()
}

/// Something that happened to the cart page.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// A (re)load started.
    LoadStarted,
    /// Carts arrived from the backend.
    Loaded(Vec<Cart>),
    /// Loading carts failed.
    LoadFailed,
    /// Shipping addresses arrived from the backend.
    AddressLoaded(Vec<Address>),
    /// Set every item's selection flag.
    SelectAll(bool),
    /// Set the selection flag of the first item for a product.
    Select { product_id: ProductId, selected: bool },
    /// The backend accepted a quantity change for a line item.
    QuantityCommitted {
        cart_id: CartId,
        product_id: ProductId,
        quantity: u32,
    },
    /// The backend deleted every selected item.
    SelectedDeleted,
}

/// Everything the cart page shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CartState {
    pub items: Vec<LineItem>,
    pub addresses: Vec<Address>,
    pub status: LoadStatus,
}

impl CartState {
    /// Apply one event.
    #[must_use]
    pub fn reduce(mut self, event: CartEvent) -> Self {
        match event {
            CartEvent::LoadStarted => {
                self.status = LoadStatus::Loading;
            }
            CartEvent::Loaded(carts) => {
                self.items = flatten_carts(carts);
                self.status = LoadStatus::Success;
            }
            CartEvent::LoadFailed => {
                self.items.clear();
                self.status = LoadStatus::Error;
            }
            CartEvent::AddressLoaded(addresses) => {
                self.addresses = addresses;
            }
            CartEvent::SelectAll(selected) => {
                for item in &mut self.items {
                    item.selected = selected;
                }
            }
            CartEvent::Select {
                product_id,
                selected,
            } => {
                if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
                    item.selected = selected;
                }
            }
            CartEvent::QuantityCommitted {
                cart_id,
                product_id,
                quantity,
            } => {
                let matches = |i: &LineItem| i.cart_id == cart_id && i.product_id == product_id;
                if quantity == 0 {
                    if let Some(pos) = self.items.iter().position(matches) {
                        self.items.remove(pos);
                    }
                } else if let Some(item) = self.items.iter_mut().find(|i| matches(i)) {
                    item.quantity = quantity;
                }
            }
            CartEvent::SelectedDeleted => {
                self.items.retain(|i| !i.selected);
            }
        }
        self
    }

    /// First line item for a product.
    #[must_use]
    pub fn find(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Selected line items, in display order.
    pub fn selected(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter().filter(|i| i.selected)
    }

    /// Number of selected line items.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }

    /// Whether there is at least one item and every item is selected.
    #[must_use]
    pub fn all_selected(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|i| i.selected)
    }

    /// Σ price × quantity over selected items; zero when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if a line total or the sum is out of range.
    pub fn total(&self) -> Result<Price, PriceOverflow> {
        self.selected()
            .try_fold(Price::ZERO, |acc, item| acc.checked_add(item.line_total()?))
    }

    /// The primary shipping address, falling back to the first one.
    #[must_use]
    pub fn shipping_address(&self) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|a| a.is_primary())
            .or_else(|| self.addresses.first())
    }
}
