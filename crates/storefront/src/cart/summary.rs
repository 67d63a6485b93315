//! Delivery fee and checkout quote.

use blanja_core::{CartId, Price, PriceOverflow};
use rust_decimal::Decimal;

use super::state::CartState;
use crate::api::{CheckoutCart, CheckoutRequest};

/// Delivery fee charged as a fraction of the selected total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryFeePolicy {
    rate: Decimal,
}

impl DeliveryFeePolicy {
    /// A policy charging `rate` of the total; `None` unless `0 <= rate <= 1`.
    #[must_use]
    pub fn new(rate: Decimal) -> Option<Self> {
        (rate >= Decimal::ZERO && rate <= Decimal::ONE).then_some(Self { rate })
    }

    #[must_use]
    pub const fn rate(&self) -> Decimal {
        self.rate
    }

    /// Fee for a given total.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if the fee is out of range.
    pub fn fee(&self, total: Price) -> Result<Price, PriceOverflow> {
        total.checked_scale(self.rate)
    }
}

impl Default for DeliveryFeePolicy {
    /// 10% of the total.
    fn default() -> Self {
        Self {
            rate: Decimal::new(10, 2),
        }
    }
}

/// Everything a checkout submits, derived from the selected items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutQuote {
    pub total: Price,
    pub delivery: Price,
    pub summary: Price,
    /// Distinct cart ids of the selected items, in first-seen order.
    pub carts: Vec<CartId>,
}

impl CheckoutQuote {
    /// Quote the current selection.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if the total, fee or summary is out of range.
    pub fn from_state(
        state: &CartState,
        policy: DeliveryFeePolicy,
    ) -> Result<Self, PriceOverflow> {
        let total = state.total()?;
        let delivery = policy.fee(total)?;
        let summary = total.checked_add(delivery)?;

        let mut carts: Vec<CartId> = Vec::new();
        for item in state.selected() {
            if !carts.contains(&item.cart_id) {
                carts.push(item.cart_id);
            }
        }

        Ok(Self {
            total,
            delivery,
            summary,
            carts,
        })
    }

    /// Body for the `checkout` endpoint.
    #[must_use]
    pub fn to_request(&self) -> CheckoutRequest {
        CheckoutRequest {
            carts: self.carts.iter().map(|&id| CheckoutCart { id }).collect(),
            delivery: self.delivery,
            summary: self.summary,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use blanja_core::ProductId;
    use serde_json::json;

    use super::*;
    use crate::api::{Cart, CartProduct};
    use crate::cart::CartEvent;

    fn product(id: u32, price: i64, quantity: u32) -> CartProduct {
        CartProduct {
            id: ProductId::new(id),
            price: Price::from_rupiah(price),
            quantity,
            name: None,
            image: None,
            seller_name: None,
            size: None,
            color: None,
        }
    }

    fn state_with(carts: Vec<Cart>) -> CartState {
        CartState::default()
            .reduce(CartEvent::Loaded(carts))
            .reduce(CartEvent::SelectAll(true))
    }

    #[test]
    fn test_policy_bounds() {
        assert!(DeliveryFeePolicy::new(Decimal::ZERO).is_some());
        assert!(DeliveryFeePolicy::new(Decimal::ONE).is_some());
        assert!(DeliveryFeePolicy::new(Decimal::new(-1, 2)).is_none());
        assert!(DeliveryFeePolicy::new(Decimal::new(101, 2)).is_none());
        assert_eq!(DeliveryFeePolicy::default().rate(), Decimal::new(1, 1));
    }

    #[test]
    fn test_quote_two_carts() {
        let state = state_with(vec![
            Cart {
                id: CartId::new(1),
                products: vec![product(10, 1000, 2)],
            },
            Cart {
                id: CartId::new(2),
                products: vec![product(20, 500, 1)],
            },
        ]);

        let quote = CheckoutQuote::from_state(&state, DeliveryFeePolicy::default()).unwrap();
        assert_eq!(quote.total, Price::from_rupiah(2500));
        assert_eq!(quote.delivery, Price::from_rupiah(250));
        assert_eq!(quote.summary, Price::from_rupiah(2750));
        assert_eq!(quote.carts, vec![CartId::new(1), CartId::new(2)]);

        assert_eq!(
            serde_json::to_value(quote.to_request()).unwrap(),
            json!({ "carts": [{ "id": 1 }, { "id": 2 }], "delivery": 250, "summary": 2750 })
        );
    }

    #[test]
    fn test_quote_dedupes_cart_ids() {
        let state = state_with(vec![
            Cart {
                id: CartId::new(3),
                products: vec![product(1, 100, 1), product(2, 200, 1)],
            },
            Cart {
                id: CartId::new(1),
                products: vec![product(5, 50, 1)],
            },
        ]);

        let quote = CheckoutQuote::from_state(&state, DeliveryFeePolicy::default()).unwrap();
        assert_eq!(quote.carts, vec![CartId::new(3), CartId::new(1)]);
    }

    #[test]
    fn test_quote_keeps_fractional_fee() {
        let state = state_with(vec![Cart {
            id: CartId::new(1),
            products: vec![product(1, 1005, 1)],
        }]);

        let quote = CheckoutQuote::from_state(&state, DeliveryFeePolicy::default()).unwrap();
        assert_eq!(quote.delivery.amount(), Decimal::new(1005, 1));
        assert_eq!(quote.summary.amount(), Decimal::new(11055, 1));
    }

    #[test]
    fn test_quote_out_of_range_is_an_error() {
        let mut big = product(1, 0, 1);
        big.price = Price::new(Decimal::MAX);
        let state = state_with(vec![Cart {
            id: CartId::new(1),
            products: vec![big],
        }]);

        assert_eq!(state.total(), Ok(Price::new(Decimal::MAX)));
        assert_eq!(
            CheckoutQuote::from_state(&state, DeliveryFeePolicy::default()),
            Err(PriceOverflow)
        );
        let free = DeliveryFeePolicy::new(Decimal::ZERO).unwrap();
        assert!(CheckoutQuote::from_state(&state, free).is_ok());
    }

    #[test]
    fn test_quote_empty_selection() {
        let state = CartState::default().reduce(CartEvent::Loaded(vec![Cart {
            id: CartId::new(1),
            products: vec![product(1, 100, 1)],
        }]));

        let quote = CheckoutQuote::from_state(&state, DeliveryFeePolicy::default()).unwrap();
        assert!(quote.total.is_zero());
        assert!(quote.summary.is_zero());
        assert!(quote.carts.is_empty());
    }
}
