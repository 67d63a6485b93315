//! Cart total and the checkout button.

use askama::Template;
use blanja_core::Price;

/// Where the checkout button posts by default.
pub const DEFAULT_CHECKOUT_ACTION: &str = "/cart/checkout";

/// Selected total formatted as Rupiah, plus the checkout trigger.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "components/shopping_summary.html")]
pub struct ShoppingSummary {
    total: Price,
    formatted_total: String,
    checkout_action: String,
}

impl ShoppingSummary {
    #[must_use]
    pub fn new(total: Price) -> Self {
        Self {
            total,
            formatted_total: total.display(),
            checkout_action: DEFAULT_CHECKOUT_ACTION.to_string(),
        }
    }

    /// Post the checkout button somewhere else.
    #[must_use]
    pub fn with_checkout_action(mut self, action: impl Into<String>) -> Self {
        self.checkout_action = action.into();
        self
    }

    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// e.g. `Rp 2.500`.
    #[must_use]
    pub fn formatted_total(&self) -> &str {
        &self.formatted_total
    }

    /// Target the checkout button submits to.
    #[must_use]
    pub fn checkout_action(&self) -> &str {
        &self.checkout_action
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_total() {
        let summary = ShoppingSummary::new(Price::from_rupiah(1_000_000));
        assert_eq!(summary.formatted_total(), "Rp\u{a0}1.000.000");
    }

    #[test]
    fn test_zero_total() {
        let summary = ShoppingSummary::new(Price::ZERO);
        assert_eq!(summary.formatted_total(), "Rp\u{a0}0");
    }

    #[test]
    fn test_render_has_trigger() {
        let html = ShoppingSummary::new(Price::from_rupiah(2500))
            .with_checkout_action("/checkout")
            .render()
            .unwrap();
        assert!(html.contains("Rp\u{a0}2.500"));
        assert!(html.contains(r#"action="/checkout""#));
        assert!(html.contains("Check Out"));
    }
}
