//! Type-safe Rupiah price representation using decimal arithmetic.
//!
//! The storefront only deals in Indonesian Rupiah. Amounts are kept as
//! exact decimals so that totals and percentage fees never pick up binary
//! floating point error, and are rendered with [`format_rupiah`].

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Currency symbol used by the `id-ID` locale.
const RUPIAH_SYMBOL: &str = "Rp";

/// Thousands separator used by the `id-ID` locale.
const GROUP_SEPARATOR: char = '.';

/// Arithmetic on a [`Price`] left the range a decimal can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Amount is too large to compute")]
pub struct PriceOverflow;

/// A Rupiah amount.
///
/// Serialized as a plain JSON number: integral amounts are written without
/// a fractional part (`2500`, not `2500.0`) so the backend sees the same
/// payload a browser client would send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero Rupiah.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of Rupiah.
    #[must_use]
    pub fn from_rupiah(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Sum of two amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if the sum is out of range.
    pub fn checked_add(self, rhs: Self) -> Result<Self, PriceOverflow> {
        self.0.checked_add(rhs.0).map(Self).ok_or(PriceOverflow)
    }

    /// Line total: unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if the product is out of range.
    pub fn checked_mul(self, quantity: u32) -> Result<Self, PriceOverflow> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .map(Self)
            .ok_or(PriceOverflow)
    }

    /// Multiply by a rate, e.g. `0.10` for a 10% fee.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] if the product is out of range.
    pub fn checked_scale(self, rate: Decimal) -> Result<Self, PriceOverflow> {
        self.0.checked_mul(rate).map(Self).ok_or(PriceOverflow)
    }

    /// Sum of any number of amounts; zero for none.
    ///
    /// # Errors
    ///
    /// Returns [`PriceOverflow`] as soon as a partial sum is out of range.
    pub fn checked_sum<I>(amounts: I) -> Result<Self, PriceOverflow>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |acc, amount| acc.checked_add(amount))
    }

    /// Format for display as Indonesian Rupiah (e.g., `"Rp 19.900"`).
    #[must_use]
    pub fn display(&self) -> String {
        format_rupiah(self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.fract().is_zero()
            && let Ok(whole) = i64::try_from(self.0)
        {
            return serializer.serialize_i64(whole);
        }
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Self)
    }
}

/// Format an amount as Indonesian Rupiah with zero fraction digits.
///
/// Mirrors `Intl.NumberFormat("id-ID", { style: "currency", currency: "IDR" })`
/// with both fraction-digit bounds set to zero: the symbol is followed by a
/// non-breaking space, thousands are grouped with `.`, and halves round away
/// from zero.
///
/// ```rust
/// # use blanja_core::format_rupiah;
/// # use rust_decimal::Decimal;
/// assert_eq!(format_rupiah(Decimal::from(1_000_000)), "Rp\u{a0}1.000.000");
/// ```
#[must_use]
pub fn format_rupiah(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().normalize().to_string();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{RUPIAH_SYMBOL}\u{a0}{}", group_thousands(&digits))
}

/// Insert the group separator every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_rupiah_groups_thousands() {
        assert_eq!(format_rupiah(Decimal::from(1_000_000)), "Rp\u{a0}1.000.000");
        assert_eq!(format_rupiah(Decimal::from(2750)), "Rp\u{a0}2.750");
        assert_eq!(format_rupiah(Decimal::from(999)), "Rp\u{a0}999");
    }

    #[test]
    fn test_format_rupiah_zero() {
        assert_eq!(format_rupiah(Decimal::ZERO), "Rp\u{a0}0");
    }

    #[test]
    fn test_format_rupiah_rounds_half_away_from_zero() {
        assert_eq!(format_rupiah(dec("1499.5")), "Rp\u{a0}1.500");
        assert_eq!(format_rupiah(dec("1499.49")), "Rp\u{a0}1.499");
        assert_eq!(format_rupiah(dec("-0.4")), "Rp\u{a0}0");
    }

    #[test]
    fn test_format_rupiah_negative() {
        assert_eq!(format_rupiah(Decimal::from(-12_500)), "-Rp\u{a0}12.500");
    }

    #[test]
    fn test_price_arithmetic() {
        let total = Price::checked_sum([
            Price::from_rupiah(1000).checked_mul(2).unwrap(),
            Price::from_rupiah(500).checked_mul(1).unwrap(),
        ])
        .unwrap();
        assert_eq!(total, Price::from_rupiah(2500));
        assert_eq!(total.checked_scale(dec("0.10")), Ok(Price::from_rupiah(250)));
        assert_eq!(Price::checked_sum([]), Ok(Price::ZERO));
    }

    #[test]
    fn test_price_arithmetic_overflow_is_an_error() {
        let huge = Price::new(Decimal::from_i128_with_scale(10_i128.pow(20), 0));
        assert_eq!(huge.checked_mul(1_000_000_000), Err(PriceOverflow));
        assert_eq!(
            Price::new(Decimal::MAX).checked_add(Price::from_rupiah(1)),
            Err(PriceOverflow)
        );
        assert_eq!(
            Price::checked_sum([Price::new(Decimal::MAX), Price::new(Decimal::MAX)]),
            Err(PriceOverflow)
        );
        assert_eq!(
            huge.checked_mul(1000),
            Ok(Price::new(Decimal::from_i128_with_scale(10_i128.pow(23), 0)))
        );
    }

    #[test]
    fn test_price_serializes_whole_amounts_as_integers() {
        assert_eq!(serde_json::to_string(&Price::from_rupiah(2750)).unwrap(), "2750");
        assert_eq!(serde_json::to_string(&Price::new(dec("12.5"))).unwrap(), "12.5");
    }

    #[test]
    fn test_price_deserializes_numbers() {
        let price: Price = serde_json::from_str("150000").unwrap();
        assert_eq!(price, Price::from_rupiah(150_000));

        let price: Price = serde_json::from_str("99.5").unwrap();
        assert_eq!(price.amount(), dec("99.5"));
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_rupiah(75_000).to_string(), "Rp\u{a0}75.000");
    }
}
