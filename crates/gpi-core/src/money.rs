//! # Money Module
//!
//! Provides the `Money` type for displaying catalog prices safely.
//!
//! ## Why Integer Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    (10.005).toFixed(2) = "10.01" or "10.00" depending on the binary    │
//! │    approximation of 10.005  ❌ UNPREDICTABLE                           │
//! │                                                                         │
//! │  OUR SOLUTION: Decimal In, Integer Cents Out                           │
//! │    Decimal 10.005 ──round half-up──► 1001 cents ──► "10,01"            │
//! │    Rounding happens exactly once, on an exact base-10 value            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gpi_core::money::{Currency, Money};
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let price = Money::from_decimal(Decimal::from_str("49.99").unwrap()).unwrap();
//! assert_eq!(price.cents(), 4999);
//! assert_eq!(price.display_in(Currency::Eur), "49,99 €");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Number of decimal places every displayed price carries.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Currency
// =============================================================================

/// Currencies the site displays.
///
/// EUR is canonical (prices are stored in it). BGN is derived for the
/// legally required dual display during the euro changeover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Euro, the canonical currency.
    Eur,
    /// Bulgarian lev, display only.
    Bgn,
}

impl Currency {
    /// Suffix printed after the amount.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Bgn => "лв.",
        }
    }

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Bgn => "BGN",
        }
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// A display-ready amount in the smallest currency unit (cents / stotinki).
///
/// ## Design Decisions
/// - **i64 cents**: exact, cheap to compare and format
/// - **Currency-agnostic**: the same cents value is printed with a
///   [`Currency`] suffix chosen by the caller
/// - **Built from Decimal**: [`Money::from_decimal`] is the only place a
///   fractional value becomes cents, so rounding policy lives in one spot
///
/// ## Where Money is Used
/// ```text
/// Product.price (Decimal EUR) ──► Money ──► "49,99 €"
///            │
///            └── × rate (exact) ──► Money ──► "97,77 лв."
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Rounds a non-negative decimal amount to cents using half-up rounding.
    ///
    /// ## Rounding Rule
    /// ```text
    /// 10.004  → 10.00
    /// 10.005  → 10.01   (midpoint goes up)
    /// 97.7719 → 97.77
    /// ```
    /// For non-negative values "midpoint away from zero" is exactly half-up.
    ///
    /// ## Errors
    /// - [`CoreError::NegativeAmount`] for values below zero
    /// - [`CoreError::AmountOutOfRange`] when the cents value overflows i64
    pub fn from_decimal(amount: Decimal) -> CoreResult<Money> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(CoreError::NegativeAmount { amount });
        }

        let rounded =
            amount.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);

        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
            .ok_or(CoreError::AmountOutOfRange { amount })
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (euros / leva).
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the exact decimal value (two decimal places).
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, DISPLAY_DECIMALS)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Formats the amount European style with a currency suffix.
    ///
    /// ```rust
    /// use gpi_core::money::{Currency, Money};
    ///
    /// assert_eq!(Money::from_cents(9777).display_in(Currency::Bgn), "97,77 лв.");
    /// ```
    pub fn display_in(&self, currency: Currency) -> String {
        format!("{} {}", self, currency.symbol())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// European number format: comma decimal separator, no thousands grouping.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{},{:02}", sign, self.units().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money(0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_decimal_exact() {
        let money = Money::from_decimal(dec!(49.99)).unwrap();
        assert_eq!(money.cents(), 4999);
        assert_eq!(money.units(), 49);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_rounds_half_up() {
        assert_eq!(Money::from_decimal(dec!(10.005)).unwrap().cents(), 1001);
        assert_eq!(Money::from_decimal(dec!(10.004)).unwrap().cents(), 1000);
        assert_eq!(Money::from_decimal(dec!(10.015)).unwrap().cents(), 1002);
        assert_eq!(Money::from_decimal(dec!(0.005)).unwrap().cents(), 1);
    }

    #[test]
    fn test_from_decimal_rejects_negative() {
        let err = Money::from_decimal(dec!(-0.01)).unwrap_err();
        assert_eq!(err, CoreError::NegativeAmount { amount: dec!(-0.01) });
    }

    #[test]
    fn test_from_decimal_accepts_negative_zero() {
        let zero = Money::from_decimal(Decimal::ZERO * dec!(-1)).unwrap();
        assert!(zero.is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(4999).to_string(), "49,99");
        assert_eq!(Money::from_cents(500).to_string(), "5,00");
        assert_eq!(Money::from_cents(7).to_string(), "0,07");
        assert_eq!(Money::from_cents(123450).to_string(), "1234,50");
    }

    #[test]
    fn test_display_in_currency() {
        let money = Money::from_cents(4999);
        assert_eq!(money.display_in(Currency::Eur), "49,99 €");
        assert_eq!(money.display_in(Currency::Bgn), "49,99 лв.");
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_cents(9777).to_decimal(), dec!(97.77));
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::Eur.code(), "EUR");
        assert_eq!(Currency::Bgn.code(), "BGN");
    }
}
