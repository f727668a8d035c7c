//! # Pricing Module
//!
//! Turns a canonical EUR price into the strings the website prints.
//!
//! ## Dual Display
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  During the euro changeover prices are shown in both currencies:       │
//! │                                                                         │
//! │     49,99 € (97,77 лв.)                                                 │
//! │     ───┬───  ────┬────                                                  │
//! │        │         └── secondary: round(49.99 × 1.95583, 2)              │
//! │        └──────────── primary:   round(49.99, 2)                        │
//! │                                                                         │
//! │  A price of exactly 0 means "contact us for a quote":                  │
//! │     Получи оферта                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Settings are built once per request by the host and passed in by value.
//! Nothing here reads globals or caches across calls.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Currency, Money};

/// Official fixed EUR → BGN rate set for Bulgaria's euro adoption.
pub const FIXED_EUR_BGN_RATE: Decimal = Decimal::from_parts(195583, 0, 0, false, 5);

/// Text shown instead of a price for quote-only products.
pub const QUOTE_ONLY_LABEL: &str = "Получи оферта";

// =============================================================================
// Settings
// =============================================================================

/// Site-wide currency display settings.
///
/// Read from the site settings record; both fields fall back to
/// [`CurrencyDisplaySettings::default`] when the record leaves them unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyDisplaySettings {
    /// BGN per one EUR.
    #[ts(as = "String")]
    pub conversion_rate: Decimal,

    /// Whether to print the BGN amount next to the EUR one.
    pub show_secondary: bool,
}

impl Default for CurrencyDisplaySettings {
    fn default() -> Self {
        CurrencyDisplaySettings {
            conversion_rate: FIXED_EUR_BGN_RATE,
            show_secondary: true,
        }
    }
}

impl CurrencyDisplaySettings {
    /// Creates settings, rejecting a non-positive rate.
    pub fn new(conversion_rate: Decimal, show_secondary: bool) -> CoreResult<Self> {
        let settings = CurrencyDisplaySettings {
            conversion_rate,
            show_secondary,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Merges optional site-settings fields over the defaults.
    pub fn from_site_fields(rate: Option<Decimal>, show_secondary: Option<bool>) -> CoreResult<Self> {
        let defaults = CurrencyDisplaySettings::default();
        CurrencyDisplaySettings::new(
            rate.unwrap_or(defaults.conversion_rate),
            show_secondary.unwrap_or(defaults.show_secondary),
        )
    }

    fn validate(&self) -> CoreResult<()> {
        if self.conversion_rate <= Decimal::ZERO {
            return Err(CoreError::NonPositiveRate {
                rate: self.conversion_rate,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Price Display
// =============================================================================

/// Presentation-ready price.
///
/// ## Shapes
/// | state                 | primary_text     | secondary_text | combined_text            |
/// |-----------------------|------------------|----------------|--------------------------|
/// | quote only (0)        | "Получи оферта"  | None           | "Получи оферта"          |
/// | BGN hidden            | "49,99 €"        | None           | "49,99 €"                |
/// | BGN shown             | "49,99 €"        | "97,77 лв."    | "49,99 € (97,77 лв.)"    |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceDisplay {
    pub is_quote_only: bool,
    pub primary_text: String,
    /// Rounded EUR amount; absent for quote-only prices.
    pub primary_amount: Option<Money>,
    pub secondary_text: Option<String>,
    /// Rounded BGN amount; present exactly when `secondary_text` is.
    pub secondary_amount: Option<Money>,
    pub combined_text: String,
}

impl PriceDisplay {
    fn quote_only() -> Self {
        PriceDisplay {
            is_quote_only: true,
            primary_text: QUOTE_ONLY_LABEL.to_string(),
            primary_amount: None,
            secondary_text: None,
            secondary_amount: None,
            combined_text: QUOTE_ONLY_LABEL.to_string(),
        }
    }
}

/// Formats a canonical EUR amount for display.
///
/// ## Algorithm
/// 1. Reject a negative amount or a non-positive rate
/// 2. `0` → quote-only sentinel, no BGN computed at all
/// 3. EUR text from `round_half_up(amount, 2)`
/// 4. BGN text from `round_half_up(amount × rate, 2)`; the product is taken
///    on the exact amount, not on the rounded EUR value
///
/// ## Example
/// ```rust
/// use gpi_core::pricing::{format_price, CurrencyDisplaySettings};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let settings = CurrencyDisplaySettings::default();
/// let price = format_price(Decimal::from_str("49.99").unwrap(), settings).unwrap();
/// assert_eq!(price.combined_text, "49,99 € (97,77 лв.)");
/// ```
pub fn format_price(amount: Decimal, settings: CurrencyDisplaySettings) -> CoreResult<PriceDisplay> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CoreError::NegativeAmount { amount });
    }
    settings.validate()?;

    if amount.is_zero() {
        return Ok(PriceDisplay::quote_only());
    }

    let primary = Money::from_decimal(amount)?;
    let primary_text = primary.display_in(Currency::Eur);

    if !settings.show_secondary {
        return Ok(PriceDisplay {
            is_quote_only: false,
            combined_text: primary_text.clone(),
            primary_text,
            primary_amount: Some(primary),
            secondary_text: None,
            secondary_amount: None,
        });
    }

    let converted = amount
        .checked_mul(settings.conversion_rate)
        .ok_or(CoreError::AmountOutOfRange { amount })?;
    let secondary = Money::from_decimal(converted)?;
    let secondary_text = secondary.display_in(Currency::Bgn);

    Ok(PriceDisplay {
        is_quote_only: false,
        combined_text: format!("{} ({})", primary_text, secondary_text),
        primary_text,
        primary_amount: Some(primary),
        secondary_text: Some(secondary_text),
        secondary_amount: Some(secondary),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
