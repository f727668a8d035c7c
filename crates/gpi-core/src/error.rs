//! # Error Types
//!
//! Domain-specific error types for gpi-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gpi-core errors (this file)                                           │
//! │  ├── CoreError        - Precondition violations (bad amounts/rates)    │
//! │  └── ValidationError  - Visitor input failures (forms, queries)        │
//! │                                                                         │
//! │  site-api errors (separate crate)                                      │
//! │  └── ApiError         - What the website sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Website                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Malformed relational data (category cycles, stale menu slugs) and
//! "no data" states (empty lists, quote-only prices) are modeled values,
//! never errors.

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core logic errors.
///
/// These indicate a data-integrity bug upstream (the content store handed us
/// a value the site can never display). Hosts treat them as fatal for the
/// request; retrying yields the same error.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// A price below zero reached the formatter.
    ///
    /// ## When This Occurs
    /// - Product saved with a negative price bypassing the CMS `min: 0` rule
    /// - Import script wrote a sign-flipped value
    #[error("Price must not be negative: {amount}")]
    NegativeAmount { amount: Decimal },

    /// The EUR → BGN conversion rate is zero or negative.
    #[error("Conversion rate must be positive: {rate}")]
    NonPositiveRate { rate: Decimal },

    /// Amount is too large to be represented in cents.
    #[error("Price is out of range: {amount}")]
    AmountOutOfRange { amount: Decimal },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised for visitor-supplied input (inquiry form, newsletter signup).
/// The `Display` text is what the website shows next to the form.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{message}")]
    Required { field: String, message: String },

    /// Email address does not look like `local@domain.tld`.
    #[error("Моля, въведете валиден имейл адрес")]
    InvalidEmail { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

impl ValidationError {
    /// Name of the offending field, for form highlighting.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field, .. }
            | ValidationError::InvalidEmail { field }
            | ValidationError::TooLong { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
