//! # Validation Module
//!
//! Input validation for everything a visitor can type into the website.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser form                                                 │
//! │  ├── required attributes, type="email"                                 │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Site API (Rust)                                              │
//! │  ├── JSON deserialization                                              │
//! │  └── THIS MODULE: trimming, required fields, email shape               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Content store                                                │
//! │  └── Field types, unique email index                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Error texts are the Bulgarian messages the website shows verbatim.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted single-line field (name, company, phone, email).
pub const MAX_FIELD_CHARS: usize = 200;

/// Longest accepted free-text message.
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// Longest accepted search query.
pub const MAX_QUERY_CHARS: usize = 100;

// =============================================================================
// Email
// =============================================================================

/// Validates an email address and returns it trimmed.
///
/// ## Rules
/// - No whitespace inside the address
/// - Exactly one `@`, with something on both sides
/// - The domain contains a `.` that is neither its first nor last character
///
/// ## Example
/// ```rust
/// use gpi_core::validation::validate_email;
///
/// assert_eq!(validate_email(" office@gpinvest.bg ").unwrap(), "office@gpinvest.bg");
/// assert!(validate_email("office@gpinvest").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();
    let invalid = || ValidationError::InvalidEmail {
        field: "email".to_string(),
    };

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let has_inner_dot = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if !has_inner_dot {
        return Err(invalid());
    }

    if email.chars().count() > MAX_FIELD_CHARS {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_FIELD_CHARS,
        });
    }

    Ok(email.to_string())
}

// =============================================================================
// Inquiry Form
// =============================================================================

/// Raw inquiry form body. Every field is optional at this stage so that a
/// missing field yields a friendly message instead of a JSON error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct InquirySubmission {
    pub full_name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub product: Option<String>,
    pub product_url: Option<String>,
    pub additional_info: Option<String>,
}

/// A validated, trimmed inquiry ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInquiry {
    pub full_name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    pub product: Option<String>,
    pub product_url: Option<String>,
    pub additional_info: Option<String>,
}

/// Validates the inquiry form.
///
/// Checks run in form order (name, company, phone, email) and stop at the
/// first failure, matching how the form highlights one field at a time.
pub fn validate_inquiry(submission: &InquirySubmission) -> ValidationResult<NewInquiry> {
    let full_name = required(&submission.full_name, "fullName", "Моля, въведете вашите имена")?;
    let company = required(&submission.company, "company", "Моля, въведете име на фирмата")?;
    let phone = required(&submission.phone, "phone", "Моля, въведете телефонен номер")?;
    let email = validate_email(submission.email.as_deref().unwrap_or(""))?;

    let additional_info = optional(&submission.additional_info);
    if let Some(info) = &additional_info {
        check_length(info, "additionalInfo", MAX_MESSAGE_CHARS)?;
    }

    Ok(NewInquiry {
        full_name,
        company,
        phone,
        email,
        product: optional(&submission.product),
        product_url: optional(&submission.product_url),
        additional_info,
    })
}

fn required(value: &Option<String>, field: &str, message: &str) -> ValidationResult<String> {
    let value = value.as_deref().map(str::trim).unwrap_or("");
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
            message: message.to_string(),
        });
    }
    check_length(value, field, MAX_FIELD_CHARS)?;
    Ok(value.to_string())
}

/// Trims; blank becomes `None`.
fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn check_length(value: &str, field: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Search & Revalidation
// =============================================================================

/// Trims a search query and caps its length.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();
    check_length(query, "q", MAX_QUERY_CHARS)?;
    Ok(query.to_string())
}

/// Normalizes cache revalidation paths.
///
/// Blank entries are dropped, a leading `/` is added when missing and
/// duplicates are removed keeping the first occurrence.
///
/// ```rust
/// use gpi_core::validation::sanitize_revalidate_paths;
///
/// let paths = sanitize_revalidate_paths(["products", "/products", " ", "/about"]);
/// assert_eq!(paths, vec!["/products", "/about"]);
/// ```
pub fn sanitize_revalidate_paths<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut sanitized: Vec<String> = Vec::new();
    for path in paths {
        let path = path.as_ref().trim();
        if path.is_empty() {
            continue;
        }
        let normalized = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        if !sanitized.contains(&normalized) {
            sanitized.push(normalized);
        }
    }
    sanitized
}

// =============================================================================
// Unit Tests
// =============================================================================
