//! # Validation Module
//!
//! Input validation for BrewCart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Screen forms                                                  │
//! │  └── THIS MODULE: required fields, password confirmation               │
//! │           │        (rejected before any network call)                  │
//! │           ▼                                                             │
//! │  Layer 2: Wire boundary                                                 │
//! │  └── Price decoding (money::decimal), payload shape (serde)            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart ledger                                                   │
//! │  └── THIS MODULE: per-line quantity cap, distinct product cap          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brewcart_core::validation::validate_login;
//! use brewcart_core::LoginForm;
//!
//! let form = LoginForm { email: "a@x.com".into(), password: String::new() };
//! assert!(validate_login(&form).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{LoginForm, RegistrationForm};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Form Validators
// =============================================================================

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates the login form.
///
/// ## Rules
/// - Email and password are both required (blank counts as missing)
pub fn validate_login(form: &LoginForm) -> ValidationResult<()> {
    require("email", &form.email)?;
    require("password", &form.password)?;
    Ok(())
}

/// Validates the registration form.
///
/// ## Rules
/// - Name, email, password and confirmation are all required
/// - Password and confirmation must be identical
///
/// ## User Workflow
/// ```text
/// Tap "Register"
///      │
///      ├── any field blank? → Required        → "All fields are required"
///      │
///      ├── password ≠ confirm? → Mismatch     → "Passwords do not match"
///      │
///      └── OK → POST /app/auth/signup
/// ```
pub fn validate_registration(form: &RegistrationForm) -> ValidationResult<()> {
    require("name", &form.name)?;
    require("email", &form.email)?;
    require("password", &form.password)?;
    require("confirm password", &form.confirm_password)?;

    if form.password != form.confirm_password {
        return Err(ValidationError::Mismatch {
            field: "confirm password".to_string(),
            other: "password".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Search
// =============================================================================

/// Normalizes a catalog search query for matching.
///
/// Returns `None` when the query is empty or only whitespace (meaning "no
/// filter"), otherwise the trimmed, lowercased needle.
///
/// ```rust
/// use brewcart_core::validation::normalize_search_query;
///
/// assert_eq!(normalize_search_query("  Latte "), Some("latte".to_string()));
/// assert_eq!(normalize_search_query("   "), None);
/// ```
pub fn normalize_search_query(query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

// =============================================================================
// Cart Limits
// =============================================================================

/// Checks that a line may hold `requested` units.
pub fn check_line_quantity(requested: i64) -> CoreResult<()> {
    if requested > MAX_ITEM_QUANTITY {
        return Err(CoreError::QuantityTooLarge {
            requested,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Checks that a unit price is inside `0..=MAX_UNIT_PRICE_CENTS`.
///
/// Applied by the cart before a price enters a line.
pub fn check_unit_price(price: Money) -> CoreResult<()> {
    if price.cents() < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        }
        .into());
    }
    if price.cents() > MAX_UNIT_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE_CENTS,
        }
        .into());
    }
    Ok(())
}

/// Checks that one more distinct product fits in a cart of `current_items`.
pub fn check_cart_capacity(current_items: usize) -> CoreResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(CoreError::CartTooLarge {
            max: MAX_CART_ITEMS,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
