//! # Error Types
//!
//! Domain-specific error types for brewcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  brewcart-core errors (this file)                                      │
//! │  ├── CoreError        - Cart limits, malformed payloads                │
//! │  └── ValidationError  - Form and value validation failures             │
//! │                                                                         │
//! │  brewcart-store errors (separate crate)                                │
//! │  └── StoreError       - Remote rejections, transport, config           │
//! │                                                                         │
//! │  Notice (in store)    - What the screen shows (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → Notice → Screen      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Cart already holds the maximum number of distinct products.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Adding would push a line past the per-product quantity cap.
    ///
    /// ## When This Occurs
    /// ```text
    /// Line "Latte" qty: 999
    ///      │
    ///      ▼
    /// add_item(Latte)
    ///      │
    ///      ▼
    /// QuantityTooLarge { requested: 1000, max: 999 }
    ///      │
    ///      ▼
    /// Ledger untouched, no snapshot published
    /// ```
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// A remote payload could not be decoded into domain types.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::MalformedPayload(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any network call or state mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Two fields that must agree do not.
    #[error("{field} does not match {other}")]
    Mismatch { field: String, other: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (non-finite number, unparsable text).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
