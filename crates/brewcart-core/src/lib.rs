//! # brewcart-core: Pure Business Rules for BrewCart
//!
//! Domain types and rules shared by the storefront client. Everything here is
//! deterministic and free of I/O; the stateful store lives in `brewcart-store`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BrewCart Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Screens (Home, Login, Register, Cart)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ actions / snapshots                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  brewcart-store (Store facade)                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ brewcart-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   wire    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ Catalog   │  │   forms   │  │   │
//! │  │   │  Profile  │  │  (cents)  │  │ Auth DTOs │  │  limits   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO SHARED STATE                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, UserProfile, forms)
//! - [`money`] - Money type with integer arithmetic
//! - [`wire`] - Request/response payloads of the remote storefront service
//! - [`error`] - Domain error types
//! - [`validation`] - Form and cart-limit validation
//!
//! ## Example Usage
//!
//! ```rust
//! use brewcart_core::money::Money;
//!
//! let latte = Money::from_cents(450); // $4.50
//! let two = latte.multiply_quantity(2);
//! assert_eq!(two.to_string(), "$9.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;
pub mod wire;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct products allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single product in the cart.
///
/// ## Business Reason
/// Repeated taps on "add" should never produce an absurd order.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price accepted, in cents ($1,000,000.00).
///
/// `MAX_UNIT_PRICE_CENTS * MAX_ITEM_QUANTITY * MAX_CART_ITEMS` stays far
/// inside `i64`, so cart totals cannot overflow.
pub const MAX_UNIT_PRICE_CENTS: i64 = 100_000_000;
