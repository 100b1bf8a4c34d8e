//! # Domain Types
//!
//! Core domain types used throughout BrewCart.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  UserProfile    │   │   Forms         │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id ("_id")     │   │  id ("_id")     │   │  LoginForm      │       │
//! │  │  title          │   │  name           │   │  Registration-  │       │
//! │  │  subtitle       │   │  email          │   │    Form         │       │
//! │  │  image          │   │  ("emailId")    │   │                 │       │
//! │  │  price (cents)  │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names follow the storefront service's JSON so products and profiles
//! deserialize straight from its responses.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product as listed by the storefront service.
///
/// Immutable once fetched; a re-fetch replaces the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier assigned by the service.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    /// Display name, also the field searched by the catalog filter.
    pub title: String,

    #[serde(default)]
    pub subtitle: String,

    /// Image reference, relative to the media base URL.
    #[serde(default)]
    pub image: String,

    /// Unit price. Travels as a decimal number, held as cents.
    #[serde(with = "crate::money::decimal")]
    pub price: Money,

    /// Product category ("coffee", "bean", ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Case-insensitive substring match on the title.
    ///
    /// `needle` must already be lowercased; the catalog lowercases the query
    /// once and reuses it for every product.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
    }
}

// =============================================================================
// User Profile
// =============================================================================

/// The authenticated user's identity as returned in `userDetails`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(rename = "emailId", alias = "email")]
    pub email: String,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        UserProfile {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Raw input of the login screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Raw input of the registration screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
