//! # Store Error Type
//!
//! Every failure a store action or flow helper can report.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in BrewCart                               │
//! │                                                                         │
//! │  Screen                        Store                                    │
//! │  ──────                        ─────                                    │
//! │                                                                         │
//! │  prepare_login(form) ────────► InvalidForm  (nothing sent, no mutation)│
//! │                                                                         │
//! │  apply_auth(outcome) ────────► Rejected     (server message/fallback)  │
//! │                         └────► Transport    (generic retry message)    │
//! │                                                                         │
//! │  add_item(product) ──────────► Core(QuantityTooLarge | CartTooLarge)   │
//! │                                                                         │
//! │  Notice::from(&err) ─────────► { code, message } for the toast         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No variant is fatal: the store is left in its previous state.

use brewcart_core::{CoreError, ValidationError};
use thiserror::Error;

use crate::auth::AuthFlow;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Domain rule violation from brewcart-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Form input rejected before any network call.
    #[error("Invalid {flow} form: {source}")]
    InvalidForm {
        flow: AuthFlow,
        source: ValidationError,
    },

    /// The service answered but refused the request.
    #[error("{flow} rejected: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        flow: AuthFlow,
        message: Option<String>,
    },

    /// The request never produced a usable response.
    #[error("{flow} request failed: {detail}")]
    Transport { flow: AuthFlow, detail: String },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;
