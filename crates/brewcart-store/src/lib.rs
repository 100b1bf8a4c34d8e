//! # BrewCart Store
//!
//! Client-side state for the BrewCart storefront: the catalog the user
//! browses, the cart they fill and the session that decides which screens
//! they may reach.
//!
//! ## Module Organization
//! ```text
//! brewcart_store/
//! ├── lib.rs          ◄─── You are here (exports & tracing setup)
//! ├── store.rs        ◄─── Store facade, snapshots, change notification
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Product list, search filter, fetch ordering
//! │   ├── cart.rs     ◄─── Cart ledger and running total
//! │   ├── session.rs  ◄─── Logged-in / logged-out holder
//! │   └── config.rs   ◄─── Endpoint and currency configuration
//! ├── auth.rs         ◄─── Login / registration flow support
//! ├── endpoints.rs    ◄─── Service URLs
//! ├── notice.rs       ◄─── User-facing toast messages
//! └── error.rs        ◄─── Store error type
//! ```
//!
//! ## Usage
//! ```text
//! let store = Store::shared();
//! let mut rx = store.subscribe();
//!
//! let ticket = store.begin_catalog_fetch();
//! // ... network layer fetches endpoints.catalog_url(&ticket.search) ...
//! store.apply_catalog(&ticket, CatalogOutcome::from_body(&body));
//!
//! store.add_item(&product, product.price)?;
//! rx.changed().await?;            // screens re-render from rx.borrow()
//! ```

pub mod auth;
pub mod endpoints;
pub mod error;
pub mod notice;
pub mod state;
pub mod store;

use tracing_subscriber::EnvFilter;

pub use auth::{prepare_login, prepare_registration, AuthFlow, AuthOutcome};
pub use endpoints::Endpoints;
pub use error::{StoreError, StoreResult};
pub use notice::{Notice, NoticeCode};
pub use state::{
    CartLedger, CartLine, CartView, CatalogCache, CatalogClearReason, CatalogOutcome,
    CatalogUpdate, CatalogView, FetchTicket, ScreenSet, SessionHolder, SessionState,
    SessionTransition, SessionView, StoreConfig,
};
pub use store::{Store, StoreHandle, StoreSnapshot};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=brewcart=trace` - Show trace for brewcart crates only
/// - Default: INFO, DEBUG for brewcart crates
///
/// Calling it twice is harmless; the second call keeps the first subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,brewcart=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
