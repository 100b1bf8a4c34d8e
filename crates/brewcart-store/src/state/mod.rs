//! # State Module
//!
//! The three sub-components owned by the [`Store`](crate::Store) plus the
//! client configuration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Store (one Mutex, one watch channel)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ CatalogCache │  │  CartLedger  │  │  SessionHolder   │              │
//! │  │              │  │              │  │                  │              │
//! │  │  products    │  │  lines       │  │  LoggedOut |     │              │
//! │  │  filtered    │  │  total       │  │  LoggedIn(user)  │              │
//! │  │  search_text │  │              │  │                  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  StoreConfig: read-only after startup, lives outside the lock          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sub-components are plain single-owner types; all synchronisation is
//! the facade's job.

mod cart;
mod catalog;
mod config;
mod session;

pub use cart::{CartLedger, CartLine, CartView};
pub use catalog::{
    CatalogCache, CatalogClearReason, CatalogOutcome, CatalogUpdate, CatalogView, FetchTicket,
};
pub use config::StoreConfig;
pub use session::{ScreenSet, SessionHolder, SessionState, SessionTransition, SessionView};
