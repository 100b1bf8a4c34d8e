//! # Catalog Cache
//!
//! Holds the last fetched product list, the active search text and the
//! filtered view derived from both.
//!
//! ## Fetch Ordering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  begin_fetch() ──► ticket #1 ─────────────┐                             │
//! │  begin_fetch() ──► ticket #2 ──┐          │                             │
//! │                                ▼          │                             │
//! │                 response #2 arrives       │                             │
//! │                 accept_fetch(#2) ✔ applied (last_applied = 2)           │
//! │                                           ▼                             │
//! │                            response #1 arrives late                     │
//! │                            accept_fetch(#1) ✘ stale, discarded          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use brewcart_core::validation::normalize_search_query;
use brewcart_core::wire::CatalogResponse;
use brewcart_core::Product;
use serde::{Deserialize, Serialize};

/// Sequence-numbered token handed out when a catalog fetch starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchTicket {
    pub seq: u64,

    /// Search text at the time the fetch started, sent as `?search=`.
    pub search: String,
}

/// Resolved result of a catalog fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOutcome {
    /// The service answered with a readable body.
    Loaded(CatalogResponse),
    /// No response, or a body that could not be read.
    TransportFailed(String),
}

impl CatalogOutcome {
    /// Classifies a raw response body.
    pub fn from_body(body: &str) -> Self {
        match CatalogResponse::from_json(body) {
            Ok(response) => CatalogOutcome::Loaded(response),
            Err(e) => CatalogOutcome::TransportFailed(e.to_string()),
        }
    }
}

/// Why the catalog was emptied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogClearReason {
    /// `success: false`
    Unsuccessful,
    TransportFailed,
}

/// What applying a fetch result did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogUpdate {
    Replaced { count: usize },
    Cleared { reason: CatalogClearReason },
    /// A newer fetch was already applied; the response was dropped.
    Stale { seq: u64, last_applied: u64 },
}

/// Product list plus its filtered view.
///
/// ## Invariants
/// - `filtered` is the sub-sequence of `products` whose titles contain the
///   trimmed query, case-insensitively, in original order
/// - Blank search text means `filtered == products`
#[derive(Debug, Clone, Default)]
pub struct CatalogCache {
    products: Vec<Product>,
    filtered: Vec<Product>,
    search_text: String,
    next_fetch: u64,
    last_applied_fetch: u64,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the product list wholesale and re-derives the filtered view.
    pub fn set_catalog(&mut self, products: Vec<Product>) {
        self.products = products;
        self.refilter();
    }

    /// Stores the raw search text and re-derives the filtered view.
    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_string();
        self.refilter();
    }

    /// Empties the product list (failed or unsuccessful fetch).
    pub fn clear(&mut self) {
        self.set_catalog(Vec::new());
    }

    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Starts a fetch and returns its ticket.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_fetch += 1;
        FetchTicket {
            seq: self.next_fetch,
            search: self.search_text.trim().to_string(),
        }
    }

    /// Records `ticket` as applied unless a newer (or the same) fetch has
    /// already been applied.
    ///
    /// ## Returns
    /// `false` when the ticket is stale and its response must be dropped.
    pub fn accept_fetch(&mut self, ticket: &FetchTicket) -> bool {
        if ticket.seq <= self.last_applied_fetch {
            return false;
        }
        self.last_applied_fetch = ticket.seq;
        true
    }

    pub fn last_applied_fetch(&self) -> u64 {
        self.last_applied_fetch
    }

    fn refilter(&mut self) {
        self.filtered = match normalize_search_query(&self.search_text) {
            None => self.products.clone(),
            Some(needle) => self
                .products
                .iter()
                .filter(|p| p.title_contains(&needle))
                .cloned()
                .collect(),
        };
    }
}

/// Read-only view of the catalog published in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub products: Vec<Product>,
    pub filtered: Vec<Product>,
    pub search_text: String,
    pub last_applied_fetch: u64,
}

impl From<&CatalogCache> for CatalogView {
    fn from(catalog: &CatalogCache) -> Self {
        CatalogView {
            products: catalog.products.clone(),
            filtered: catalog.filtered.clone(),
            search_text: catalog.search_text.clone(),
            last_applied_fetch: catalog.last_applied_fetch,
        }
    }
}
