//! # Store Facade
//!
//! The single aggregate the screens talk to.
//!
//! ## Action Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen                    Store                       Subscribers     │
//! │  ──────                    ─────                       ───────────     │
//! │                                                                         │
//! │  store.add_item(&p, price)                                              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  lock state ──► CartLedger::add_item ──► total recomputed               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  changed? ──yes──► revision += 1 ──► snapshot ──► watch::send_replace ─►│
//! │        │                                                                │
//! │        ▼                                                                │
//! │  unlock, return                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! All three sub-components sit behind one `Mutex`. An action holds it for
//! its whole mutation and publishes before releasing it, so subscribers see
//! snapshots in the same order the actions ran and never a half-applied one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use brewcart_core::{Money, Product, UserProfile};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::auth::{AuthFlow, AuthOutcome};
use crate::error::{StoreError, StoreResult};
use crate::notice::Notice;
use crate::state::{
    CartLedger, CartLine, CartView, CatalogCache, CatalogClearReason, CatalogOutcome,
    CatalogUpdate, CatalogView, FetchTicket, ScreenSet, SessionHolder, SessionTransition,
    SessionView,
};

/// Shared handle passed to every consumer.
pub type StoreHandle = Arc<Store>;

/// Immutable state published after each state-changing action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    /// Strictly increasing; bumps once per published change.
    pub revision: u64,
    pub session: SessionView,
    pub catalog: CatalogView,
    pub cart: CartView,
}

impl StoreSnapshot {
    pub fn screen_set(&self) -> ScreenSet {
        if self.session.is_logged_in {
            ScreenSet::Authenticated
        } else {
            ScreenSet::Unauthenticated
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    catalog: CatalogCache,
    cart: CartLedger,
    session: SessionHolder,
    revision: u64,
}

impl StoreState {
    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            revision: self.revision,
            session: SessionView::from(&self.session),
            catalog: CatalogView::from(&self.catalog),
            cart: CartView::from(&self.cart),
        }
    }
}

pub struct Store {
    state: Mutex<StoreState>,
    snapshots: watch::Sender<Arc<StoreSnapshot>>,
}

impl Store {
    /// Creates a store: logged out, empty catalog, empty cart.
    pub fn new() -> Self {
        let state = StoreState::default();
        let (snapshots, _) = watch::channel(Arc::new(state.snapshot()));
        Store {
            state: Mutex::new(state),
            snapshots,
        }
    }

    pub fn shared() -> StoreHandle {
        Arc::new(Self::new())
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<StoreSnapshot>> {
        self.snapshots.subscribe()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<StoreSnapshot> {
        self.snapshots.borrow().clone()
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub fn set_catalog(&self, products: Vec<Product>) {
        debug!(count = products.len(), "set_catalog");
        self.dispatch(|s| {
            s.catalog.set_catalog(products);
            ((), true)
        })
    }

    pub fn set_search_text(&self, text: &str) {
        debug!(text, "set_search_text");
        self.dispatch(|s| {
            let changed = s.catalog.search_text() != text;
            if changed {
                s.catalog.set_search_text(text);
            }
            ((), changed)
        })
    }

    pub fn filtered(&self) -> Vec<Product> {
        self.lock().catalog.filtered().to_vec()
    }

    /// Starts a catalog fetch. The ticket carries the search text to send and
    /// must be handed back to [`Store::apply_catalog`] with the result.
    pub fn begin_catalog_fetch(&self) -> FetchTicket {
        let ticket = self.lock().catalog.begin_fetch();
        debug!(seq = ticket.seq, search = %ticket.search, "begin_catalog_fetch");
        ticket
    }

    /// Applies a fetch result unless a newer fetch already landed.
    ///
    /// `success: true` replaces the catalog; `success: false` and transport
    /// failures clear it so no stale list stays on screen.
    pub fn apply_catalog(&self, ticket: &FetchTicket, outcome: CatalogOutcome) -> CatalogUpdate {
        self.dispatch(|s| {
            if !s.catalog.accept_fetch(ticket) {
                let last_applied = s.catalog.last_applied_fetch();
                warn!(seq = ticket.seq, last_applied, "Discarding stale catalog response");
                return (
                    CatalogUpdate::Stale {
                        seq: ticket.seq,
                        last_applied,
                    },
                    false,
                );
            }

            let update = match outcome {
                CatalogOutcome::Loaded(response) if response.success => {
                    let count = response.products.len();
                    s.catalog.set_catalog(response.products);
                    info!(seq = ticket.seq, count, "Catalog replaced");
                    CatalogUpdate::Replaced { count }
                }
                CatalogOutcome::Loaded(_) => {
                    warn!(seq = ticket.seq, "Catalog fetch unsuccessful, clearing");
                    s.catalog.clear();
                    CatalogUpdate::Cleared {
                        reason: CatalogClearReason::Unsuccessful,
                    }
                }
                CatalogOutcome::TransportFailed(detail) => {
                    warn!(seq = ticket.seq, %detail, "Catalog fetch failed, clearing");
                    s.catalog.clear();
                    CatalogUpdate::Cleared {
                        reason: CatalogClearReason::TransportFailed,
                    }
                }
            };
            (update, true)
        })
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds one unit of `product` at `price_at_add` and returns the line.
    pub fn add_item(&self, product: &Product, price_at_add: Money) -> StoreResult<CartLine> {
        debug!(product_id = %product.id, price = %price_at_add, "add_item");
        self.dispatch(|s| match s.cart.add_item(product, price_at_add) {
            Ok(line) => (Ok(line.clone()), true),
            Err(e) => {
                warn!(product_id = %product.id, error = %e, "add_item rejected");
                (Err(StoreError::from(e)), false)
            }
        })
    }

    /// Removes one unit; `false` if the product was not in the cart.
    pub fn remove_item(&self, product_id: &str) -> bool {
        debug!(product_id, "remove_item");
        self.dispatch(|s| {
            let removed = s.cart.remove_item(product_id);
            (removed, removed)
        })
    }

    /// Recomputes the cart total from its lines.
    pub fn calculate_total(&self) -> Money {
        self.dispatch(|s| {
            let before = s.cart.total();
            let total = s.cart.calculate_total();
            (total, total != before)
        })
    }

    pub fn total(&self) -> Money {
        self.lock().cart.total()
    }

    /// Empties the cart (order completed or abandoned).
    pub fn clear_cart(&self) {
        debug!("clear_cart");
        self.dispatch(|s| {
            let changed = !s.cart.is_empty();
            s.cart.clear();
            ((), changed)
        })
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Sets the authenticated profile; `None` logs out (and clears the cart).
    pub fn set_user_details(&self, profile: Option<UserProfile>) -> SessionTransition {
        match profile {
            Some(profile) => self.dispatch(|s| (s.session.set_user_details(Some(profile)), true)),
            None => self.logout(),
        }
    }

    /// Logs out and clears the cart so the next user starts empty.
    pub fn logout(&self) -> SessionTransition {
        self.dispatch(|s| {
            let transition = s.session.logout();
            let had_items = !s.cart.is_empty();
            s.cart.clear();
            if had_items {
                info!("Cart cleared on logout");
            }
            (
                transition,
                transition != SessionTransition::Unchanged || had_items,
            )
        })
    }

    pub fn is_logged_in(&self) -> bool {
        self.lock().session.is_logged_in()
    }

    pub fn screen_set(&self) -> ScreenSet {
        self.lock().session.screen_set()
    }

    /// Applies a resolved login/signup result.
    ///
    /// Only an accepted outcome touches the session; failures return an
    /// error whose [`Notice`] carries the message to show.
    pub fn apply_auth(&self, flow: AuthFlow, outcome: AuthOutcome) -> StoreResult<Notice> {
        match outcome {
            AuthOutcome::Accepted(response) => {
                self.set_user_details(Some(response.user_details));
                Ok(Notice::auth_succeeded(flow))
            }
            AuthOutcome::Rejected(payload) => {
                warn!(%flow, message = ?payload.message, "Authentication rejected");
                Err(StoreError::Rejected {
                    flow,
                    message: payload.message,
                })
            }
            AuthOutcome::TransportFailed(detail) => {
                warn!(%flow, %detail, "Authentication request failed");
                Err(StoreError::Transport { flow, detail })
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // Sub-components run all checks before their first write, and prices
        // are capped at MAX_UNIT_PRICE_CENTS so cart totals cannot overflow.
        // No action stops halfway through a mutation, so the data behind a
        // poisoned lock is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs one action under the lock. `f` returns its result and whether it
    /// changed state; a change bumps the revision and publishes a snapshot
    /// before the lock is released.
    fn dispatch<R>(&self, f: impl FnOnce(&mut StoreState) -> (R, bool)) -> R {
        let mut state = self.lock();
        let (result, changed) = f(&mut state);
        if changed {
            state.revision += 1;
            let snapshot = Arc::new(state.snapshot());
            self.snapshots.send_replace(snapshot);
        }
        result
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("revision", &self.snapshots.borrow().revision)
            .field("subscribers", &self.snapshots.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewcart_core::wire::{AuthResponse, CatalogResponse, ErrorPayload};

    fn product(id: &str, title: &str, cents: i64) -> Product {
        Product {
            id: id.to_string(),
            title: title.to_string(),
            subtitle: String::new(),
            image: format!("{}.png", id),
            price: Money::from_cents(cents),
            kind: None,
            description: None,
        }
    }

    fn menu() -> Vec<Product> {
        vec![
            product("1", "Latte", 450),
            product("2", "Mocha", 320),
            product("3", "Iced Latte", 500),
        ]
    }

    #[test]
    fn test_initial_snapshot() {
        let store = Store::new();
        let snap = store.snapshot();
        assert_eq!(snap.revision, 0);
        assert!(!snap.session.is_logged_in);
        assert!(snap.catalog.products.is_empty());
        assert!(snap.cart.lines.is_empty());
        assert_eq!(snap.screen_set(), ScreenSet::Unauthenticated);
    }

    #[test]
    fn test_add_item_publishes_before_returning() {
        let store = Store::new();
        let rx = store.subscribe();
        let latte = product("1", "Latte", 450);

        store.add_item(&latte, latte.price).unwrap();

        let snap = rx.borrow();
        assert_eq!(snap.revision, 1);
        assert_eq!(snap.cart.total.cents(), 450);
        assert_eq!(snap.cart.lines[0].quantity, 1);
    }

    #[test]
    fn test_noop_actions_do_not_publish() {
        let store = Store::new();
        store.remove_item("missing");
        store.clear_cart();
        store.logout();
        store.set_search_text("");
        assert_eq!(store.calculate_total(), Money::zero());
        assert_eq!(store.snapshot().revision, 0);
    }

    #[test]
    fn test_rejected_add_does_not_publish() {
        let store = Store::new();
        let latte = product("1", "Latte", 450);
        for _ in 0..brewcart_core::MAX_ITEM_QUANTITY {
            store.add_item(&latte, latte.price).unwrap();
        }
        let revision = store.snapshot().revision;

        let err = store.add_item(&latte, latte.price).unwrap_err();
        assert!(matches!(err, StoreError::Core(_)));
        assert_eq!(store.snapshot().revision, revision);
    }

    #[test]
    fn test_oversized_price_never_reaches_the_ledger() {
        let store = Store::new();
        let latte = product("1", "Latte", 450);
        store.add_item(&latte, latte.price).unwrap();
        let before = store.snapshot();

        let body = r#"{"success": true, "products": [
            {"_id": "p1", "title": "Gold Bean", "price": 50000000000000000}
        ]}"#;
        assert!(matches!(
            CatalogOutcome::from_body(body),
            CatalogOutcome::TransportFailed(_)
        ));

        let gold = product("p1", "Gold Bean", 5_000_000_000_000_000_000);
        for _ in 0..2 {
            let err = store.add_item(&gold, gold.price).unwrap_err();
            assert!(matches!(
                Notice::from(&err).code,
                crate::notice::NoticeCode::ValidationError
            ));
        }
        assert!(!store.remove_item("p1"));

        let after = store.snapshot();
        assert_eq!(after, before);
        assert_eq!(store.total().cents(), 450);
    }

    #[test]
    fn test_logout_clears_cart() {
        let store = Store::new();
        store.set_user_details(Some(UserProfile::new("Ann", "a@x.com")));
        let latte = product("1", "Latte", 450);
        store.add_item(&latte, latte.price).unwrap();

        assert_eq!(store.logout(), SessionTransition::LoggedOut);

        let snap = store.snapshot();
        assert!(!snap.session.is_logged_in);
        assert!(snap.cart.lines.is_empty());
        assert!(snap.cart.total.is_zero());
        assert!(store.total().is_zero());
    }

    #[test]
    fn test_logout_while_logged_out_still_clears_cart() {
        let store = Store::new();
        let latte = product("1", "Latte", 450);
        store.add_item(&latte, latte.price).unwrap();

        assert_eq!(store.logout(), SessionTransition::Unchanged);
        assert!(store.snapshot().cart.lines.is_empty());
    }

    #[test]
    fn test_search_filters_catalog() {
        let store = Store::new();
        store.set_catalog(menu());
        store.set_search_text("latte");

        let titles: Vec<String> = store.filtered().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, ["Latte", "Iced Latte"]);
        assert_eq!(store.snapshot().catalog.search_text, "latte");
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let store = Store::new();
        let older = store.begin_catalog_fetch();
        let newer = store.begin_catalog_fetch();

        let fresh = CatalogOutcome::Loaded(CatalogResponse {
            success: true,
            products: menu(),
        });
        assert_eq!(
            store.apply_catalog(&newer, fresh),
            CatalogUpdate::Replaced { count: 3 }
        );

        let stale = CatalogOutcome::Loaded(CatalogResponse {
            success: true,
            products: vec![product("9", "Old Brew", 100)],
        });
        assert_eq!(
            store.apply_catalog(&older, stale),
            CatalogUpdate::Stale {
                seq: older.seq,
                last_applied: newer.seq
            }
        );
        assert_eq!(store.snapshot().catalog.products.len(), 3);
    }

    #[test]
    fn test_failed_fetch_clears_catalog() {
        let store = Store::new();
        store.set_catalog(menu());

        let ticket = store.begin_catalog_fetch();
        let update = store.apply_catalog(
            &ticket,
            CatalogOutcome::TransportFailed("connection reset".to_string()),
        );
        assert_eq!(
            update,
            CatalogUpdate::Cleared {
                reason: CatalogClearReason::TransportFailed
            }
        );
        assert!(store.snapshot().catalog.products.is_empty());
        assert!(store.filtered().is_empty());
    }

    #[test]
    fn test_apply_auth() {
        let store = Store::new();

        let err = store
            .apply_auth(
                AuthFlow::Login,
                AuthOutcome::Rejected(ErrorPayload {
                    message: Some("Invalid credentials".to_string()),
                }),
            )
            .unwrap_err();
        assert_eq!(Notice::from(&err).message, "Invalid credentials");
        assert!(!store.is_logged_in());
        assert_eq!(store.snapshot().revision, 0);

        let notice = store
            .apply_auth(
                AuthFlow::Login,
                AuthOutcome::Accepted(AuthResponse {
                    user_details: UserProfile::new("Ann", "a@x.com"),
                }),
            )
            .unwrap();
        assert_eq!(notice.message, "Login Successful!");
        assert!(store.is_logged_in());
        assert_eq!(store.screen_set(), ScreenSet::Authenticated);
    }
}
