//! # Cart Ledger
//!
//! Owns the cart line items and their aggregate total.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  Screen Action            Store Action            Ledger Change         │
//! │  ─────────────            ────────────            ─────────────         │
//! │                                                                         │
//! │  Tap "+" on card ────────► add_item() ──────────► qty += 1 / push line │
//! │                                                                         │
//! │  Tap "-" in cart ────────► remove_item() ───────► qty -= 1 / drop line │
//! │                                                                         │
//! │  Logout / order done ────► clear_cart() ────────► lines.clear()        │
//! │                                                                         │
//! │  Every mutation ends with calculate_total(): total = Σ price × qty     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use brewcart_core::validation::{check_cart_capacity, check_line_quantity, check_unit_price};
use brewcart_core::{CoreResult, Money, Product};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One product in the cart.
///
/// ## Design Notes
/// Title, subtitle, image and unit price are frozen copies taken when the
/// product was first added, so the cart renders consistently after a catalog
/// re-fetch replaces or drops the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub title: String,
    pub subtitle: String,
    pub image: String,

    /// Price in cents at time of adding (frozen)
    #[serde(rename = "unitPriceCents")]
    pub unit_price: Money,

    /// Always >= 1; a line that would drop to 0 is removed instead.
    pub quantity: i64,

    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn from_product(product: &Product, price_at_add: Money) -> Self {
        CartLine {
            product_id: product.id.clone(),
            title: product.title.clone(),
            subtitle: product.subtitle.clone(),
            image: product.image.clone(),
            unit_price: price_at_add,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` and kept in insertion order
/// - Every line has quantity >= 1
/// - `total` equals Σ `line_total()`; each mutation recomputes it before
///   returning
#[derive(Debug, Clone)]
pub struct CartLedger {
    lines: Vec<CartLine>,
    total: Money,
    created_at: DateTime<Utc>,
}

impl CartLedger {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        CartLedger {
            lines: Vec::new(),
            total: Money::zero(),
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1, captured price kept
    /// - Product not in cart: new line with quantity 1 at `price_at_add`
    ///
    /// A rejected add (cap reached, price out of range) leaves the ledger
    /// untouched.
    ///
    /// ## Returns
    /// The line as it stands after the add.
    pub fn add_item(&mut self, product: &Product, price_at_add: Money) -> CoreResult<&CartLine> {
        let index = match self.position(&product.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                check_line_quantity(line.quantity + 1)?;
                line.quantity += 1;
                index
            }
            None => {
                check_unit_price(price_at_add)?;
                check_cart_capacity(self.lines.len())?;
                self.lines.push(CartLine::from_product(product, price_at_add));
                self.lines.len() - 1
            }
        };

        self.calculate_total();
        Ok(&self.lines[index])
    }

    /// Removes one unit of a product; the line disappears at quantity 0.
    ///
    /// ## Returns
    /// `false` when the product has no line (nothing changed).
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let Some(index) = self.position(product_id) else {
            return false;
        };

        if self.lines[index].quantity > 1 {
            self.lines[index].quantity -= 1;
        } else {
            self.lines.remove(index);
        }

        self.calculate_total();
        true
    }

    /// Recomputes `total` from the lines and returns it.
    pub fn calculate_total(&mut self) -> Money {
        self.total = self.lines.iter().map(CartLine::line_total).sum();
        self.total
    }

    /// Total as of the last recomputation.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Clears all lines and resets the total.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.total = Money::zero();
        self.created_at = Utc::now();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }
}

impl Default for CartLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the cart published in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<CartLine>,
    #[serde(rename = "totalCents")]
    pub total: Money,
    pub item_count: usize,
    pub total_quantity: i64,
}

impl From<&CartLedger> for CartView {
    fn from(cart: &CartLedger) -> Self {
        CartView {
            lines: cart.lines.clone(),
            total: cart.total,
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewcart_core::{
        CoreError, ValidationError, MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_UNIT_PRICE_CENTS,
    };

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Coffee {}", id),
            subtitle: "Medium roast".to_string(),
            image: format!("{}.png", id),
            price: Money::from_cents(price_cents),
            kind: None,
            description: None,
        }
    }

    fn add(cart: &mut CartLedger, product: &Product) {
        cart.add_item(product, product.price).unwrap();
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = CartLedger::new();
        let product = test_product("1", 450);

        let line = cart.add_item(&product, product.price).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.title, "Coffee 1");

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total().cents(), 450);
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = CartLedger::new();
        let product = test_product("1", 450);

        add(&mut cart, &product);
        add(&mut cart, &product);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.line("1").unwrap().quantity, 2);
        assert_eq!(cart.total().cents(), 900);
    }

    #[test]
    fn test_cart_keeps_insertion_order() {
        let mut cart = CartLedger::new();
        for id in ["b", "a", "c"] {
            add(&mut cart, &test_product(id, 100));
        }
        add(&mut cart, &test_product("a", 100));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_cart_price_frozen_at_first_add() {
        let mut cart = CartLedger::new();
        let product = test_product("1", 450);

        cart.add_item(&product, Money::from_cents(450)).unwrap();
        cart.add_item(&product, Money::from_cents(999)).unwrap();

        let line = cart.line("1").unwrap();
        assert_eq!(line.unit_price.cents(), 450);
        assert_eq!(cart.total().cents(), 900);
    }

    #[test]
    fn test_cart_remove_decrements_then_drops() {
        let mut cart = CartLedger::new();
        let latte = test_product("latte", 450);
        let mocha = test_product("mocha", 320);
        add(&mut cart, &latte);
        add(&mut cart, &latte);
        add(&mut cart, &mocha);
        assert_eq!(cart.total().cents(), 1220);

        assert!(cart.remove_item("latte"));
        assert_eq!(cart.line("latte").unwrap().quantity, 1);
        assert_eq!(cart.total().cents(), 770);

        assert!(cart.remove_item("latte"));
        assert!(cart.line("latte").is_none());
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total().cents(), 320);
    }

    #[test]
    fn test_cart_remove_absent_is_noop() {
        let mut cart = CartLedger::new();
        add(&mut cart, &test_product("1", 450));

        assert!(!cart.remove_item("missing"));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total().cents(), 450);
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = CartLedger::new();
        add(&mut cart, &test_product("1", 450));
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
        assert_eq!(cart.calculate_total(), Money::zero());
    }

    #[test]
    fn test_cart_quantity_cap_leaves_ledger_untouched() {
        let mut cart = CartLedger::new();
        let product = test_product("1", 100);
        for _ in 0..MAX_ITEM_QUANTITY {
            add(&mut cart, &product);
        }

        let err = cart.add_item(&product, product.price).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        assert_eq!(cart.line("1").unwrap().quantity, MAX_ITEM_QUANTITY);
        assert_eq!(cart.total().cents(), 100 * MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_cart_capacity_cap() {
        let mut cart = CartLedger::new();
        for i in 0..MAX_CART_ITEMS {
            add(&mut cart, &test_product(&i.to_string(), 100));
        }

        let extra = test_product("extra", 100);
        let err = cart.add_item(&extra, extra.price).unwrap_err();
        assert!(matches!(err, CoreError::CartTooLarge { .. }));
        assert_eq!(cart.item_count(), MAX_CART_ITEMS);

        // Existing lines can still grow
        add(&mut cart, &test_product("0", 100));
        assert_eq!(cart.line("0").unwrap().quantity, 2);
    }

    #[test]
    fn test_cart_view() {
        let mut cart = CartLedger::new();
        let latte = test_product("latte", 450);
        add(&mut cart, &latte);
        add(&mut cart, &latte);
        add(&mut cart, &test_product("mocha", 320));

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.total_quantity, 3);
        assert_eq!(view.total.cents(), 1220);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["totalCents"], 1220);
        assert_eq!(json["lines"][0]["unitPriceCents"], 450);
        assert_eq!(json["lines"][0]["productId"], "latte");
    }

    #[test]
    fn test_cart_rejects_out_of_range_price() {
        let mut cart = CartLedger::new();
        add(&mut cart, &test_product("latte", 450));

        let gold = test_product("gold", 5_000_000_000_000_000_000);
        let err = cart.add_item(&gold, gold.price).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert!(cart.line("gold").is_none());
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total().cents(), 450);

        let err = cart.add_item(&gold, Money::from_cents(-1)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Negative { .. })
        ));
        assert_eq!(cart.total().cents(), 450);
    }

    #[test]
    fn test_cart_total_at_every_limit_fits() {
        let mut cart = CartLedger::new();
        for i in 0..MAX_CART_ITEMS {
            let product = test_product(&i.to_string(), MAX_UNIT_PRICE_CENTS);
            for _ in 0..MAX_ITEM_QUANTITY {
                add(&mut cart, &product);
            }
        }

        let expected = MAX_UNIT_PRICE_CENTS * MAX_ITEM_QUANTITY * MAX_CART_ITEMS as i64;
        assert_eq!(cart.total().cents(), expected);
        assert_eq!(cart.calculate_total().cents(), expected);
    }
}
