//! # Cart
//!
//! The customer's shopping cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller                   Cart method             State change          │
//! │  ──────                   ───────────             ────────────          │
//! │                                                                         │
//! │  Pick product ──────────► add() ─────────┬──────► items.push(item)     │
//! │                                          └──────► item.quantity += n   │
//! │                                                   (same product)        │
//! │                                                                         │
//! │  Drop product ──────────► remove_product() ─────► items.retain(..)     │
//! │                                                                         │
//! │  Checkout commit ───────► clear() ──────────────► items.clear()        │
//! │                                                                         │
//! │  Display ───────────────► items() / subtotal() ─► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::product::{today, ProductRef};
use crate::validation::validate_quantity;

/// A line in the cart.
///
/// The cart shares the product with the catalog rather than freezing a copy:
/// checkout prices from, and reduces, the live product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    product: ProductRef,
    quantity: i64,
}

impl CartItem {
    pub fn product(&self) -> &ProductRef {
        &self.product
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.borrow().price().multiply_quantity(self.quantity)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by product identity (adding the same product again
///   increases its quantity)
/// - Every quantity is > 0
/// - No quantity exceeded its product's stock at the time it was added
/// - Items keep insertion order, which is also receipt order
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds `quantity` units of `product`, merging with an existing line.
    ///
    /// ## Errors
    /// - `quantity` ≤ 0
    /// - product out of stock or expired
    /// - `quantity` (or the merged quantity) exceeds current stock
    /// - the cart subtotal would overflow
    ///
    /// On error the cart is unchanged.
    pub fn add(&mut self, product: &ProductRef, quantity: i64) -> ValidationResult<()> {
        self.add_on(product, quantity, today())
    }

    /// [`Cart::add`] with freshness evaluated at `today`.
    pub fn add_on(
        &mut self,
        product: &ProductRef,
        quantity: i64,
        today: NaiveDate,
    ) -> ValidationResult<()> {
        validate_quantity(quantity)?;

        let p = product.borrow();
        if p.quantity() == 0 {
            return Err(ValidationError::OutOfStock {
                product: p.name().to_string(),
            });
        }
        if p.is_expired_on(today) {
            return Err(ValidationError::Expired {
                product: p.name().to_string(),
            });
        }
        if quantity > p.quantity() {
            return Err(ValidationError::ExceedsStock {
                product: p.name().to_string(),
                available: p.quantity(),
                requested: quantity,
            });
        }

        let position = self.items.iter().position(|i| i.product == *product);
        let merged = match position {
            Some(index) => self.items[index].quantity.saturating_add(quantity),
            None => quantity,
        };
        if merged > p.quantity() {
            return Err(ValidationError::ExceedsStock {
                product: p.name().to_string(),
                available: p.quantity(),
                requested: merged,
            });
        }

        // the subtotal must stay representable
        let rest: Money = self
            .items
            .iter()
            .filter(|i| i.product != *product)
            .map(CartItem::line_total)
            .sum();
        p.price()
            .checked_multiply_quantity(merged)
            .and_then(|line| line.checked_add(rest))
            .ok_or_else(|| ValidationError::overflow("cart subtotal"))?;

        match position {
            Some(index) => self.items[index].quantity = merged,
            None => self.items.push(CartItem {
                product: product.clone(),
                quantity,
            }),
        }
        Ok(())
    }

    /// Removes every line for `product`. No-op if it is not in the cart.
    pub fn remove_product(&mut self, product: &ProductRef) {
        self.items.retain(|i| i.product != *product);
    }

    /// Snapshot of the cart lines.
    ///
    /// Changing the returned vector does not change the cart.
    pub fn items(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Σ price × quantity over all lines.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Empties the cart. Only a committed checkout does this.
    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}
