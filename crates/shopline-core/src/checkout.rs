//! # Checkout
//!
//! Turns a cart into a committed sale in one all-or-nothing call.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CheckoutService::checkout                            │
//! │                                                                         │
//! │  1. EmptyCheck ───── cart has items?              ──► EmptyCart         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  2. Revalidation ─── each line still in stock,    ──► OutOfStock /      │
//! │         │            fresh, quantity ≤ stock?         Expired /         │
//! │         ▼                                             InsufficientStock │
//! │  3. Pricing ──────── subtotal + shipping = total  ──► TotalOverflow     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  4. FundsCheck ───── balance ≥ total?             ──► InsufficientBalance│
//! │         │                                                               │
//! │  ═══════╪═══════════ nothing has changed up to here ═══════════════════ │
//! │         ▼                                                               │
//! │  5. Commit ───────── shipment notice → receipt → deduct balance         │
//! │                      → reduce stock → clear cart                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stage 5 steps are not rolled back if one fails. Given stages 1–4 they
//! cannot fail unless stock or balance is changed from outside between the
//! checks and the commit; that case surfaces as
//! [`CheckoutError::CommitFailed`].

use std::fmt;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cart::Cart;
use crate::config::CheckoutConfig;
use crate::customer::Customer;
use crate::error::{CheckoutError, CheckoutResult, ValidationResult};
use crate::money::Money;
use crate::product::{today, ShippableUnit};
use crate::receipt::{Receipt, ReceiptLine};
use crate::shipping::ShippingCalculator;
use crate::sink::{emit_block, NoticeSink};

/// The five ordered checkout stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    EmptyCheck,
    Revalidation,
    Pricing,
    FundsCheck,
    Commit,
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckoutStage::EmptyCheck => "empty_check",
            CheckoutStage::Revalidation => "revalidation",
            CheckoutStage::Pricing => "pricing",
            CheckoutStage::FundsCheck => "funds_check",
            CheckoutStage::Commit => "commit",
        };
        f.write_str(s)
    }
}

/// A priced, validated cart (output of stages 1–3).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub subtotal: Money,
    pub shipping_fee: Money,
    /// Shipping fee in currency units before rounding to the cent.
    pub exact_shipping_fee: f64,
    pub total: Money,
    /// One entry per physical unit that ships.
    pub units: Vec<ShippableUnit>,
}

/// Runs checkouts and writes their notices and receipts to a sink.
#[derive(Debug)]
pub struct CheckoutService<S: NoticeSink> {
    shipping: ShippingCalculator,
    store_name: String,
    sink: S,
}

impl<S: NoticeSink> CheckoutService<S> {
    pub fn new(config: &CheckoutConfig, sink: S) -> Self {
        CheckoutService {
            shipping: ShippingCalculator::new(config.shipping_rate_per_kg)
                .with_grouping(config.shipment_grouping),
            store_name: config.store_name.clone(),
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Runs stages 1–3 without changing anything.
    pub fn quote(&self, cart: &Cart) -> CheckoutResult<Quote> {
        self.quote_on(cart, today())
    }

    /// [`CheckoutService::quote`] with freshness evaluated at `today`.
    pub fn quote_on(&self, cart: &Cart, today: NaiveDate) -> CheckoutResult<Quote> {
        ensure_not_empty(cart)?;
        revalidate(cart, today)?;
        self.price(cart)
    }

    /// Checks out `cart` for `customer`.
    ///
    /// On success the notice and receipt have been emitted, the total is
    /// deducted from the customer, stock is reduced and the cart is empty.
    /// On any error other than [`CheckoutError::CommitFailed`], nothing
    /// has changed.
    pub fn checkout(&mut self, customer: &mut Customer, cart: &mut Cart) -> CheckoutResult<Receipt> {
        self.checkout_on(customer, cart, today())
    }

    /// [`CheckoutService::checkout`] with freshness evaluated at `today`.
    pub fn checkout_on(
        &mut self,
        customer: &mut Customer,
        cart: &mut Cart,
        today: NaiveDate,
    ) -> CheckoutResult<Receipt> {
        debug!(
            customer = %customer.name(),
            items = cart.item_count(),
            "checkout started"
        );

        let quote = match self
            .quote_on(cart, today)
            .and_then(|quote| ensure_funds(customer, &quote).map(|_| quote))
        {
            Ok(quote) => quote,
            Err(err) => {
                warn!(customer = %customer.name(), stage = %err.stage(), error = %err, "checkout rejected");
                return Err(err);
            }
        };

        self.commit(customer, cart, quote)
    }

    fn price(&self, cart: &Cart) -> CheckoutResult<Quote> {
        let subtotal = cart.subtotal();

        let mut units = Vec::new();
        for item in cart.iter() {
            if let Some(unit) = item.product().borrow().shippable_unit() {
                units.extend(std::iter::repeat(unit).take(item.quantity() as usize));
            }
        }

        let shipping_fee = self.shipping.calculate_fee(&units);
        let exact_shipping_fee = self.shipping.exact_fee(&units);
        let total = subtotal
            .checked_add(shipping_fee)
            .ok_or(CheckoutError::TotalOverflow)?;

        debug!(
            stage = %CheckoutStage::Pricing,
            %subtotal,
            %shipping_fee,
            %total,
            shippable_units = units.len(),
            "cart priced"
        );

        Ok(Quote {
            subtotal,
            shipping_fee,
            exact_shipping_fee,
            total,
            units,
        })
    }

    fn commit(&mut self, customer: &mut Customer, cart: &mut Cart, quote: Quote) -> CheckoutResult<Receipt> {
        debug!(stage = %CheckoutStage::Commit, "committing checkout");

        self.shipping.report_shipment(&quote.units, &mut self.sink);

        let lines = cart
            .iter()
            .map(|item| ReceiptLine {
                quantity: item.quantity(),
                name: item.product().name(),
                line_total: item.line_total(),
            })
            .collect();
        let receipt = Receipt {
            id: Uuid::new_v4(),
            issued_at: Utc::now(),
            store_name: self.store_name.clone(),
            customer: customer.name().to_string(),
            lines,
            subtotal: quote.subtotal,
            shipping_fee: quote.shipping_fee,
            exact_shipping_fee: quote.exact_shipping_fee,
            total: quote.total,
            balance_after: customer.balance() - quote.total,
        };
        emit_block(&mut self.sink, &receipt);

        if let Err(err) = apply_commit(customer, cart, quote.total) {
            let err = CheckoutError::CommitFailed(err);
            warn!(
                receipt_id = %receipt.id,
                customer = %receipt.customer,
                stage = %err.stage(),
                error = %err,
                "checkout commit failed, applied steps are kept"
            );
            return Err(err);
        }

        info!(
            receipt_id = %receipt.id,
            customer = %receipt.customer,
            total = %receipt.total,
            balance_after = %receipt.balance_after,
            "checkout committed"
        );

        Ok(receipt)
    }
}

fn ensure_not_empty(cart: &Cart) -> CheckoutResult<()> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    Ok(())
}

/// Stock and freshness may have changed since each line was added.
fn revalidate(cart: &Cart, today: NaiveDate) -> CheckoutResult<()> {
    for item in cart.iter() {
        let product = item.product().borrow();

        if product.quantity() == 0 {
            return Err(CheckoutError::OutOfStock {
                product: product.name().to_string(),
            });
        }
        if product.is_expired_on(today) {
            return Err(CheckoutError::Expired {
                product: product.name().to_string(),
            });
        }
        if item.quantity() > product.quantity() {
            return Err(CheckoutError::InsufficientStock {
                product: product.name().to_string(),
                available: product.quantity(),
                requested: item.quantity(),
            });
        }
    }
    Ok(())
}

/// Stage 5 state changes, in order. Stops at the first failure.
fn apply_commit(customer: &mut Customer, cart: &mut Cart, total: Money) -> ValidationResult<()> {
    customer.deduct(total)?;
    for item in cart.iter() {
        item.product()
            .borrow_mut()
            .reduce_quantity(item.quantity())?;
    }
    cart.clear();
    Ok(())
}

fn ensure_funds(customer: &Customer, quote: &Quote) -> CheckoutResult<()> {
    if customer.balance() < quote.total {
        return Err(CheckoutError::InsufficientBalance {
            balance: customer.balance(),
            total: quote.total,
        });
    }
    Ok(())
}
