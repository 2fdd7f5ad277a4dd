//! # Receipts and Shipment Notices
//!
//! The two text blocks a committed checkout emits, in this order:
//!
//! ```text
//! ** Shipment notice **          ◄── only when something ships
//! 2x Cheese 400g
//! 1x Biscuits 700g
//! Total package weight 1.5kg
//! ** Checkout receipt **
//! 2x Cheese 200
//! 1x Biscuits 150
//! ----------------------
//! Subtotal 350
//! Shipping 45
//! Amount 395
//! ```
//!
//! Money figures are whole currency units, halves rounding up. Line totals
//! and the subtotal round from exact cents ([`Money::round_to_major`]).
//! Shipping and the amount round from the unrounded `weight × rate`, not
//! from the fee charged to the cent. Weights are whole grams per unit and
//! kilograms to one decimal overall.
//! Both types are also `Serialize` for structured output.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::money::Money;

const RECEIPT_SEPARATOR: &str = "----------------------";

// =============================================================================
// Shipment Notice
// =============================================================================

/// One group of shipped units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShipmentLine {
    pub count: i64,
    pub name: String,
    pub unit_weight_grams: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipmentNotice {
    pub lines: Vec<ShipmentLine>,
    pub total_weight_kg: f64,
}

impl fmt::Display for ShipmentNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** Shipment notice **")?;
        for line in &self.lines {
            writeln!(f, "{}x {} {}g", line.count, line.name, line.unit_weight_grams)?;
        }
        // round half up to one decimal before formatting
        let total = (self.total_weight_kg * 10.0).round() / 10.0;
        write!(f, "Total package weight {:.1}kg", total)
    }
}

// =============================================================================
// Receipt
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub quantity: i64,
    pub name: String,
    pub line_total: Money,
}

/// Record of a committed checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub store_name: String,
    pub customer: String,
    pub lines: Vec<ReceiptLine>,
    pub subtotal: Money,
    pub shipping_fee: Money,
    /// Shipping fee in currency units before rounding to the cent.
    pub exact_shipping_fee: f64,
    pub total: Money,
    /// Customer balance after the total was deducted.
    pub balance_after: Money,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "** Checkout receipt **")?;
        for line in &self.lines {
            writeln!(
                f,
                "{}x {} {}",
                line.quantity,
                line.name,
                line.line_total.round_to_major()
            )?;
        }
        writeln!(f, "{}", RECEIPT_SEPARATOR)?;
        writeln!(f, "Subtotal {}", self.subtotal.round_to_major())?;
        writeln!(f, "Shipping {}", whole_units(self.exact_shipping_fee))?;
        let amount = self.subtotal.cents() as f64 / 100.0 + self.exact_shipping_fee;
        write!(f, "Amount {}", whole_units(amount))
    }
}

/// Rounds a non-negative amount to whole units, halves up.
fn whole_units(amount: f64) -> i64 {
    amount.round() as i64
}
