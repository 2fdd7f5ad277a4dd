//! # Shipping Calculator
//!
//! Prices shipping by weight and builds the shipment notice.
//!
//! ## Fee
//! ```text
//! units: [Cheese 0.4kg, Cheese 0.4kg, Biscuits 0.7kg]
//!            │
//!            ▼
//! total weight 1.5kg × rate 30.00/kg = 45.00
//! ```
//!
//! ## Notice Grouping
//! Units are grouped by product *name* by default, which merges two
//! distinct products that happen to share a name into one notice line even
//! though the cart keeps them apart. This keeps notices identical to the
//! established output. [`ShipmentGrouping::ByProduct`] groups by product
//! identity instead.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::product::Shippable;
use crate::receipt::{ShipmentLine, ShipmentNotice};
use crate::sink::{emit_block, NoticeSink};

/// Default rate: 30.00 per kilogram.
pub const DEFAULT_SHIPPING_RATE_PER_KG: Money = Money::from_major(30);

/// How shipment notices group units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentGrouping {
    #[default]
    ByName,
    ByProduct,
}

impl FromStr for ShipmentGrouping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" | "by_name" => Ok(ShipmentGrouping::ByName),
            "product" | "by_product" => Ok(ShipmentGrouping::ByProduct),
            other => Err(format!("expected 'name' or 'product', got '{}'", other)),
        }
    }
}

impl fmt::Display for ShipmentGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipmentGrouping::ByName => f.write_str("name"),
            ShipmentGrouping::ByProduct => f.write_str("product"),
        }
    }
}

#[derive(PartialEq)]
enum GroupKey<'a> {
    Name(&'a str),
    Product(Uuid),
}

struct Group<'a> {
    key: GroupKey<'a>,
    name: &'a str,
    count: i64,
    unit_weight_kg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShippingCalculator {
    rate_per_kg: Money,
    grouping: ShipmentGrouping,
}

impl Default for ShippingCalculator {
    fn default() -> Self {
        ShippingCalculator::new(DEFAULT_SHIPPING_RATE_PER_KG)
    }
}

impl ShippingCalculator {
    pub fn new(rate_per_kg: Money) -> Self {
        ShippingCalculator {
            rate_per_kg,
            grouping: ShipmentGrouping::default(),
        }
    }

    pub fn with_grouping(mut self, grouping: ShipmentGrouping) -> Self {
        self.grouping = grouping;
        self
    }

    /// Shipping fee for `units`: Σ weight × rate, zero when nothing ships.
    ///
    /// ```rust
    /// use shopline_core::{Money, ShippableUnit, ShippingCalculator};
    /// use uuid::Uuid;
    ///
    /// let calc = ShippingCalculator::default();
    /// let tv = ShippableUnit::new(Uuid::new_v4(), "TV", 1.0);
    ///
    /// assert_eq!(calc.calculate_fee(&[tv.clone(), tv]), Money::from_major(60));
    /// assert_eq!(calc.calculate_fee::<ShippableUnit>(&[]), Money::zero());
    /// ```
    pub fn calculate_fee<S: Shippable>(&self, units: &[S]) -> Money {
        if units.is_empty() {
            return Money::zero();
        }
        let total_weight_kg: f64 = units.iter().map(Shippable::weight_kg).sum();
        self.rate_per_kg.scale(total_weight_kg)
    }

    /// The fee in whole currency units as `weight × rate`, before any
    /// rounding.
    ///
    /// [`ShippingCalculator::calculate_fee`] is what gets charged. Receipt
    /// figures round from this value instead, so they are rounded only once.
    ///
    /// ```rust
    /// use shopline_core::{ShippableUnit, ShippingCalculator};
    /// use uuid::Uuid;
    ///
    /// let pin = ShippableUnit::new(Uuid::new_v4(), "Pin", 0.01665);
    /// let fee = ShippingCalculator::default().exact_fee(&[pin]);
    /// assert!(fee < 0.5);
    /// ```
    pub fn exact_fee<S: Shippable>(&self, units: &[S]) -> f64 {
        let total_weight_kg: f64 = units.iter().map(Shippable::weight_kg).sum();
        total_weight_kg * (self.rate_per_kg.cents() as f64 / 100.0)
    }

    /// Builds the shipment notice, or `None` when nothing ships.
    ///
    /// Groups appear in the order their first unit appears. A group's
    /// per-unit weight is that of the last unit seen for it.
    pub fn shipment_notice<S: Shippable>(&self, units: &[S]) -> Option<ShipmentNotice> {
        if units.is_empty() {
            return None;
        }

        let mut groups: Vec<Group<'_>> = Vec::new();
        for unit in units {
            let key = match self.grouping {
                ShipmentGrouping::ByName => GroupKey::Name(unit.name()),
                ShipmentGrouping::ByProduct => GroupKey::Product(unit.product_id()),
            };
            match groups.iter_mut().find(|g| g.key == key) {
                Some(group) => {
                    group.count += 1;
                    group.unit_weight_kg = unit.weight_kg();
                }
                None => groups.push(Group {
                    key,
                    name: unit.name(),
                    count: 1,
                    unit_weight_kg: unit.weight_kg(),
                }),
            }
        }

        let total_weight_kg = groups
            .iter()
            .map(|g| g.unit_weight_kg * g.count as f64)
            .sum();
        let lines = groups
            .into_iter()
            .map(|g| ShipmentLine {
                count: g.count,
                name: g.name.to_string(),
                unit_weight_grams: (g.unit_weight_kg * 1000.0).round() as i64,
            })
            .collect();

        Some(ShipmentNotice {
            lines,
            total_weight_kg,
        })
    }

    /// Emits the shipment notice to `sink`. No-op when nothing ships.
    pub fn report_shipment<S: Shippable>(&self, units: &[S], sink: &mut dyn NoticeSink) {
        if let Some(notice) = self.shipment_notice(units) {
            emit_block(sink, &notice);
        }
    }
}
