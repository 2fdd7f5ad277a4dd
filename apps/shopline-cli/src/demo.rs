//! # Demo Scenarios
//!
//! Two fixed checkouts against a small catalog:
//!
//! ```text
//! groceries: 2x Cheese (perishable, 0.4kg) + 1x Biscuits (perishable, 0.7kg)
//! mixed:     2x Cheese + 3x TV (1.0kg) + 1x Mobile Scratch Card
//! ```
//!
//! Both use customer "John Doe" with an opening balance of 1000.00.
//! Expiry dates are relative to the day the scenario runs, so the
//! perishables are always fresh.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use shopline_core::{
    Cart, Catalog, CheckoutConfig, CheckoutService, Customer, Money, NewProduct, NoticeSink,
    ProductKind, Receipt,
};
use tracing::{debug, info};

pub const CUSTOMER_NAME: &str = "John Doe";
pub const OPENING_BALANCE: Money = Money::from_major(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Groceries,
    Mixed,
}

impl Scenario {
    /// Product names and quantities put in the cart, in order.
    pub fn order(&self) -> &'static [(&'static str, i64)] {
        match self {
            Scenario::Groceries => &[("Cheese", 2), ("Biscuits", 1)],
            Scenario::Mixed => &[("Cheese", 2), ("TV", 3), ("Mobile Scratch Card", 1)],
        }
    }
}

impl FromStr for Scenario {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "groceries" => Ok(Scenario::Groceries),
            "mixed" => Ok(Scenario::Mixed),
            other => Err(anyhow!(
                "unknown scenario '{}', expected 'groceries' or 'mixed'",
                other
            )),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::Groceries => f.write_str("groceries"),
            Scenario::Mixed => f.write_str("mixed"),
        }
    }
}

/// What a completed scenario leaves behind.
#[derive(Debug, Serialize)]
pub struct Outcome {
    pub scenario: Scenario,
    pub receipt: Receipt,
    pub customer_balance: Money,
    /// Stock left per catalog product, in catalog order.
    pub remaining_stock: Vec<(String, i64)>,
}

impl Outcome {
    /// Closing line printed after the receipt. Only the groceries run
    /// reports the remaining balance.
    pub fn balance_line(&self) -> Option<String> {
        match self.scenario {
            Scenario::Groceries => Some(format!(
                "Customer balance after payment: {}",
                self.customer_balance
            )),
            Scenario::Mixed => None,
        }
    }
}

/// The demo catalog, with perishables expiring relative to `today`.
pub fn demo_catalog(today: NaiveDate) -> Result<Catalog> {
    let catalog = Catalog::from_products([
        NewProduct {
            name: "Cheese".to_string(),
            price: Money::from_major(100),
            quantity: 10,
            kind: ProductKind::PerishableShippable,
            expires_on: Some(today + Duration::days(7)),
            weight_kg: Some(0.4),
        },
        NewProduct {
            name: "Biscuits".to_string(),
            price: Money::from_major(150),
            quantity: 5,
            kind: ProductKind::PerishableShippable,
            expires_on: Some(today + Duration::days(30)),
            weight_kg: Some(0.7),
        },
        NewProduct {
            name: "TV".to_string(),
            price: Money::from_major(150),
            quantity: 5,
            kind: ProductKind::Shippable,
            expires_on: None,
            weight_kg: Some(1.0),
        },
        NewProduct {
            name: "Mobile Scratch Card".to_string(),
            price: Money::from_major(50),
            quantity: 20,
            kind: ProductKind::Standard,
            expires_on: None,
            weight_kg: None,
        },
    ])?;
    Ok(catalog)
}

/// Runs `scenario` as of `today`, emitting notice and receipt to `sink`.
pub fn run_scenario<S: NoticeSink>(
    scenario: Scenario,
    config: &CheckoutConfig,
    sink: S,
    today: NaiveDate,
) -> Result<Outcome> {
    info!(%scenario, store = %config.store_name, "running demo scenario");

    let catalog = demo_catalog(today)?;
    let mut customer = Customer::new(CUSTOMER_NAME, OPENING_BALANCE)?;
    let mut cart = Cart::new();

    for &(name, quantity) in scenario.order() {
        let product = catalog.get(name)?;
        cart.add_on(&product, quantity, today)?;
        debug!(product = name, quantity, "added to cart");
    }

    let mut checkout = CheckoutService::new(config, sink);
    let receipt = checkout.checkout_on(&mut customer, &mut cart, today)?;

    let remaining_stock = catalog
        .products()
        .iter()
        .map(|p| (p.name(), p.quantity()))
        .collect();

    Ok(Outcome {
        scenario,
        receipt,
        customer_balance: customer.balance(),
        remaining_stock,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopline_core::MemorySink;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 6, 1).unwrap()
    }

    fn run(scenario: Scenario) -> (Outcome, Vec<String>) {
        let mut sink = MemorySink::new();
        let outcome = run_scenario(scenario, &CheckoutConfig::default(), &mut sink, today()).unwrap();
        (outcome, sink.take())
    }

    #[test]
    fn test_groceries_output() {
        let (outcome, lines) = run(Scenario::Groceries);

        assert_eq!(
            lines,
            [
                "** Shipment notice **",
                "2x Cheese 400g",
                "1x Biscuits 700g",
                "Total package weight 1.5kg",
                "** Checkout receipt **",
                "2x Cheese 200",
                "1x Biscuits 150",
                "----------------------",
                "Subtotal 350",
                "Shipping 45",
                "Amount 395",
            ]
        );
        assert_eq!(outcome.customer_balance, Money::from_major(605));
        assert_eq!(
            outcome.balance_line().as_deref(),
            Some("Customer balance after payment: $605.00")
        );
    }

    #[test]
    fn test_mixed_output() {
        let (outcome, lines) = run(Scenario::Mixed);

        assert_eq!(
            &lines[..5],
            [
                "** Shipment notice **",
                "2x Cheese 400g",
                "3x TV 1000g",
                "Total package weight 3.8kg",
                "** Checkout receipt **",
            ]
        );
        assert!(lines.contains(&"1x Mobile Scratch Card 50".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("Amount 814"));
        assert_eq!(outcome.receipt.total, Money::from_major(814));
        assert_eq!(outcome.customer_balance, Money::from_major(186));
        assert_eq!(outcome.balance_line(), None);
        assert_eq!(
            outcome.remaining_stock,
            [
                ("Cheese".to_string(), 8),
                ("Biscuits".to_string(), 5),
                ("TV".to_string(), 2),
                ("Mobile Scratch Card".to_string(), 19),
            ]
        );
    }

    #[test]
    fn test_outcome_serializes() {
        let (outcome, _) = run(Scenario::Groceries);
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["scenario"], "groceries");
        assert_eq!(json["receipt"]["customer"], CUSTOMER_NAME);
    }

    #[test]
    fn test_scenario_from_str() {
        assert_eq!("mixed".parse::<Scenario>().unwrap(), Scenario::Mixed);
        assert!("pets".parse::<Scenario>().is_err());
    }
}
