//! End-to-end checkout scenarios against the public API.

use chrono::{Duration, NaiveDate};
use shopline_core::product::today;
use shopline_core::{
    Cart, CheckoutConfig, CheckoutError, CheckoutService, CheckoutStage, Customer, MemorySink,
    Money, NoticeSink, Product, ProductRef, ShipmentGrouping, ValidationError,
};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn service() -> CheckoutService<MemorySink> {
    CheckoutService::new(&CheckoutConfig::default(), MemorySink::new())
}

fn tv(stock: i64) -> ProductRef {
    ProductRef::new(Product::shippable("TV", Money::from_major(150), stock, 1.0).unwrap())
}

fn cheese(stock: i64, expires_on: NaiveDate) -> ProductRef {
    ProductRef::new(
        Product::perishable_shippable("Cheese", Money::from_major(100), stock, expires_on, 0.4)
            .unwrap(),
    )
}

fn biscuits(stock: i64, expires_on: NaiveDate) -> ProductRef {
    ProductRef::new(
        Product::perishable_shippable("Biscuits", Money::from_major(150), stock, expires_on, 0.7)
            .unwrap(),
    )
}

fn scratch_card(stock: i64) -> ProductRef {
    ProductRef::new(Product::standard("Mobile Scratch Card", Money::from_major(50), stock).unwrap())
}

/// Everything a checkout may change.
#[derive(Debug, PartialEq)]
struct World {
    cart: Vec<(Uuid, i64)>,
    balance: Money,
    stock: Vec<i64>,
}

fn world(cart: &Cart, customer: &Customer, products: &[&ProductRef]) -> World {
    World {
        cart: cart
            .items()
            .iter()
            .map(|i| (i.product().id(), i.quantity()))
            .collect(),
        balance: customer.balance(),
        stock: products.iter().map(|p| p.quantity()).collect(),
    }
}

#[test]
fn scenario_a_shippable_goods_are_priced_and_committed() {
    let tv = tv(5);
    let mut customer = Customer::new("John Doe", Money::from_major(1000)).unwrap();
    let mut cart = Cart::new();
    cart.add(&tv, 2).unwrap();

    let mut checkout = service();
    let receipt = checkout.checkout(&mut customer, &mut cart).unwrap();

    assert_eq!(receipt.subtotal, Money::from_major(300));
    assert_eq!(receipt.shipping_fee, Money::from_major(60));
    assert_eq!(receipt.total, Money::from_major(360));
    assert_eq!(receipt.balance_after, Money::from_major(640));
    assert_eq!(customer.balance(), Money::from_major(640));
    assert_eq!(tv.quantity(), 3);
    assert!(cart.is_empty());

    assert_eq!(
        checkout.sink().lines(),
        [
            "** Shipment notice **",
            "2x TV 1000g",
            "Total package weight 2.0kg",
            "** Checkout receipt **",
            "2x TV 300",
            "----------------------",
            "Subtotal 300",
            "Shipping 60",
            "Amount 360",
        ]
    );
}

#[test]
fn scenario_b_expired_product_never_reaches_the_cart() {
    let yesterday = today() - Duration::days(1);
    let cheese = cheese(10, yesterday);
    let mut cart = Cart::new();

    let err = cart.add(&cheese, 1).unwrap_err();

    assert_eq!(
        err,
        ValidationError::Expired {
            product: "Cheese".to_string()
        }
    );
    assert!(cart.is_empty());
    assert!(!cheese.is_in_stock());
}

#[test]
fn scenario_c_buying_all_remaining_stock() {
    let tv = tv(5);
    let mut customer = Customer::new("John Doe", Money::from_major(1000)).unwrap();
    let mut cart = Cart::new();
    cart.add(&tv, 5).unwrap();

    let receipt = service().checkout(&mut customer, &mut cart).unwrap();

    assert_eq!(receipt.total, Money::from_major(750 + 150));
    assert_eq!(tv.quantity(), 0);
    assert!(!tv.is_in_stock());
    assert!(cart.is_empty());
}

#[test]
fn scenario_d_insufficient_funds_changes_nothing() {
    let tv = tv(5);
    let card = scratch_card(20);
    let mut customer = Customer::new("John Doe", Money::from_major(359)).unwrap();
    let mut cart = Cart::new();
    cart.add(&tv, 2).unwrap();
    cart.add(&card, 1).unwrap();

    let before = world(&cart, &customer, &[&tv, &card]);
    let mut checkout = service();
    let err = checkout.checkout(&mut customer, &mut cart).unwrap_err();

    assert_eq!(
        err,
        CheckoutError::InsufficientBalance {
            balance: Money::from_major(359),
            total: Money::from_major(410),
        }
    );
    assert_eq!(err.stage(), CheckoutStage::FundsCheck);
    assert_eq!(world(&cart, &customer, &[&tv, &card]), before);
    assert!(checkout.sink().lines().is_empty());
}

#[test]
fn scenario_e_empty_cart_is_rejected_first() {
    let mut customer = Customer::new("John Doe", Money::zero()).unwrap();
    let mut cart = Cart::new();
    let mut checkout = service();

    let err = checkout.checkout(&mut customer, &mut cart).unwrap_err();

    assert_eq!(err, CheckoutError::EmptyCart);
    assert_eq!(err.stage(), CheckoutStage::EmptyCheck);
    assert!(checkout.sink().lines().is_empty());
    assert!(customer.balance().is_zero());
}

#[test]
fn exact_balance_is_enough() {
    let tv = tv(5);
    let mut customer = Customer::new("John Doe", Money::from_major(360)).unwrap();
    let mut cart = Cart::new();
    cart.add(&tv, 2).unwrap();

    service().checkout(&mut customer, &mut cart).unwrap();
    assert!(customer.balance().is_zero());
}

#[test]
fn stock_sold_elsewhere_blocks_checkout_without_changes() {
    let tv = tv(5);
    let card = scratch_card(20);
    let mut customer = Customer::new("John Doe", Money::from_major(1000)).unwrap();
    let mut cart = Cart::new();
    cart.add(&card, 3).unwrap();
    cart.add(&tv, 4).unwrap();

    // another sale takes most of the TVs before this customer checks out
    tv.borrow_mut().reduce_quantity(3).unwrap();

    let before = world(&cart, &customer, &[&tv, &card]);
    let err = service().checkout(&mut customer, &mut cart).unwrap_err();

    assert!(matches!(err, CheckoutError::InsufficientStock { .. }));
    assert_eq!(world(&cart, &customer, &[&tv, &card]), before);
}

#[test]
fn groceries_demo_output_matches_receipt_format() {
    let expires = date(2030, 1, 1);
    let today = date(2029, 12, 1);
    let cheese = cheese(10, expires);
    let biscuits = biscuits(5, expires);
    let mut customer = Customer::new("John Doe", Money::from_major(1000)).unwrap();
    let mut cart = Cart::new();
    cart.add_on(&cheese, 2, today).unwrap();
    cart.add_on(&biscuits, 1, today).unwrap();

    let mut checkout = service();
    let receipt = checkout.checkout_on(&mut customer, &mut cart, today).unwrap();

    assert_eq!(
        checkout.sink().lines(),
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
    assert_eq!(customer.balance(), Money::from_major(605));
    assert_eq!(receipt.customer, "John Doe");
    assert_eq!((cheese.quantity(), biscuits.quantity()), (8, 4));
}

#[test]
fn receipt_without_shippables_has_no_notice() {
    let card = scratch_card(20);
    let mut customer = Customer::new("John Doe", Money::from_major(100)).unwrap();
    let mut cart = Cart::new();
    cart.add(&card, 2).unwrap();

    let mut checkout = service();
    checkout.checkout(&mut customer, &mut cart).unwrap();

    let lines = checkout.into_sink().take();
    assert_eq!(lines[0], "** Checkout receipt **");
    assert!(lines.iter().any(|l| l == "Shipping 0"));
    assert_eq!(card.quantity(), 18);
}

#[test]
fn same_name_products_group_by_configured_key() {
    let expires = date(2030, 1, 1);
    let today = date(2029, 12, 1);
    let cases = [(ShipmentGrouping::ByName, 1), (ShipmentGrouping::ByProduct, 2)];

    for (grouping, expected_groups) in cases {
        let first = cheese(10, expires);
        let second = cheese(10, expires);
        let mut customer = Customer::new("John Doe", Money::from_major(1000)).unwrap();
        let mut cart = Cart::new();
        cart.add_on(&first, 1, today).unwrap();
        cart.add_on(&second, 1, today).unwrap();
        assert_eq!(cart.item_count(), 2);

        let config = CheckoutConfig {
            shipment_grouping: grouping,
            ..CheckoutConfig::default()
        };
        let mut checkout = CheckoutService::new(&config, MemorySink::new());
        checkout.checkout_on(&mut customer, &mut cart, today).unwrap();

        let groups = checkout
            .sink()
            .lines()
            .iter()
            .filter(|l| l.ends_with("x Cheese 400g"))
            .count();
        assert_eq!(groups, expected_groups, "grouping {}", grouping);
    }
}

#[test]
fn second_checkout_with_emptied_cart_fails() {
    let tv = tv(5);
    let mut customer = Customer::new("John Doe", Money::from_major(1000)).unwrap();
    let mut cart = Cart::new();
    cart.add(&tv, 1).unwrap();

    let mut checkout = service();
    checkout.checkout(&mut customer, &mut cart).unwrap();

    assert_eq!(
        checkout.checkout(&mut customer, &mut cart).unwrap_err(),
        CheckoutError::EmptyCart
    );
}

#[test]
fn sub_half_unit_shipping_prints_as_zero() {
    let pin = ProductRef::new(Product::shippable("Pin", Money::from_major(100), 3, 0.01665).unwrap());
    let mut customer = Customer::new("John Doe", Money::from_major(1000)).unwrap();
    let mut cart = Cart::new();
    cart.add(&pin, 1).unwrap();

    let mut checkout = service();
    let receipt = checkout.checkout(&mut customer, &mut cart).unwrap();

    assert_eq!(
        &checkout.sink().lines()[checkout.sink().lines().len() - 3..],
        ["Subtotal 100", "Shipping 0", "Amount 100"]
    );
    // charged to the cent
    assert_eq!(receipt.shipping_fee, Money::from_cents(50));
    assert_eq!(customer.balance(), Money::from_cents(899_50));
}

/// Sells the watched product's whole stock while the receipt is printing.
struct SellOutWhilePrinting {
    watched: ProductRef,
    lines: Vec<String>,
}

impl NoticeSink for SellOutWhilePrinting {
    fn emit_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
        if line.starts_with("Amount") {
            self.watched.borrow_mut().set_quantity(0).unwrap();
        }
    }
}

#[test]
fn stock_lost_during_commit_fails_without_rollback() {
    let tv = tv(5);
    let mut customer = Customer::new("John Doe", Money::from_major(1000)).unwrap();
    let mut cart = Cart::new();
    cart.add(&tv, 2).unwrap();

    let sink = SellOutWhilePrinting {
        watched: tv.clone(),
        lines: Vec::new(),
    };
    let mut checkout = CheckoutService::new(&CheckoutConfig::default(), sink);
    let err = checkout.checkout(&mut customer, &mut cart).unwrap_err();

    assert_eq!(
        err,
        CheckoutError::CommitFailed(ValidationError::ExceedsStock {
            product: "TV".to_string(),
            available: 0,
            requested: 2,
        })
    );
    assert_eq!(err.stage(), CheckoutStage::Commit);

    // notice and receipt already went out
    let lines = &checkout.sink().lines;
    assert_eq!(lines.first().map(String::as_str), Some("** Shipment notice **"));
    assert_eq!(lines.last().map(String::as_str), Some("Amount 360"));

    // the deduction is kept, the rest never happened
    assert_eq!(customer.balance(), Money::from_major(640));
    assert_eq!(tv.quantity(), 0);
    assert_eq!(cart.item_count(), 1);
}
