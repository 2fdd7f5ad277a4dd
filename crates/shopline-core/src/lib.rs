//! # shopline-core: Pure Checkout Logic for Shopline
//!
//! This crate is the heart of Shopline. It models a point-of-sale checkout:
//! a customer fills a cart, and one checkout call validates stock and
//! freshness, prices goods and shipping, checks funds and commits.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopline Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    shopline-cli (demo runner)                    │   │
//! │  │     builds catalog ──► fills cart ──► checkout ──► prints        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopline-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  product  │  │   cart    │  │ shipping  │  │ checkout  │  │   │
//! │  │   │  Product  │  │   Cart    │  │ Calculator│  │  Service  │  │   │
//! │  │   │ Expirable │  │ CartItem  │  │  Notice   │  │  Receipt  │  │   │
//! │  │   │ Shippable │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • output only through NoticeSink                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`product`] - Product, capability traits, shared `ProductRef`
//! - [`catalog`] - Products on sale, lookup by name
//! - [`cart`] - Cart and cart lines
//! - [`customer`] - Customer account balance
//! - [`shipping`] - Shipping fee and shipment notice
//! - [`checkout`] - The five-stage checkout pipeline
//! - [`receipt`] - Receipt and notice text blocks
//! - [`sink`] - Where emitted text goes
//! - [`money`] - Integer money
//! - [`config`] - Checkout configuration
//! - [`error`] / [`validation`] - Error types and input rules
//!
//! ## Example Usage
//!
//! ```rust
//! use shopline_core::{Cart, CheckoutConfig, CheckoutService, Customer, MemorySink, Money, Product, ProductRef};
//!
//! let tv = ProductRef::new(Product::shippable("TV", Money::from_major(150), 5, 1.0).unwrap());
//! let mut customer = Customer::new("John Doe", Money::from_major(1000)).unwrap();
//! let mut cart = Cart::new();
//! cart.add(&tv, 2).unwrap();
//!
//! let mut checkout = CheckoutService::new(&CheckoutConfig::default(), MemorySink::new());
//! let receipt = checkout.checkout(&mut customer, &mut cart).unwrap();
//!
//! assert_eq!(receipt.total, Money::from_major(360));
//! assert_eq!(customer.balance(), Money::from_major(640));
//! assert_eq!(tv.quantity(), 3);
//! assert!(cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod customer;
pub mod error;
pub mod money;
pub mod product;
pub mod receipt;
pub mod shipping;
pub mod sink;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartItem};
pub use catalog::Catalog;
pub use checkout::{CheckoutService, CheckoutStage, Quote};
pub use config::CheckoutConfig;
pub use customer::Customer;
pub use error::{CheckoutError, CheckoutResult, ConfigError, ValidationError, ValidationResult};
pub use money::Money;
pub use product::{
    Expirable, Expiry, NewProduct, Product, ProductKind, ProductRef, Shippable, ShippableUnit,
};
pub use receipt::{Receipt, ReceiptLine, ShipmentLine, ShipmentNotice};
pub use shipping::{ShipmentGrouping, ShippingCalculator, DEFAULT_SHIPPING_RATE_PER_KG};
pub use sink::{MemorySink, NoticeSink};
