//! # Product Model
//!
//! Products, their optional capabilities, and the shared handle the cart
//! holds.
//!
//! ## Capabilities, Not a Class Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ProductKind                                     │
//! │                                                                         │
//! │                        Expirable?     Shippable?     Example            │
//! │  ───────────────────   ──────────     ──────────     ─────────────      │
//! │  Standard                  -              -          Scratch card       │
//! │  Shippable                 -              ✔          TV                 │
//! │  Perishable                ✔              -          Fresh bread        │
//! │  PerishableShippable       ✔              ✔          Cheese, Biscuits   │
//! │                                                                         │
//! │  Checkout never branches on the kind. It asks:                         │
//! │    product.as_expirable()    -> Option<&dyn Expirable>                 │
//! │    product.shippable_unit()  -> Option<ShippableUnit>                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Shared Ownership
//! The catalog and every cart that contains a product hold the same
//! [`ProductRef`]. Stock reduced at checkout commit is therefore visible
//! everywhere the product is referenced. Identity is the handle, not the
//! name: two products called "Cheese" are different products.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::validation::{
    validate_price, validate_product_name, validate_stock_quantity, validate_weight_kg,
};

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

// =============================================================================
// Capability Traits
// =============================================================================

/// Something with a freshness cutoff.
pub trait Expirable {
    fn expiration_date(&self) -> NaiveDate;

    /// Expired means `today` is strictly after the expiration date; a
    /// product is still sellable on the day it expires.
    fn is_expired_on(&self, today: NaiveDate) -> bool {
        today > self.expiration_date()
    }

    fn is_expired(&self) -> bool {
        self.is_expired_on(today())
    }
}

/// One physical unit that has to be shipped.
pub trait Shippable {
    /// Product identity, used when shipment reports group by product.
    fn product_id(&self) -> Uuid;

    fn name(&self) -> &str;

    /// Weight of a single unit in kilograms.
    fn weight_kg(&self) -> f64;
}

/// Expiration capability attached to a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expiry {
    expires_on: NaiveDate,
}

impl Expiry {
    pub fn new(expires_on: NaiveDate) -> Self {
        Expiry { expires_on }
    }
}

impl Expirable for Expiry {
    fn expiration_date(&self) -> NaiveDate {
        self.expires_on
    }
}

/// A shippable unit taken from a product at checkout time.
///
/// Checkout expands a cart line of quantity `n` into `n` of these, each
/// carrying the per-unit weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShippableUnit {
    product_id: Uuid,
    name: String,
    weight_kg: f64,
}

impl ShippableUnit {
    pub fn new(product_id: Uuid, name: impl Into<String>, weight_kg: f64) -> Self {
        ShippableUnit {
            product_id,
            name: name.into(),
            weight_kg,
        }
    }
}

impl Shippable for ShippableUnit {
    fn product_id(&self) -> Uuid {
        self.product_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn weight_kg(&self) -> f64 {
        self.weight_kg
    }
}

// =============================================================================
// Product Kind
// =============================================================================

/// The closed set of product variants, named by the capabilities they carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    Standard,
    Shippable,
    Perishable,
    PerishableShippable,
}

impl ProductKind {
    pub const fn is_expirable(&self) -> bool {
        matches!(self, ProductKind::Perishable | ProductKind::PerishableShippable)
    }

    pub const fn is_shippable(&self) -> bool {
        matches!(self, ProductKind::Shippable | ProductKind::PerishableShippable)
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProductKind::Standard => "standard",
            ProductKind::Shippable => "shippable",
            ProductKind::Perishable => "perishable",
            ProductKind::PerishableShippable => "perishable shippable",
        };
        f.write_str(s)
    }
}

// =============================================================================
// Product
// =============================================================================

/// Input for creating a product.
///
/// Deserializable so catalogs can be described as data:
/// ```json
/// { "name": "Cheese", "price": 10000, "quantity": 10,
///   "kind": "perishable_shippable", "expires_on": "2030-01-01", "weight_kg": 0.4 }
/// ```
/// `price` is in cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Money,
    pub quantity: i64,
    pub kind: ProductKind,
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

/// A product available for sale.
///
/// Price and stock are private: price is fixed at construction and stock
/// only moves through [`Product::reduce_quantity`] / [`Product::set_quantity`],
/// both of which refuse to go negative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    id: Uuid,
    name: String,
    price: Money,
    quantity: i64,
    kind: ProductKind,
    expiry: Option<Expiry>,
    weight_kg: Option<f64>,
}

impl Product {
    /// Creates a product after validating every field against its kind.
    ///
    /// ## Errors
    /// - empty name, negative price or negative stock
    /// - expirable kind without `expires_on`
    /// - shippable kind without `weight_kg`, or with a non-positive weight
    /// - `expires_on` / `weight_kg` given for a kind that does not use them
    pub fn new(input: NewProduct) -> ValidationResult<Self> {
        validate_product_name(&input.name)?;
        validate_price(input.price)?;
        validate_stock_quantity(input.quantity)?;

        let expiry = match (input.kind.is_expirable(), input.expires_on) {
            (true, Some(date)) => Some(Expiry::new(date)),
            (true, None) => return Err(ValidationError::required("expiration date")),
            (false, Some(_)) => return Err(not_applicable("expiration date", input.kind)),
            (false, None) => None,
        };

        let weight_kg = match (input.kind.is_shippable(), input.weight_kg) {
            (true, Some(weight)) => {
                validate_weight_kg(weight)?;
                Some(weight)
            }
            (true, None) => return Err(ValidationError::required("weight")),
            (false, Some(_)) => return Err(not_applicable("weight", input.kind)),
            (false, None) => None,
        };

        Ok(Product {
            id: Uuid::new_v4(),
            name: input.name,
            price: input.price,
            quantity: input.quantity,
            kind: input.kind,
            expiry,
            weight_kg,
        })
    }

    /// A product with neither capability (e.g. a mobile scratch card).
    pub fn standard(name: impl Into<String>, price: Money, quantity: i64) -> ValidationResult<Self> {
        Product::new(NewProduct {
            name: name.into(),
            price,
            quantity,
            kind: ProductKind::Standard,
            expires_on: None,
            weight_kg: None,
        })
    }

    /// A non-perishable product that ships (e.g. a TV).
    pub fn shippable(
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        weight_kg: f64,
    ) -> ValidationResult<Self> {
        Product::new(NewProduct {
            name: name.into(),
            price,
            quantity,
            kind: ProductKind::Shippable,
            expires_on: None,
            weight_kg: Some(weight_kg),
        })
    }

    /// A perishable product that does not ship.
    pub fn perishable(
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        expires_on: NaiveDate,
    ) -> ValidationResult<Self> {
        Product::new(NewProduct {
            name: name.into(),
            price,
            quantity,
            kind: ProductKind::Perishable,
            expires_on: Some(expires_on),
            weight_kg: None,
        })
    }

    /// A perishable product that ships (e.g. cheese, biscuits).
    pub fn perishable_shippable(
        name: impl Into<String>,
        price: Money,
        quantity: i64,
        expires_on: NaiveDate,
        weight_kg: f64,
    ) -> ValidationResult<Self> {
        Product::new(NewProduct {
            name: name.into(),
            price,
            quantity,
            kind: ProductKind::PerishableShippable,
            expires_on: Some(expires_on),
            weight_kg: Some(weight_kg),
        })
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Current stock level.
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    #[inline]
    pub fn kind(&self) -> ProductKind {
        self.kind
    }

    /// Capability test: `Some` if this product has an expiration date.
    pub fn as_expirable(&self) -> Option<&dyn Expirable> {
        self.expiry.as_ref().map(|e| e as &dyn Expirable)
    }

    /// Capability test: `Some` with one unit's worth of shipping data if
    /// this product ships.
    pub fn shippable_unit(&self) -> Option<ShippableUnit> {
        self.weight_kg
            .map(|weight| ShippableUnit::new(self.id, self.name.clone(), weight))
    }

    pub fn weight_kg(&self) -> Option<f64> {
        self.weight_kg
    }

    /// `false` for products that cannot expire.
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.as_expirable()
            .is_some_and(|e| e.is_expired_on(today))
    }

    /// Effective in-stock predicate: stock left and not expired.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use shopline_core::{Money, Product};
    ///
    /// let expires = NaiveDate::from_ymd_opt(2030, 1, 31).unwrap();
    /// let cheese = Product::perishable("Cheese", Money::from_major(100), 3, expires).unwrap();
    ///
    /// assert!(cheese.is_in_stock_on(expires));
    /// assert!(!cheese.is_in_stock_on(expires.succ_opt().unwrap()));
    /// ```
    pub fn is_in_stock_on(&self, today: NaiveDate) -> bool {
        self.quantity > 0 && !self.is_expired_on(today)
    }

    pub fn is_in_stock(&self) -> bool {
        self.is_in_stock_on(today())
    }

    /// Decrements stock by `amount`.
    ///
    /// ## Errors
    /// - `amount` negative
    /// - `amount` larger than the current stock
    pub fn reduce_quantity(&mut self, amount: i64) -> ValidationResult<()> {
        if amount < 0 {
            return Err(ValidationError::negative("amount to reduce"));
        }
        if amount > self.quantity {
            return Err(ValidationError::ExceedsStock {
                product: self.name.clone(),
                available: self.quantity,
                requested: amount,
            });
        }
        self.quantity -= amount;
        Ok(())
    }

    /// Overwrites the stock level (restock or stock count correction).
    pub fn set_quantity(&mut self, quantity: i64) -> ValidationResult<()> {
        validate_stock_quantity(quantity)?;
        self.quantity = quantity;
        Ok(())
    }
}

fn not_applicable(field: &str, kind: ProductKind) -> ValidationError {
    ValidationError::NotApplicable {
        field: field.to_string(),
        kind: kind.to_string(),
    }
}

// =============================================================================
// Product Handle
// =============================================================================

/// Shared handle to a product.
///
/// Clones point at the same product; equality is handle identity
/// (`Rc::ptr_eq`), never field equality.
#[derive(Debug, Clone)]
pub struct ProductRef(Rc<RefCell<Product>>);

impl ProductRef {
    pub fn new(product: Product) -> Self {
        ProductRef(Rc::new(RefCell::new(product)))
    }

    /// Read access.
    ///
    /// ## Panics
    /// If a [`ProductRef::borrow_mut`] guard for the same product is alive.
    pub fn borrow(&self) -> Ref<'_, Product> {
        self.0.borrow()
    }

    /// Write access.
    ///
    /// ## Panics
    /// If any other guard for the same product is alive.
    pub fn borrow_mut(&self) -> RefMut<'_, Product> {
        self.0.borrow_mut()
    }

    pub fn same_product(&self, other: &ProductRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn id(&self) -> Uuid {
        self.borrow().id()
    }

    pub fn name(&self) -> String {
        self.borrow().name().to_string()
    }

    pub fn quantity(&self) -> i64 {
        self.borrow().quantity()
    }

    pub fn is_in_stock(&self) -> bool {
        self.borrow().is_in_stock()
    }
}

impl PartialEq for ProductRef {
    fn eq(&self, other: &Self) -> bool {
        self.same_product(other)
    }
}

impl Eq for ProductRef {}

impl From<Product> for ProductRef {
    fn from(product: Product) -> Self {
        ProductRef::new(product)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
