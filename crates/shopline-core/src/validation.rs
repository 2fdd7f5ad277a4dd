//! # Validation Module
//!
//! Input validation rules shared by the product model, cart and customer
//! account.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Constructors / mutators (THIS MODULE)                        │
//! │  ├── Product::new, reduce_quantity, set_quantity                       │
//! │  ├── Cart::add                                                         │
//! │  └── Customer::new, deduct, credit                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Checkout re-validation (checkout.rs)                         │
//! │  └── stock / expiry drift between add-to-cart and checkout             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator runs before its caller touches any state.

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace only
///
/// ```rust
/// use shopline_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Cheese").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::required("product name"));
    }
    Ok(())
}

/// Validates a customer name. Same rule as product names.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::required("customer name"));
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity requested by a cart add.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::must_be_positive("quantity"));
    }
    Ok(())
}

/// Validates a stock level. Zero is allowed (sold out).
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::negative("product quantity"));
    }
    Ok(())
}

/// Validates a price.
///
/// ```rust
/// use shopline_core::money::Money;
/// use shopline_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_major(150)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok()); // free item
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::negative("product price"));
    }
    Ok(())
}

/// Validates an amount moved in or out of a customer balance.
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::negative("amount"));
    }
    Ok(())
}

/// Validates a per-unit shipping weight in kilograms.
///
/// ## Rules
/// - Must be a finite number greater than zero
pub fn validate_weight_kg(weight_kg: f64) -> ValidationResult<()> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(ValidationError::must_be_positive("weight"));
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
