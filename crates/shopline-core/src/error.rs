//! # Error Types
//!
//! Domain-specific error types for shopline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ValidationError  - malformed or out-of-range input to a constructor   │
//! │                     or low-level mutator (Product, Cart, Customer)     │
//! │                                                                         │
//! │  CheckoutError    - transaction-level precondition failed              │
//! │                     (empty cart, stock/expiry drift, funds)            │
//! │                                                                         │
//! │  ConfigError      - invalid CheckoutConfig source value                │
//! │                                                                         │
//! │  Flow: ValidationError ──► caller          (never changes state)       │
//! │        CheckoutError   ──► caller          (raised before commit)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, amounts)
//! 3. Errors are enum variants, never String
//! 4. Neither kind is retried; the caller reports and discards

use thiserror::Error;

use crate::checkout::CheckoutStage;
use crate::money::Money;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by constructors and mutators before any state changes, so a
/// failed call always leaves its receiver untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g. an unparsable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A field was supplied for a product kind that does not carry it.
    #[error("{field} does not apply to {kind} products")]
    NotApplicable { field: String, kind: String },

    /// Requested quantity is larger than the stock on hand.
    ///
    /// For a repeat add this is the merged cart quantity.
    #[error("Requested quantity {requested} of {product} exceeds available stock {available}")]
    ExceedsStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Product has no stock left.
    #[error("{product} is out of stock")]
    OutOfStock { product: String },

    /// Product is past its expiration date.
    #[error("{product} has expired")]
    Expired { product: String },

    /// Deduction larger than the account balance.
    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance { available: Money, requested: Money },

    /// An amount would leave the representable money range.
    #[error("{field} is too large")]
    Overflow { field: String },

    /// Lookup by name found nothing.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// Duplicate value (e.g. two catalog entries with the same name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn must_be_positive(field: &str) -> Self {
        ValidationError::MustBePositive {
            field: field.to_string(),
        }
    }

    pub(crate) fn negative(field: &str) -> Self {
        ValidationError::Negative {
            field: field.to_string(),
        }
    }

    pub(crate) fn overflow(field: &str) -> Self {
        ValidationError::Overflow {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Transaction-level checkout failures.
///
/// Every variant except [`CheckoutError::CommitFailed`] is raised before
/// the commit stage begins, which means cart, customer and stock are exactly
/// as they were before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,

    /// Stock dropped to zero after the item was added.
    #[error("Product out of stock: {product}")]
    OutOfStock { product: String },

    /// Product expired after the item was added.
    #[error("Product expired: {product}")]
    Expired { product: String },

    /// Stock dropped below the quantity in the cart.
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Subtotal plus shipping does not fit in [`Money`].
    #[error("Order total is too large")]
    TotalOverflow,

    #[error("Insufficient customer balance: balance {balance}, total {total}")]
    InsufficientBalance { balance: Money, total: Money },

    /// A commit step failed after earlier commit steps were applied.
    ///
    /// Nothing is rolled back. This can only happen if product stock or the
    /// customer balance is changed by something outside the checkout between
    /// validation and commit.
    #[error("Checkout commit failed: {0}")]
    CommitFailed(#[from] ValidationError),
}

impl CheckoutError {
    /// The pipeline stage that produced this error.
    pub fn stage(&self) -> CheckoutStage {
        match self {
            CheckoutError::EmptyCart => CheckoutStage::EmptyCheck,
            CheckoutError::OutOfStock { .. }
            | CheckoutError::Expired { .. }
            | CheckoutError::InsufficientStock { .. } => CheckoutStage::Revalidation,
            CheckoutError::TotalOverflow => CheckoutStage::Pricing,
            CheckoutError::InsufficientBalance { .. } => CheckoutStage::FundsCheck,
            CheckoutError::CommitFailed(_) => CheckoutStage::Commit,
        }
    }
}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================
