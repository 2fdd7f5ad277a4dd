//! # Customer Account
//!
//! A named account with a non-negative balance. Checkout deducts the order
//! total from it; `credit` tops it up.

use serde::Serialize;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::validation::{validate_amount, validate_customer_name};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    name: String,
    balance: Money,
}

impl Customer {
    /// ## Errors
    /// Empty name or negative opening balance.
    pub fn new(name: impl Into<String>, balance: Money) -> ValidationResult<Self> {
        let name = name.into();
        validate_customer_name(&name)?;
        if balance.is_negative() {
            return Err(ValidationError::negative("customer balance"));
        }
        Ok(Customer { name, balance })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Withdraws `amount`; the balance never goes below zero.
    pub fn deduct(&mut self, amount: Money) -> ValidationResult<()> {
        validate_amount(amount)?;
        if amount > self.balance {
            return Err(ValidationError::InsufficientBalance {
                available: self.balance,
                requested: amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Deposits `amount`.
    pub fn credit(&mut self, amount: Money) -> ValidationResult<()> {
        validate_amount(amount)?;
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| ValidationError::overflow("customer balance"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer() {
        let customer = Customer::new("John Doe", Money::from_major(1000)).unwrap();
        assert_eq!(customer.name(), "John Doe");
        assert_eq!(customer.balance(), Money::from_major(1000));

        assert!(Customer::new("", Money::zero()).is_err());
        assert!(Customer::new("Jane", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_deduct() {
        let mut customer = Customer::new("John Doe", Money::from_major(1000)).unwrap();

        customer.deduct(Money::from_major(360)).unwrap();
        assert_eq!(customer.balance(), Money::from_major(640));

        customer.deduct(Money::from_major(640)).unwrap();
        assert!(customer.balance().is_zero());
    }

    #[test]
    fn test_deduct_rejects_without_change() {
        let mut customer = Customer::new("John Doe", Money::from_major(10)).unwrap();

        assert!(matches!(
            customer.deduct(Money::from_cents(1001)),
            Err(ValidationError::InsufficientBalance { .. })
        ));
        assert!(customer.deduct(Money::from_cents(-1)).is_err());
        assert_eq!(customer.balance(), Money::from_major(10));
    }

    #[test]
    fn test_credit() {
        let mut customer = Customer::new("John Doe", Money::zero()).unwrap();

        customer.credit(Money::from_major(25)).unwrap();
        assert_eq!(customer.balance(), Money::from_major(25));

        assert!(customer.credit(Money::from_cents(-1)).is_err());

        let before = customer.balance();
        assert!(matches!(
            customer.credit(Money::from_cents(i64::MAX)),
            Err(ValidationError::Overflow { .. })
        ));
        assert_eq!(customer.balance(), before);
        assert_eq!(customer.balance(), Money::from_major(25));
    }
}
