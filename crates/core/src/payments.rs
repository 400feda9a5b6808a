//! Payments
//!
//! A sale is settled by an ordered list of tendered payments, possibly
//! across mixed methods. "Direct" methods settle the full remaining
//! balance in one step; credit requires explicit amount and installment
//! entry.

use std::fmt;

use rusty_money::{Money, MoneyError, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a payment.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Payment amounts must be strictly positive.
    #[error("payment amount must be greater than zero")]
    NonPositiveAmount,

    /// Installment count must be at least one.
    #[error("installments must be at least one")]
    ZeroInstallments,
}

/// Methods a sale can be tendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Brazilian instant transfer.
    Pix,
    /// Debit card on the external terminal.
    DebitCard,
    /// Credit card, optionally in installments.
    CreditCard,
    /// Physical cash.
    Cash,
}

impl PaymentMethod {
    /// Whether selecting this method tenders the full remaining balance in
    /// one step, without free-form amount entry.
    pub fn is_direct(self) -> bool {
        matches!(self, Self::Pix | Self::DebitCard | Self::Cash)
    }

    /// The wire name used by the sales endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pix => "pix",
            Self::DebitCard => "debit_card",
            Self::CreditCard => "credit_card",
            Self::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single tendered payment towards the pending sale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payment<'a> {
    method: PaymentMethod,
    amount: Money<'a, Currency>,
    installments: u32,
}

impl<'a> Payment<'a> {
    /// Create a new payment.
    ///
    /// Installments above one are only meaningful for credit cards; the
    /// aggregation layer does not enforce that, mirroring how tenders are
    /// entered at the till.
    ///
    /// # Errors
    ///
    /// - [`PaymentError::NonPositiveAmount`]: the amount is zero or negative.
    /// - [`PaymentError::ZeroInstallments`]: the installment count is zero.
    pub fn new(
        method: PaymentMethod,
        amount: Money<'a, Currency>,
        installments: u32,
    ) -> Result<Self, PaymentError> {
        if amount.to_minor_units() <= 0 {
            return Err(PaymentError::NonPositiveAmount);
        }

        if installments == 0 {
            return Err(PaymentError::ZeroInstallments);
        }

        Ok(Self {
            method,
            amount,
            installments,
        })
    }

    /// Create a single-installment payment.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::NonPositiveAmount`] if the amount is zero or
    /// negative.
    pub fn single(method: PaymentMethod, amount: Money<'a, Currency>) -> Result<Self, PaymentError> {
        Self::new(method, amount, 1)
    }

    /// The method this payment was tendered with.
    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    /// The tendered amount.
    pub fn amount(&self) -> &Money<'a, Currency> {
        &self.amount
    }

    /// Number of installments (one for everything but installment credit).
    pub fn installments(&self) -> u32 {
        self.installments
    }
}

/// Sum of all tendered amounts, in the given currency.
///
/// # Errors
///
/// Returns a [`MoneyError`] if a payment's currency differs from `currency`.
pub fn total_paid<'a>(
    payments: &[Payment<'a>],
    currency: &'static Currency,
) -> Result<Money<'a, Currency>, MoneyError> {
    payments
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, payment| {
            acc.add(*payment.amount())
        })
}

/// Sum of the tendered amounts for a single method.
///
/// # Errors
///
/// Returns a [`MoneyError`] if a payment's currency differs from `currency`.
pub fn total_paid_for<'a>(
    payments: &[Payment<'a>],
    method: PaymentMethod,
    currency: &'static Currency,
) -> Result<Money<'a, Currency>, MoneyError> {
    payments
        .iter()
        .filter(|payment| payment.method() == method)
        .try_fold(Money::from_minor(0, currency), |acc, payment| {
            acc.add(*payment.amount())
        })
}

/// The method of the single largest payment.
///
/// This is what the backend records as the sale's headline payment method.
/// Ties resolve to the earliest payment in tender order.
pub fn primary_method(payments: &[Payment<'_>]) -> Option<PaymentMethod> {
    payments
        .iter()
        .enumerate()
        .max_by_key(|(index, payment)| {
            // Negate the index so earlier payments win ties on amount.
            (
                payment.amount().to_minor_units(),
                std::cmp::Reverse(*index),
            )
        })
        .map(|(_, payment)| payment.method())
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn zero_amount_is_rejected() {
        let result = Payment::single(PaymentMethod::Cash, Money::from_minor(0, iso::BRL));

        assert!(matches!(result, Err(PaymentError::NonPositiveAmount)));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let result = Payment::single(PaymentMethod::Pix, Money::from_minor(-100, iso::BRL));

        assert!(matches!(result, Err(PaymentError::NonPositiveAmount)));
    }

    #[test]
    fn zero_installments_is_rejected() {
        let result = Payment::new(
            PaymentMethod::CreditCard,
            Money::from_minor(1000, iso::BRL),
            0,
        );

        assert!(matches!(result, Err(PaymentError::ZeroInstallments)));
    }

    #[test]
    fn direct_methods_exclude_credit() {
        assert!(PaymentMethod::Pix.is_direct());
        assert!(PaymentMethod::DebitCard.is_direct());
        assert!(PaymentMethod::Cash.is_direct());
        assert!(!PaymentMethod::CreditCard.is_direct());
    }

    #[test]
    fn wire_names_are_snake_case() {
        assert_eq!(PaymentMethod::Pix.to_string(), "pix");
        assert_eq!(PaymentMethod::DebitCard.to_string(), "debit_card");
        assert_eq!(PaymentMethod::CreditCard.to_string(), "credit_card");
        assert_eq!(PaymentMethod::Cash.to_string(), "cash");
    }

    #[test]
    fn total_paid_sums_all_payments() -> TestResult {
        let payments = [
            Payment::single(PaymentMethod::Pix, Money::from_minor(6000, iso::BRL))?,
            Payment::single(PaymentMethod::Cash, Money::from_minor(4000, iso::BRL))?,
        ];

        assert_eq!(
            total_paid(&payments, iso::BRL)?,
            Money::from_minor(10000, iso::BRL)
        );

        Ok(())
    }

    #[test]
    fn total_paid_of_no_payments_is_zero() -> TestResult {
        assert_eq!(
            total_paid(&[], iso::BRL)?,
            Money::from_minor(0, iso::BRL)
        );

        Ok(())
    }

    #[test]
    fn total_paid_for_filters_by_method() -> TestResult {
        let payments = [
            Payment::single(PaymentMethod::Cash, Money::from_minor(2000, iso::BRL))?,
            Payment::single(PaymentMethod::Pix, Money::from_minor(3000, iso::BRL))?,
            Payment::single(PaymentMethod::Cash, Money::from_minor(1000, iso::BRL))?,
        ];

        assert_eq!(
            total_paid_for(&payments, PaymentMethod::Cash, iso::BRL)?,
            Money::from_minor(3000, iso::BRL)
        );

        Ok(())
    }

    #[test]
    fn primary_method_is_largest_payment() -> TestResult {
        let payments = [
            Payment::single(PaymentMethod::Cash, Money::from_minor(2000, iso::BRL))?,
            Payment::new(PaymentMethod::CreditCard, Money::from_minor(8000, iso::BRL), 3)?,
        ];

        assert_eq!(primary_method(&payments), Some(PaymentMethod::CreditCard));

        Ok(())
    }

    #[test]
    fn primary_method_ties_resolve_to_earliest() -> TestResult {
        let payments = [
            Payment::single(PaymentMethod::Pix, Money::from_minor(5000, iso::BRL))?,
            Payment::single(PaymentMethod::Cash, Money::from_minor(5000, iso::BRL))?,
        ];

        assert_eq!(primary_method(&payments), Some(PaymentMethod::Pix));

        Ok(())
    }

    #[test]
    fn primary_method_of_no_payments_is_none() {
        assert_eq!(primary_method(&[]), None);
    }
}
