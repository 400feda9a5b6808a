//! Cart
//!
//! The pending-sale aggregate: line items, an ordered list of tendered
//! payments, a cart-level discount, and an optional customer reference.
//! Totals are always derived, never stored, and the cart decides whether
//! the sale can be finalized.

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    items::{CartItem, ItemError},
    payments::{self, Payment, PaymentError, PaymentMethod},
    pricing::{TotalPriceError, total_price},
};

/// Errors related to cart construction, edits, or totals.
#[derive(Debug, Error)]
pub enum CartError {
    /// An inserted money value's currency differs from the cart currency
    /// (value currency, cart currency).
    #[error("value has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// The cart discount must not be negative.
    #[error("cart discount must not be negative")]
    NegativeDiscount,

    /// The cart discount may not exceed the subtotal (both in minor units),
    /// as the sale total never goes negative.
    #[error("cart discount of {0} minor units exceeds subtotal of {1} minor units")]
    DiscountExceedsSubtotal(i64, i64),

    /// A line item was invalid.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// A payment was invalid.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Errors bubbled up from total price calculation.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// The pending sale.
///
/// Lives from the first added item until [`Cart::clear`] after a confirmed
/// sale. Payments additionally get wiped by [`Cart::clear_payments`]
/// whenever the checkout screen regains focus, so tenders from an
/// abandoned checkout never leak into a new attempt.
#[derive(Debug)]
pub struct Cart<'a> {
    items: Vec<CartItem<'a>>,
    payments: SmallVec<[Payment<'a>; 4]>,
    discount: Money<'a, Currency>,
    customer_id: Option<u64>,
    notes: Option<String>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new empty cart in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            payments: SmallVec::new(),
            discount: Money::from_minor(0, currency),
            customer_id: None,
            notes: None,
            currency,
        }
    }

    /// Create a new cart with the given items.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if any item is priced in a
    /// currency other than the cart's.
    pub fn with_items(
        items: impl Into<Vec<CartItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items = items.into();

        for item in &items {
            check_currency(*item.unit_price(), currency)?;
        }

        Ok(Cart {
            items,
            payments: SmallVec::new(),
            discount: Money::from_minor(0, currency),
            customer_id: None,
            notes: None,
            currency,
        })
    }

    /// The lines in the cart, in insertion order.
    pub fn items(&self) -> &[CartItem<'a>] {
        &self.items
    }

    /// The tendered payments, in tender order.
    pub fn payments(&self) -> &[Payment<'a>] {
        &self.payments
    }

    /// The cart-level discount.
    pub fn discount(&self) -> &Money<'a, Currency> {
        &self.discount
    }

    /// The customer this sale is attributed to, if any.
    pub fn customer_id(&self) -> Option<u64> {
        self.customer_id
    }

    /// Free-form notes to attach to the sale.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a line item.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the item is priced in a
    /// currency other than the cart's.
    pub fn add_item(&mut self, item: CartItem<'a>) -> Result<(), CartError> {
        check_currency(*item.unit_price(), self.currency)?;
        self.items.push(item);

        Ok(())
    }

    /// Change the quantity of the line at `index`.
    ///
    /// Out-of-range indexes are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Item`] if the new quantity is zero or leaves
    /// the line's discount larger than its total.
    pub fn set_item_quantity(&mut self, index: usize, quantity: u32) -> Result<(), CartError> {
        if let Some(item) = self.items.get_mut(index) {
            item.set_quantity(quantity)?;
        }

        Ok(())
    }

    /// Change the discount of the line at `index`.
    ///
    /// Out-of-range indexes are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] on a currency mismatch, or
    /// [`CartError::Item`] if the discount is invalid for the line.
    pub fn set_item_discount(
        &mut self,
        index: usize,
        discount: Money<'a, Currency>,
    ) -> Result<(), CartError> {
        check_currency(discount, self.currency)?;

        if let Some(item) = self.items.get_mut(index) {
            item.set_discount(discount)?;
        }

        Ok(())
    }

    /// Remove the line at `index`. Out-of-range indexes are a no-op.
    pub fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    /// Set the cart-level discount.
    ///
    /// # Errors
    ///
    /// - [`CartError::CurrencyMismatch`]: the discount currency differs
    ///   from the cart currency.
    /// - [`CartError::NegativeDiscount`]: the discount is negative.
    /// - [`CartError::DiscountExceedsSubtotal`]: the discount would push
    ///   the total below zero.
    pub fn set_discount(&mut self, discount: Money<'a, Currency>) -> Result<(), CartError> {
        check_currency(discount, self.currency)?;

        if discount.to_minor_units() < 0 {
            return Err(CartError::NegativeDiscount);
        }

        let subtotal = self.subtotal()?;

        if discount.to_minor_units() > subtotal.to_minor_units() {
            return Err(CartError::DiscountExceedsSubtotal(
                discount.to_minor_units(),
                subtotal.to_minor_units(),
            ));
        }

        self.discount = discount;

        Ok(())
    }

    /// Attribute the sale to a customer.
    pub fn set_customer(&mut self, customer_id: u64) {
        self.customer_id = Some(customer_id);
    }

    /// Drop the customer attribution.
    pub fn clear_customer(&mut self) {
        self.customer_id = None;
    }

    /// Attach free-form notes to the sale.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = Some(notes.into());
    }

    /// Calculate the subtotal: the sum of all line totals.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if there was a money arithmetic or currency
    /// mismatch error.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, CartError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        Ok(total_price(&self.items)?)
    }

    /// Calculate the sale total: `subtotal − discount`.
    ///
    /// Never negative, as [`Cart::set_discount`] caps the discount at the
    /// subtotal.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if there was a money arithmetic or currency
    /// mismatch error.
    pub fn total(&self) -> Result<Money<'a, Currency>, CartError> {
        Ok(self.subtotal()?.sub(self.discount)?)
    }

    /// Sum of all tendered payments.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if there was a money arithmetic or currency
    /// mismatch error.
    pub fn total_paid(&self) -> Result<Money<'a, Currency>, CartError> {
        Ok(payments::total_paid(&self.payments, self.currency)?)
    }

    /// Balance still owed: `total − total_paid`.
    ///
    /// Goes negative on overpayment; that surplus is the change due.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if there was a money arithmetic or currency
    /// mismatch error.
    pub fn remaining(&self) -> Result<Money<'a, Currency>, CartError> {
        Ok(self.total()?.sub(self.total_paid()?)?)
    }

    /// The remaining balance floored at zero, for prefilling the
    /// payment-amount input.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if there was a money arithmetic or currency
    /// mismatch error.
    pub fn fill_remaining(&self) -> Result<Money<'a, Currency>, CartError> {
        let remaining = self.remaining()?;

        if remaining.to_minor_units() < 0 {
            return Ok(Money::from_minor(0, self.currency));
        }

        Ok(remaining)
    }

    /// Change owed to the customer: the overpaid surplus, floored at zero.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if there was a money arithmetic or currency
    /// mismatch error.
    pub fn change_due(&self) -> Result<Money<'a, Currency>, CartError> {
        let remaining = self.remaining()?.to_minor_units();

        Ok(Money::from_minor(remaining.min(0).abs(), self.currency))
    }

    /// Change for a cash tender: the amount the customer handed over minus
    /// the cash payments already registered, floored at zero.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] on a currency mismatch or money arithmetic
    /// error.
    pub fn cash_change(
        &self,
        received: Money<'a, Currency>,
    ) -> Result<Money<'a, Currency>, CartError> {
        check_currency(received, self.currency)?;

        let cash_paid = payments::total_paid_for(&self.payments, PaymentMethod::Cash, self.currency)?;
        let change = received.sub(cash_paid)?;

        if change.to_minor_units() < 0 {
            return Ok(Money::from_minor(0, self.currency));
        }

        Ok(change)
    }

    /// Append a tendered payment.
    ///
    /// Only the payment's own validity is enforced here; callers
    /// pre-validate free-form amounts against the remaining balance.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the payment currency
    /// differs from the cart's.
    pub fn add_payment(&mut self, payment: Payment<'a>) -> Result<(), CartError> {
        check_currency(*payment.amount(), self.currency)?;
        self.payments.push(payment);

        Ok(())
    }

    /// Tender the full remaining balance in one step with a direct method.
    ///
    /// Returns the appended payment, or `None` when nothing remains to be
    /// paid (the no-op case: nothing is appended).
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if there was a money arithmetic or currency
    /// mismatch error.
    pub fn add_direct_payment(
        &mut self,
        method: PaymentMethod,
    ) -> Result<Option<Payment<'a>>, CartError> {
        let remaining = self.remaining()?;

        if remaining.to_minor_units() <= 0 {
            return Ok(None);
        }

        let payment = Payment::single(method, remaining)?;
        self.payments.push(payment);

        Ok(Some(payment))
    }

    /// Remove the payment at `index`. Out-of-range indexes are a no-op.
    pub fn remove_payment(&mut self, index: usize) {
        if index < self.payments.len() {
            self.payments.remove(index);
        }
    }

    /// Empty the payment list.
    ///
    /// Invoked whenever the checkout screen regains focus, so stale
    /// tenders from an abandoned checkout never carry over.
    pub fn clear_payments(&mut self) {
        self.payments.clear();
    }

    /// The headline payment method for the sale: the method of the single
    /// largest payment.
    pub fn primary_payment_method(&self) -> Option<PaymentMethod> {
        payments::primary_method(&self.payments)
    }

    /// Whether the sale can be finalized: at least one line item and the
    /// tendered payments cover the total.
    ///
    /// # Errors
    ///
    /// Returns a [`CartError`] if there was a money arithmetic or currency
    /// mismatch error.
    pub fn can_finalize(&self) -> Result<bool, CartError> {
        if self.items.is_empty() {
            return Ok(false);
        }

        Ok(self.total_paid()?.to_minor_units() >= self.total()?.to_minor_units())
    }

    /// Reset the cart after a confirmed sale: items, payments, discount,
    /// customer and notes are all emptied.
    pub fn clear(&mut self) {
        self.items.clear();
        self.payments.clear();
        self.discount = Money::from_minor(0, self.currency);
        self.customer_id = None;
        self.notes = None;
    }
}

fn check_currency(
    value: Money<'_, Currency>,
    currency: &'static Currency,
) -> Result<(), CartError> {
    if value.currency() == currency {
        Ok(())
    } else {
        Err(CartError::CurrencyMismatch(
            value.currency().iso_alpha_code,
            currency.iso_alpha_code,
        ))
    }
}
