//! Wire types for the sale-creation endpoint.

use caixa::{
    amounts::to_decimal,
    cart::{Cart, CartError},
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning a cart into a sale-creation request.
#[derive(Debug, Error)]
pub enum BuildRequestError {
    /// The cart has no items; there is nothing to sell.
    #[error("cannot finalize a sale with an empty cart")]
    EmptyCart,

    /// Tendered payments do not cover the total (outstanding minor units).
    #[error("tendered payments do not cover the total; {0} minor units remaining")]
    InsufficientPayment(i64),

    /// The cart has no payments to derive a headline method from.
    #[error("cannot finalize a sale without any payments")]
    NoPayments,

    /// Cart arithmetic failed.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// A sale line as the backend expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleItemRequest {
    /// Backend product identifier.
    pub product_id: u64,
    /// Units sold.
    pub quantity: u32,
    /// Unit price frozen at add time.
    pub unit_price: Decimal,
    /// Discount applied to the whole line.
    pub discount_amount: Decimal,
}

/// A tendered payment as the backend expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalePaymentRequest {
    /// Wire name of the payment method.
    pub payment_method: String,
    /// Tendered amount.
    pub amount: Decimal,
}

/// Body of `POST /sales`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSaleRequest {
    /// Headline method: the method of the single largest payment.
    pub payment_method: String,
    /// Sale lines, in cart order.
    pub items: Vec<SaleItemRequest>,
    /// Tendered payments, in tender order.
    pub payments: Vec<SalePaymentRequest>,
    /// Cart-level discount.
    pub discount_amount: Decimal,
    /// Always zero; taxes are not computed client-side.
    pub tax_amount: Decimal,
    /// Free-form notes (empty string when none were entered).
    pub notes: String,
    /// Customer the sale is attributed to, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
}

impl CreateSaleRequest {
    /// Build the request from a finalizable cart.
    ///
    /// # Errors
    ///
    /// - [`BuildRequestError::EmptyCart`]: the cart has no items.
    /// - [`BuildRequestError::InsufficientPayment`]: the tendered payments
    ///   do not cover the total.
    /// - [`BuildRequestError::NoPayments`]: no payment was tendered.
    /// - [`BuildRequestError::Cart`]: cart arithmetic failed.
    pub fn from_cart(cart: &Cart<'_>) -> Result<Self, BuildRequestError> {
        if cart.is_empty() {
            return Err(BuildRequestError::EmptyCart);
        }

        let remaining = cart.remaining()?.to_minor_units();

        if remaining > 0 {
            return Err(BuildRequestError::InsufficientPayment(remaining));
        }

        let payment_method = cart
            .primary_payment_method()
            .ok_or(BuildRequestError::NoPayments)?;

        let items = cart
            .items()
            .iter()
            .map(|item| SaleItemRequest {
                product_id: item.product().id,
                quantity: item.quantity(),
                unit_price: to_decimal(item.unit_price().to_minor_units()),
                discount_amount: to_decimal(item.discount().to_minor_units()),
            })
            .collect();

        let payments = cart
            .payments()
            .iter()
            .map(|payment| SalePaymentRequest {
                payment_method: payment.method().to_string(),
                amount: to_decimal(payment.amount().to_minor_units()),
            })
            .collect();

        Ok(Self {
            payment_method: payment_method.to_string(),
            items,
            payments,
            discount_amount: to_decimal(cart.discount().to_minor_units()),
            tax_amount: Decimal::ZERO,
            notes: cart.notes().unwrap_or_default().to_string(),
            customer_id: cart.customer_id(),
        })
    }
}

/// The slice of the sale-creation response the client consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct SaleCreated {
    /// Backend sale identifier.
    pub id: u64,
    /// Human-readable sale number, shown on the success screen.
    pub sale_number: String,
    /// When the backend registered the sale.
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}
