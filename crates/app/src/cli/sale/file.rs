//! Cart files: the JSON input the CLI turns into a pending cart.

use std::{fs, path::Path};

use caixa::prelude::*;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use serde::Deserialize;

/// Currency of the till. The tender set (PIX) and the digit mask are
/// pt-BR, so the CLI fixes BRL rather than taking a flag.
pub(crate) const CURRENCY: &iso::Currency = iso::BRL;

#[derive(Debug, Deserialize)]
pub(crate) struct CartFile {
    items: Vec<CartFileItem>,
    #[serde(default)]
    payments: Vec<CartFilePayment>,
    #[serde(default)]
    discount: Option<Decimal>,
    #[serde(default)]
    customer_id: Option<u64>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CartFileItem {
    product_id: u64,
    name: String,
    quantity: u32,
    unit_price: Decimal,
    #[serde(default)]
    discount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct CartFilePayment {
    method: PaymentMethod,
    amount: Decimal,
    #[serde(default = "default_installments")]
    installments: u32,
}

fn default_installments() -> u32 {
    1
}

impl CartFile {
    pub(crate) fn load(path: &Path) -> Result<Self, String> {
        let raw = fs::read_to_string(path)
            .map_err(|error| format!("failed to read {}: {error}", path.display()))?;

        serde_json::from_str(&raw)
            .map_err(|error| format!("invalid cart file {}: {error}", path.display()))
    }

    /// Build the cart: items, discount and attribution, no payments.
    ///
    /// Payments are applied separately via [`CartFile::apply_payments`] so
    /// the checkout session's focus-time tender wipe can run in between.
    pub(crate) fn build_cart(&self) -> Result<Cart<'static>, String> {
        let mut cart = Cart::new(CURRENCY);

        for item in &self.items {
            let unit_price = Money::from_minor(to_minor(item.unit_price)?, CURRENCY);
            let discount = Money::from_minor(
                item.discount.map_or(Ok(0), to_minor)?,
                CURRENCY,
            );

            let line = CartItem::new(
                Product::new(item.product_id, item.name.clone(), unit_price),
                item.quantity,
                unit_price,
                discount,
            )
            .map_err(|error| format!("invalid item {}: {error}", item.product_id))?;

            cart.add_item(line)
                .map_err(|error| format!("invalid item {}: {error}", item.product_id))?;
        }

        if let Some(discount) = self.discount {
            cart.set_discount(Money::from_minor(to_minor(discount)?, CURRENCY))
                .map_err(|error| format!("invalid cart discount: {error}"))?;
        }

        if let Some(customer_id) = self.customer_id {
            cart.set_customer(customer_id);
        }

        if let Some(notes) = &self.notes {
            cart.set_notes(notes.clone());
        }

        Ok(cart)
    }

    pub(crate) fn apply_payments(&self, cart: &mut Cart<'static>) -> Result<(), String> {
        for (index, payment) in self.payments.iter().enumerate() {
            let tender = Payment::new(
                payment.method,
                Money::from_minor(to_minor(payment.amount)?, CURRENCY),
                payment.installments,
            )
            .map_err(|error| format!("invalid payment {index}: {error}"))?;

            cart.add_payment(tender)
                .map_err(|error| format!("invalid payment {index}: {error}"))?;
        }

        Ok(())
    }
}

/// Convert a decimal amount to minor units, rejecting sub-centavo
/// precision.
fn to_minor(amount: Decimal) -> Result<i64, String> {
    let scaled = amount
        .checked_mul(Decimal::new(100, 0))
        .ok_or_else(|| format!("amount {amount} is out of range"))?;

    if !scaled.fract().is_zero() {
        return Err(format!("amount {amount} has sub-centavo precision"));
    }

    scaled
        .to_i64()
        .ok_or_else(|| format!("amount {amount} is out of range"))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn sample() -> &'static str {
        r#"{
            "items": [
                { "product_id": 1, "name": "Camiseta", "quantity": 2, "unit_price": "50.00" },
                { "product_id": 2, "name": "Boné", "quantity": 1, "unit_price": "35.00", "discount": "5.00" }
            ],
            "payments": [
                { "method": "credit_card", "amount": "100.00", "installments": 2 },
                { "method": "cash", "amount": "30.00" }
            ],
            "customer_id": 9,
            "notes": "retirada na loja"
        }"#
    }

    #[test]
    fn sample_file_builds_a_cart_with_payments() -> TestResult {
        let file: CartFile = serde_json::from_str(sample())?;

        let mut cart = file.build_cart().map_err(as_io_error)?;
        file.apply_payments(&mut cart).map_err(as_io_error)?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total()?, Money::from_minor(13000, CURRENCY));
        assert_eq!(cart.total_paid()?, Money::from_minor(13000, CURRENCY));
        assert_eq!(cart.customer_id(), Some(9));
        assert!(cart.can_finalize()?);

        Ok(())
    }

    #[test]
    fn sub_centavo_amounts_are_rejected() {
        assert!(to_minor(Decimal::new(10005, 3)).is_err());
    }

    #[test]
    fn whole_amounts_convert_to_minor_units() {
        assert_eq!(to_minor(Decimal::new(5000, 2)), Ok(5000));
        assert_eq!(to_minor(Decimal::new(150, 0)), Ok(15000));
    }

    fn as_io_error(message: String) -> std::io::Error {
        std::io::Error::other(message)
    }
}
