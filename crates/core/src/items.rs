//! Cart line items

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::products::Product;

/// Errors raised when building or editing a cart line.
#[derive(Debug, Error)]
pub enum ItemError {
    /// Quantity must be a positive integer.
    #[error("quantity must be greater than zero")]
    ZeroQuantity,

    /// Unit price must not be negative.
    #[error("unit price must not be negative")]
    NegativeUnitPrice,

    /// Line discount must not be negative.
    #[error("discount must not be negative")]
    NegativeDiscount,

    /// Line discount may not exceed the undiscounted line total (both in minor units).
    #[error("discount of {0} minor units exceeds line total of {1} minor units")]
    DiscountExceedsLineTotal(i64, i64),

    /// Line total arithmetic overflowed.
    #[error("line total arithmetic overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A line in a pending sale: a product snapshot, a quantity, the unit
/// price frozen at add time, and an optional per-line discount.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem<'a> {
    product: Product<'a>,
    quantity: u32,
    unit_price: Money<'a, Currency>,
    discount: Money<'a, Currency>,
}

impl<'a> CartItem<'a> {
    /// Create a new line item.
    ///
    /// # Errors
    ///
    /// - [`ItemError::ZeroQuantity`]: the quantity is zero.
    /// - [`ItemError::NegativeUnitPrice`] / [`ItemError::NegativeDiscount`]:
    ///   a negative money value was supplied.
    /// - [`ItemError::DiscountExceedsLineTotal`]: the discount is larger
    ///   than `quantity × unit_price`.
    /// - [`ItemError::Money`]: the discount currency differs from the unit
    ///   price currency.
    /// - [`ItemError::Overflow`]: the line total is not representable.
    pub fn new(
        product: Product<'a>,
        quantity: u32,
        unit_price: Money<'a, Currency>,
        discount: Money<'a, Currency>,
    ) -> Result<Self, ItemError> {
        if unit_price.to_minor_units() < 0 {
            return Err(ItemError::NegativeUnitPrice);
        }

        validate_discount(quantity, unit_price, discount)?;

        Ok(Self {
            product,
            quantity,
            unit_price,
            discount,
        })
    }

    /// Create a line item priced at the product's snapshot price, with no
    /// discount.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`CartItem::new`].
    pub fn at_catalog_price(product: Product<'a>, quantity: u32) -> Result<Self, ItemError> {
        let unit_price = product.price;
        let discount = Money::from_minor(0, unit_price.currency());

        Self::new(product, quantity, unit_price, discount)
    }

    /// The product snapshot for this line.
    pub fn product(&self) -> &Product<'a> {
        &self.product
    }

    /// Number of units on this line.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price frozen when the item was added.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Discount applied to the whole line.
    pub fn discount(&self) -> &Money<'a, Currency> {
        &self.discount
    }

    /// Change the quantity on this line.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::ZeroQuantity`] for a zero quantity, or
    /// [`ItemError::DiscountExceedsLineTotal`] if the existing discount no
    /// longer fits the smaller line total.
    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), ItemError> {
        validate_discount(quantity, self.unit_price, self.discount)?;
        self.quantity = quantity;

        Ok(())
    }

    /// Change the discount on this line.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::NegativeDiscount`],
    /// [`ItemError::DiscountExceedsLineTotal`] or [`ItemError::Money`] when
    /// the new discount is invalid for this line.
    pub fn set_discount(&mut self, discount: Money<'a, Currency>) -> Result<(), ItemError> {
        validate_discount(self.quantity, self.unit_price, discount)?;
        self.discount = discount;

        Ok(())
    }

    /// The line total: `quantity × unit_price − discount`.
    ///
    /// Construction and edits keep the discount within the undiscounted
    /// line total, so the result is never negative.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::Overflow`] if the multiplication is not
    /// representable, or [`ItemError::Money`] on a currency mismatch.
    pub fn line_total(&self) -> Result<Money<'a, Currency>, ItemError> {
        let gross = gross_minor(self.quantity, self.unit_price)?;

        Ok(Money::from_minor(gross, self.unit_price.currency()).sub(self.discount)?)
    }
}

/// `quantity × unit_price` in minor units, checked.
fn gross_minor(quantity: u32, unit_price: Money<'_, Currency>) -> Result<i64, ItemError> {
    unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(ItemError::Overflow)
}

fn validate_discount(
    quantity: u32,
    unit_price: Money<'_, Currency>,
    discount: Money<'_, Currency>,
) -> Result<(), ItemError> {
    if quantity == 0 {
        return Err(ItemError::ZeroQuantity);
    }

    if discount.currency() != unit_price.currency() {
        return Err(ItemError::Money(MoneyError::CurrencyMismatch {
            expected: unit_price.currency().iso_alpha_code,
            actual: discount.currency().iso_alpha_code,
        }));
    }

    if discount.to_minor_units() < 0 {
        return Err(ItemError::NegativeDiscount);
    }

    let gross = gross_minor(quantity, unit_price)?;

    if discount.to_minor_units() > gross {
        return Err(ItemError::DiscountExceedsLineTotal(
            discount.to_minor_units(),
            gross,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use super::*;

    fn espresso<'a>() -> Product<'a> {
        Product::new(1, "Espresso", Money::from_minor(450, iso::BRL))
    }

    #[test]
    fn at_catalog_price_uses_snapshot_price() -> TestResult {
        let item = CartItem::at_catalog_price(espresso(), 2)?;

        assert_eq!(item.quantity(), 2);
        assert_eq!(item.unit_price(), &Money::from_minor(450, iso::BRL));
        assert_eq!(item.line_total()?, Money::from_minor(900, iso::BRL));

        Ok(())
    }

    #[test]
    fn line_total_subtracts_discount() -> TestResult {
        let item = CartItem::new(
            espresso(),
            3,
            Money::from_minor(450, iso::BRL),
            Money::from_minor(150, iso::BRL),
        )?;

        assert_eq!(item.line_total()?, Money::from_minor(1200, iso::BRL));

        Ok(())
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let result = CartItem::at_catalog_price(espresso(), 0);

        assert!(matches!(result, Err(ItemError::ZeroQuantity)));
    }

    #[test]
    fn discount_larger_than_line_total_is_rejected() {
        let result = CartItem::new(
            espresso(),
            1,
            Money::from_minor(450, iso::BRL),
            Money::from_minor(500, iso::BRL),
        );

        assert!(matches!(
            result,
            Err(ItemError::DiscountExceedsLineTotal(500, 450))
        ));
    }

    #[test]
    fn discount_currency_must_match_unit_price() {
        let result = CartItem::new(
            espresso(),
            1,
            Money::from_minor(450, iso::BRL),
            Money::from_minor(100, iso::USD),
        );

        assert!(matches!(result, Err(ItemError::Money(_))));
    }

    #[test]
    fn negative_discount_is_rejected() {
        let result = CartItem::new(
            espresso(),
            1,
            Money::from_minor(450, iso::BRL),
            Money::from_minor(-100, iso::BRL),
        );

        assert!(matches!(result, Err(ItemError::NegativeDiscount)));
    }

    #[test]
    fn shrinking_quantity_revalidates_discount() -> TestResult {
        let mut item = CartItem::new(
            espresso(),
            2,
            Money::from_minor(450, iso::BRL),
            Money::from_minor(600, iso::BRL),
        )?;

        let result = item.set_quantity(1);

        assert!(
            matches!(result, Err(ItemError::DiscountExceedsLineTotal(600, 450))),
            "expected DiscountExceedsLineTotal, got {result:?}"
        );
        assert_eq!(item.quantity(), 2);

        Ok(())
    }

    #[test]
    fn set_discount_replaces_discount() -> TestResult {
        let mut item = CartItem::at_catalog_price(espresso(), 2)?;

        item.set_discount(Money::from_minor(100, iso::BRL))?;

        assert_eq!(item.line_total()?, Money::from_minor(800, iso::BRL));

        Ok(())
    }
}
