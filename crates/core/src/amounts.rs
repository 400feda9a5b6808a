//! Raw-digit currency amounts
//!
//! The till keypad produces bare digit strings where the last two digits
//! are centavos: `"15000"` means 150,00. This module converts between that
//! entry form, minor units, and the pt-BR display format.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors raised while parsing a raw digit string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    /// The input contained no digits.
    #[error("amount is empty")]
    Empty,

    /// The input contained a non-digit character.
    #[error("invalid character {0:?} in amount")]
    InvalidDigit(char),

    /// The amount does not fit in 64-bit minor units.
    #[error("amount is too large")]
    Overflow,
}

/// Parse a raw digit string into minor units.
///
/// `"15000"` parses to `15000` minor units (150,00). Leading zeros are
/// accepted, as the keypad emits them freely.
///
/// # Errors
///
/// - [`AmountError::Empty`]: the input has no digits.
/// - [`AmountError::InvalidDigit`]: a character other than `0`-`9` was found.
/// - [`AmountError::Overflow`]: the value does not fit in an `i64`.
pub fn parse_digits(input: &str) -> Result<i64, AmountError> {
    if input.is_empty() {
        return Err(AmountError::Empty);
    }

    input.chars().try_fold(0i64, |acc, c| {
        let digit = c
            .to_digit(10)
            .ok_or(AmountError::InvalidDigit(c))
            .map(i64::from)?;

        acc.checked_mul(10)
            .and_then(|shifted| shifted.checked_add(digit))
            .ok_or(AmountError::Overflow)
    })
}

/// Parse a raw digit string straight into a [`Money`] value.
///
/// # Errors
///
/// Returns an [`AmountError`] under the same conditions as
/// [`parse_digits`].
pub fn parse_money(
    input: &str,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, AmountError> {
    Ok(Money::from_minor(parse_digits(input)?, currency))
}

/// The numeric value of a minor-unit amount, with two decimal places.
pub fn to_decimal(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}

/// Format minor units the way the till displays them: comma decimal
/// separator, dot thousands grouping (`15000` ⇒ `"150,00"`,
/// `123456789` ⇒ `"1.234.567,89"`).
pub fn format_minor(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    let cents = abs % 100;
    let mut units = abs / 100;

    let mut groups = Vec::new();
    loop {
        let group = units % 1000;
        units /= 1000;

        if units == 0 {
            groups.push(group.to_string());
            break;
        }

        groups.push(format!("{group:03}"));
    }
    groups.reverse();

    format!("{sign}{},{cents:02}", groups.join("."))
}

/// Format a [`Money`] value for display.
pub fn format_money(money: Money<'_, Currency>) -> String {
    format_minor(money.to_minor_units())
}
