//! Caixa prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    amounts::{AmountError, format_minor, format_money, parse_digits, parse_money, to_decimal},
    cart::{Cart, CartError},
    items::{CartItem, ItemError},
    payments::{Payment, PaymentError, PaymentMethod, primary_method, total_paid},
    pricing::{TotalPriceError, total_price},
    products::Product,
};
