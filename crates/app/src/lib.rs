//! Checkout application layer: the sale submission client, the checkout
//! session state container, and shared context.

pub mod checkout;
pub mod config;
pub mod context;
pub mod sales;
