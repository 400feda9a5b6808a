//! Caixa
//!
//! Caixa is the checkout cart and payment aggregation engine for a
//! point-of-sale client: line items with per-line discounts, an ordered
//! list of tendered payments across mixed methods, and the derived totals
//! that decide whether a sale can be finalized.

pub mod amounts;
pub mod cart;
pub mod items;
pub mod payments;
pub mod prelude;
pub mod pricing;
pub mod products;
