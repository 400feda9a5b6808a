//! Checkout session: the explicit state container behind the checkout
//! screen.

mod errors;
mod session;

pub use errors::CheckoutError;
pub use session::{CheckoutSession, CheckoutState};
