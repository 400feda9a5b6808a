//! Checkout session errors.

use caixa::cart::CartError;
use thiserror::Error;

use crate::sales::{BuildRequestError, SalesApiError};

/// Everything that can stop a checkout submission.
///
/// None of these are fatal: the session stays in editing with the cart
/// intact, and every variant's `Display` is a dialog-ready message.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A submission is already in flight for this session.
    #[error("a submission is already in progress")]
    SubmissionInFlight,

    /// Local validation failed; never sent to the server.
    #[error(transparent)]
    Request(#[from] BuildRequestError),

    /// Cart arithmetic failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The backend call failed; the cart is kept for resubmission.
    #[error(transparent)]
    Api(#[from] SalesApiError),
}

impl CheckoutError {
    /// Whether the failure was caught locally, before any request was sent.
    pub fn is_local(&self) -> bool {
        !matches!(self, Self::Api(_))
    }
}
