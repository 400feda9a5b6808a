//! Checkout session state.

use caixa::cart::Cart;
use rusty_money::iso::Currency;

use crate::{
    checkout::errors::CheckoutError,
    sales::{CreateSaleRequest, SaleCreated, SalesApi},
};

/// Where the checkout flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// Items and tenders are being edited.
    Editing,

    /// A submission is in flight; further submits are rejected until it
    /// settles or the session is abandoned.
    Submitting,
}

/// Explicit, injectable state container for the checkout screen.
///
/// Owns the pending cart and the editing/submitting flag. Created once on
/// app start, handed by reference to the checkout view, and reset when a
/// sale completes. Dropping an in-flight [`CheckoutSession::submit`]
/// future (the view unmounting) abandons the request and leaves the
/// session submitting until [`CheckoutSession::abandon`] is called.
#[derive(Debug)]
pub struct CheckoutSession<'a> {
    cart: Cart<'a>,
    state: CheckoutState,
}

impl<'a> CheckoutSession<'a> {
    /// Create a session with an empty cart in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            cart: Cart::new(currency),
            state: CheckoutState::Editing,
        }
    }

    /// Take over a rung-up cart as the checkout screen gains focus.
    ///
    /// Stale tenders from a previously abandoned checkout are wiped; the
    /// items and discount survive.
    pub fn begin(mut cart: Cart<'a>) -> Self {
        cart.clear_payments();

        Self {
            cart,
            state: CheckoutState::Editing,
        }
    }

    /// The pending cart.
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// Mutable access to the pending cart for item and tender edits.
    ///
    /// The view disables edits while a submission is in flight; this
    /// container only guards [`CheckoutSession::submit`] itself.
    pub fn cart_mut(&mut self) -> &mut Cart<'a> {
        &mut self.cart
    }

    /// Current flow state.
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state == CheckoutState::Submitting
    }

    /// Return to editing after an abandoned in-flight submission.
    pub fn abandon(&mut self) {
        self.state = CheckoutState::Editing;
    }

    /// Validate the cart and submit the sale.
    ///
    /// On success the cart is cleared and the created sale returned. On
    /// any failure the cart is left untouched so the operator can adjust
    /// and resubmit.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::SubmissionInFlight`]: a previous submission has
    ///   not settled.
    /// - [`CheckoutError::Request`]: local validation failed (empty cart,
    ///   insufficient payment); nothing was sent.
    /// - [`CheckoutError::Api`]: the backend call failed.
    pub async fn submit(&mut self, api: &dyn SalesApi) -> Result<SaleCreated, CheckoutError> {
        if self.state == CheckoutState::Submitting {
            return Err(CheckoutError::SubmissionInFlight);
        }

        let request = CreateSaleRequest::from_cart(&self.cart)?;

        self.state = CheckoutState::Submitting;
        let result = api.create_sale(&request).await;
        self.state = CheckoutState::Editing;

        match result {
            Ok(sale) => {
                tracing::info!(sale_number = %sale.sale_number, "checkout complete");
                self.cart.clear();

                Ok(sale)
            }
            Err(error) => {
                tracing::warn!(error = %error, "submission failed; cart kept for resubmission");

                Err(error.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use caixa::prelude::*;
    use rusty_money::{Money, iso};
    use testresult::TestResult;

    use crate::sales::{BuildRequestError, MockSalesApi, SaleCreated, SalesApiError};

    use super::*;

    fn paid_session<'a>() -> Result<CheckoutSession<'a>, CartError> {
        let cart = Cart::with_items(
            [CartItem::at_catalog_price(
                Product::new(1, "Camiseta", Money::from_minor(5000, iso::BRL)),
                2,
            )?],
            iso::BRL,
        )?;

        let mut session = CheckoutSession::begin(cart);
        session.cart_mut().add_direct_payment(PaymentMethod::Pix)?;

        Ok(session)
    }

    fn created_sale() -> SaleCreated {
        SaleCreated {
            id: 42,
            sale_number: "V-2026-0001".to_string(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn successful_submission_clears_the_cart() -> TestResult {
        let mut session = paid_session()?;

        let mut api = MockSalesApi::new();
        api.expect_create_sale()
            .withf(|request| request.payment_method == "pix")
            .times(1)
            .returning(|_| Ok(created_sale()));

        let sale = session.submit(&api).await?;

        assert_eq!(sale.sale_number, "V-2026-0001");
        assert!(session.cart().is_empty());
        assert!(session.cart().payments().is_empty());
        assert_eq!(session.state(), CheckoutState::Editing);

        Ok(())
    }

    #[tokio::test]
    async fn failed_submission_keeps_the_cart_for_resubmission() -> TestResult {
        let mut session = paid_session()?;

        let mut api = MockSalesApi::new();
        api.expect_create_sale().times(2).returning(|_| {
            Err(SalesApiError::Server {
                status: 422,
                message: "estoque insuficiente".to_string(),
            })
        });

        let result = session.submit(&api).await;

        match result {
            Err(CheckoutError::Api(SalesApiError::Server { status, message })) => {
                assert_eq!(status, 422);
                assert_eq!(message, "estoque insuficiente");
            }
            other => panic!("expected a server error, got {other:?}"),
        }

        // Cart untouched: the operator can immediately resubmit.
        assert_eq!(session.cart().len(), 1);
        assert_eq!(session.cart().payments().len(), 1);
        assert_eq!(session.state(), CheckoutState::Editing);

        let retry = session.submit(&api).await;
        assert!(retry.is_err(), "backend still failing");

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_is_rejected_before_any_request() {
        let mut session = CheckoutSession::new(iso::BRL);

        let api = MockSalesApi::new();

        let result = session.submit(&api).await;

        match result {
            Err(error @ CheckoutError::Request(BuildRequestError::EmptyCart)) => {
                assert!(error.is_local());
            }
            other => panic!("expected EmptyCart, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn underpaid_cart_is_rejected_before_any_request() -> TestResult {
        let mut session = paid_session()?;
        session.cart_mut().remove_payment(0);

        let api = MockSalesApi::new();

        let result = session.submit(&api).await;

        assert!(
            matches!(
                result,
                Err(CheckoutError::Request(
                    BuildRequestError::InsufficientPayment(10000)
                ))
            ),
            "expected InsufficientPayment(10000), got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn in_flight_sessions_reject_further_submits() -> TestResult {
        let mut session = paid_session()?;
        session.state = CheckoutState::Submitting;

        let api = MockSalesApi::new();

        let result = session.submit(&api).await;

        assert!(
            matches!(result, Err(CheckoutError::SubmissionInFlight)),
            "expected SubmissionInFlight, got {result:?}"
        );

        session.abandon();
        assert!(!session.is_submitting());

        Ok(())
    }

    #[tokio::test]
    async fn begin_wipes_stale_tenders_on_focus() -> TestResult {
        let mut cart = Cart::with_items(
            [CartItem::at_catalog_price(
                Product::new(1, "Camiseta", Money::from_minor(5000, iso::BRL)),
                1,
            )?],
            iso::BRL,
        )?;
        cart.add_direct_payment(PaymentMethod::Cash)?;

        let session = CheckoutSession::begin(cart);

        assert!(session.cart().payments().is_empty());
        assert_eq!(session.cart().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn request_carries_the_customer_attribution() -> TestResult {
        let mut session = paid_session()?;
        session.cart_mut().set_customer(7);

        let mut api = MockSalesApi::new();
        api.expect_create_sale()
            .withf(|request| request.customer_id == Some(7))
            .times(1)
            .returning(|_| Ok(created_sale()));

        session.submit(&api).await?;

        Ok(())
    }
}
