//! HTTP client for the sale-creation endpoint.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::sales::requests::{CreateSaleRequest, SaleCreated};

/// Shown when the backend fails without a usable `detail` message.
const GENERIC_FAILURE_MESSAGE: &str = "the sale could not be registered";

/// Configuration for connecting to the sales backend.
#[derive(Debug, Clone)]
pub struct SalesApiConfig {
    /// Backend base URL, e.g. `"http://localhost:8000"`.
    pub base_url: String,

    /// Optional bearer token for authenticated endpoints.
    pub token: Option<String>,
}

/// Errors that can occur when submitting a sale.
///
/// Splits the transport failures (no response at all) from backend
/// rejections (a response carrying an error), since the checkout screen
/// words its dialogs differently for the two.
#[derive(Debug, Error)]
pub enum SalesApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("network error while contacting the sales backend")]
    Network(#[source] reqwest::Error),

    /// The backend rejected the sale; the message is the response `detail`
    /// when present, otherwise a generic fallback.
    #[error("{message}")]
    Server {
        /// HTTP status code of the rejection.
        status: u16,
        /// Displayable message for the failure dialog.
        message: String,
    },
}

impl From<reqwest::Error> for SalesApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error)
    }
}

/// The sale-creation surface of the backend.
#[automock]
#[async_trait]
pub trait SalesApi: Send + Sync {
    /// Submit a sale for creation.
    async fn create_sale(&self, sale: &CreateSaleRequest) -> Result<SaleCreated, SalesApiError>;
}

/// HTTP implementation of [`SalesApi`].
#[derive(Debug, Clone)]
pub struct HttpSalesClient {
    config: SalesApiConfig,
    http: Client,
}

impl HttpSalesClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: SalesApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl SalesApi for HttpSalesClient {
    async fn create_sale(&self, sale: &CreateSaleRequest) -> Result<SaleCreated, SalesApiError> {
        let url = format!("{}/sales", self.config.base_url.trim_end_matches('/'));

        let mut request = self.http.post(&url).json(sale);

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_detail(&body);

            tracing::warn!(status = status.as_u16(), detail = %message, "sale rejected by backend");

            return Err(SalesApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let created: SaleCreated = response.json().await?;

        tracing::info!(sale_number = %created.sale_number, "sale registered");

        Ok(created)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Pull the backend's `detail` message out of an error body, falling back
/// to a generic displayable message.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}
