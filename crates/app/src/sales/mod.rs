//! Sales endpoint: wire types and HTTP client.

mod client;
mod requests;

pub use client::{HttpSalesClient, MockSalesApi, SalesApi, SalesApiConfig, SalesApiError};
pub use requests::{
    BuildRequestError, CreateSaleRequest, SaleCreated, SaleItemRequest, SalePaymentRequest,
};
