//! App Context

use std::sync::Arc;

use crate::{
    config::ApiConfig,
    sales::{HttpSalesClient, SalesApi, SalesApiConfig},
};

/// Shared service handles, passed by reference to the views.
#[derive(Clone)]
pub struct AppContext {
    /// Sale-creation surface of the backend.
    pub sales: Arc<dyn SalesApi>,
}

impl AppContext {
    /// Build application context from the API configuration.
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            sales: Arc::new(HttpSalesClient::new(SalesApiConfig {
                base_url: config.base_url.clone(),
                token: config.token.clone(),
            })),
        }
    }
}
