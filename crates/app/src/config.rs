//! API client configuration.

use clap::Args;

/// Backend API connection settings.
#[derive(Debug, Clone, Args)]
pub struct ApiConfig {
    /// Backend base URL
    #[arg(long, env = "API_BASE_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Bearer token for authenticated endpoints
    #[arg(long, env = "API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}
