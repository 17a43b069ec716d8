//! Cloudflare API client

mod client;
mod error;
mod http;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::{ClientOptions, Credentials};

pub(crate) use types::{CloudflareResponse, TokenVerification};

/// Cloudflare v4 API root
pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// Zones API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 50;
/// Custom hostnames are always requested 50 per page
pub(crate) const CUSTOM_HOSTNAMES_PER_PAGE: u32 = 50;

/// Read-only Cloudflare API client
pub struct CloudflareClient {
    pub(crate) client: Client,
    pub(crate) credentials: Credentials,
    pub(crate) options: ClientOptions,
}

impl CloudflareClient {
    /// Builds a client against the public API with default timeouts and retries.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_options(credentials, ClientOptions::default())
    }

    pub fn with_options(credentials: Credentials, options: ClientOptions) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(options.connect_timeout_secs))
            .timeout(Duration::from_secs(options.request_timeout_secs))
            .build()
            .map_err(|e| ProviderError::NetworkError {
                provider: "cloudflare".to_string(),
                detail: format!("Failed to create HTTP client: {e}"),
            })?;

        let options = ClientOptions {
            base_url: options.base_url.trim_end_matches('/').to_string(),
            ..options
        };

        Ok(Self {
            client,
            credentials,
            options,
        })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }
}
