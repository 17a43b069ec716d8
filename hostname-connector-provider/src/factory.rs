//! Client factory.

use std::sync::Arc;

use crate::cloudflare::CloudflareClient;
use crate::error::Result;
use crate::traits::CloudflareApi;
use crate::types::{ClientOptions, Credentials};

/// Creates a shareable [`CloudflareApi`] from credentials and transport options.
///
/// # Examples
///
/// ```rust,no_run
/// use hostname_connector_provider::{create_client, ClientOptions, Credentials};
///
/// let api = create_client(
///     Credentials::ApiToken { api_token: "your-token".to_string() },
///     ClientOptions::default(),
/// ).unwrap();
/// ```
pub fn create_client(
    credentials: Credentials,
    options: ClientOptions,
) -> Result<Arc<dyn CloudflareApi>> {
    Ok(Arc::new(CloudflareClient::with_options(credentials, options)?))
}
