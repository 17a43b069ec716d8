//! # hostname-connector-provider
//!
//! Read-only client for the parts of the Cloudflare v4 API that back the
//! `cloudflare_custom_hostname` table: zones and their custom hostnames.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hostname_connector_provider::{CloudflareApi, CloudflareClient, Credentials};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CloudflareClient::new(Credentials::ApiToken {
//!         api_token: "your-token".to_string(),
//!     })?;
//!
//!     let (hostnames, info) = client
//!         .list_custom_hostnames("023e105f4ecef8ad9ca31a8372d0c353", 1)
//!         .await?;
//!     for hostname in &hostnames {
//!         println!("{} ({})", hostname.hostname, hostname.status);
//!     }
//!     println!("page 1 of {}", info.total_pages);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError).
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are retried
//! with exponential backoff up to [`ClientOptions::max_retries`] times;
//! everything else is returned on the first failure.

mod cloudflare;
mod error;
mod factory;
mod http_client;
mod traits;
mod types;
mod utils;

pub use cloudflare::{CF_API_BASE, CloudflareClient};
pub use error::{ProviderError, Result};
pub use factory::create_client;
pub use traits::CloudflareApi;
pub use types::{
    ClientOptions, Credentials, CustomHostname, CustomHostnameSsl, CustomHostnameSslSettings,
    CustomHostnameStatus, PaginatedResponse, PaginationParams, ResultInfo, Zone,
};
pub use utils::log_sanitizer;
