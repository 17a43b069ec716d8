//! Cloudflare error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::CloudflareClient;

/// Cloudflare error code mapping
/// Reference: <https://developers.cloudflare.com/fundamentals/api/troubleshooting/>
impl ProviderErrorMapper for CloudflareClient {
    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // Authentication error
            // 6003: Invalid request headers
            // 6103: Invalid format for X-Auth-Key header
            // 6111: Invalid format for Authorization header
            // 9109: Unauthorized to access requested resource
            // 10000: Authentication error
            Some("6003" | "6103" | "6111" | "9109" | "10000") => {
                ProviderError::InvalidCredentials {
                    provider: self.provider_name().to_string(),
                    raw_message: Some(raw.message),
                }
            }

            // 7003: Could not route to /path, perhaps your object identifier is invalid?
            // on a hostname lookup it points at the hostname id
            Some("7003") if context.hostname_id.is_some() => ProviderError::HostnameNotFound {
                provider: self.provider_name().to_string(),
                hostname_id: context
                    .hostname_id
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // Zone does not exist
            // 1003: Invalid or missing zone id
            // 7000: No route for that URI
            Some("1003" | "7000" | "7003") => ProviderError::ZoneNotFound {
                provider: self.provider_name().to_string(),
                zone_id: context.zone_id.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // 1436: The custom hostname was not found
            Some("1436") => ProviderError::HostnameNotFound {
                provider: self.provider_name().to_string(),
                hostname_id: context
                    .hostname_id
                    .unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // Unmapped code on a 403: token lacks the SSL and Certificates read scope
            _ if raw.http_status == Some(403) => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}
