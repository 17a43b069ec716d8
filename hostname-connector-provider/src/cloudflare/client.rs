//! Cloudflare `CloudflareApi` trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{CloudflareApi, ErrorContext, ProviderErrorMapper};
use crate::types::{
    Credentials, CustomHostname, PaginatedResponse, PaginationParams, ResultInfo, Zone,
};

use super::{CUSTOM_HOSTNAMES_PER_PAGE, CloudflareClient, MAX_PAGE_SIZE_ZONES, TokenVerification};

impl CloudflareClient {
    /// Encodes one path segment; empty identifiers are rejected up front so
    /// they can never collapse into a different endpoint.
    fn path_segment(&self, param: &str, value: &str) -> Result<String> {
        if value.trim().is_empty() {
            return Err(ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: param.to_string(),
                detail: "must not be empty".to_string(),
            });
        }
        Ok(urlencoding::encode(value).into_owned())
    }

    /// One page of a zone's custom hostnames; page 0 is read as page 1.
    fn custom_hostnames_path(&self, zone_id: &str, page: u32) -> Result<String> {
        let zone = self.path_segment("zone_id", zone_id)?;
        Ok(format!(
            "/zones/{zone}/custom_hostnames?page={}&per_page={CUSTOM_HOSTNAMES_PER_PAGE}",
            page.max(1)
        ))
    }

    fn custom_hostname_path(&self, zone_id: &str, hostname_id: &str) -> Result<String> {
        let zone = self.path_segment("zone_id", zone_id)?;
        let id = self.path_segment("id", hostname_id)?;
        Ok(format!("/zones/{zone}/custom_hostnames/{id}"))
    }
}

#[async_trait]
impl CloudflareApi for CloudflareClient {
    async fn verify_token(&self) -> Result<bool> {
        let outcome = match &self.credentials {
            Credentials::ApiToken { .. } => self
                .get::<TokenVerification>("/user/tokens/verify", ErrorContext::default())
                .await
                .map(|(verification, _)| verification.status == "active"),
            // global keys have no verify endpoint; reading the user proves them
            Credentials::ApiKey { .. } => self
                .get::<serde_json::Value>("/user", ErrorContext::default())
                .await
                .map(|_| true),
        };

        match outcome {
            Err(
                ProviderError::InvalidCredentials { .. } | ProviderError::PermissionDenied { .. },
            ) => Ok(false),
            other => other,
        }
    }

    async fn list_zones(&self, params: &PaginationParams) -> Result<PaginatedResponse<Zone>> {
        let params = params.validated(MAX_PAGE_SIZE_ZONES);
        let path = format!("/zones?page={}&per_page={}", params.page, params.page_size);

        let (zones, info): (Vec<Zone>, _) = self.get(&path, ErrorContext::default()).await?;
        let total_count = info.map_or(0, |i| i.total_count);

        Ok(PaginatedResponse::new(
            zones,
            params.page,
            params.page_size,
            total_count,
        ))
    }

    async fn list_custom_hostnames(
        &self,
        zone_id: &str,
        page: u32,
    ) -> Result<(Vec<CustomHostname>, ResultInfo)> {
        let path = self.custom_hostnames_path(zone_id, page)?;
        let (hostnames, info) = self.get(&path, ErrorContext::zone(zone_id)).await?;
        Ok((hostnames, info.unwrap_or_default()))
    }

    async fn get_custom_hostname(
        &self,
        zone_id: &str,
        hostname_id: &str,
    ) -> Result<CustomHostname> {
        let path = self.custom_hostname_path(zone_id, hostname_id)?;
        let (hostname, _) = self
            .get(&path, ErrorContext::hostname(zone_id, hostname_id))
            .await?;
        Ok(hostname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CloudflareClient {
        CloudflareClient::new(Credentials::ApiToken {
            api_token: String::new(),
        })
        .unwrap()
    }

    #[test]
    fn path_segment_encodes_reserved_characters() {
        assert_eq!(client().path_segment("id", "a/b c").unwrap(), "a%2Fb%20c");
    }

    #[test]
    fn custom_hostnames_path_requests_fifty_per_page() {
        let c = client();
        assert_eq!(
            c.custom_hostnames_path("023e105f4ecef8ad9ca31a8372d0c353", 3).unwrap(),
            "/zones/023e105f4ecef8ad9ca31a8372d0c353/custom_hostnames?page=3&per_page=50"
        );
        assert_eq!(
            c.custom_hostnames_path("z1", 0).unwrap(),
            "/zones/z1/custom_hostnames?page=1&per_page=50"
        );
    }

    #[test]
    fn custom_hostname_paths_encode_identifiers() {
        let c = client();
        assert_eq!(
            c.custom_hostnames_path("zone/../x", 1).unwrap(),
            "/zones/zone%2F..%2Fx/custom_hostnames?page=1&per_page=50"
        );
        assert_eq!(
            c.custom_hostname_path("z 1", "h?1").unwrap(),
            "/zones/z%201/custom_hostnames/h%3F1"
        );
        assert!(matches!(
            c.custom_hostname_path("z1", ""),
            Err(ProviderError::InvalidParameter { param, .. }) if param == "id"
        ));
    }

    #[test]
    fn path_segment_rejects_blank_identifiers() {
        let err = client().path_segment("zone_id", "  ").unwrap_err();
        assert!(matches!(
            err,
            ProviderError::InvalidParameter { param, .. } if param == "zone_id"
        ));
    }

    #[tokio::test]
    async fn get_with_empty_hostname_id_fails_before_any_request() {
        let err = client().get_custom_hostname("zone", "").await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::InvalidParameter { param, .. } if param == "id"
        ));
    }
}
