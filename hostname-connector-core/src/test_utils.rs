//! 测试辅助模块
//!
//! In-memory `CloudflareApi` with a call log and injectable failures.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use hostname_connector_provider::{
    CloudflareApi, CustomHostname, CustomHostnameSsl, CustomHostnameSslSettings,
    CustomHostnameStatus, PaginatedResponse, PaginationParams, ProviderError, Result, ResultInfo,
    Zone,
};
use tokio::sync::Mutex;

const MOCK_PER_PAGE: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListZones { page: u32 },
    ListCustomHostnames { zone_id: String, page: u32 },
    GetCustomHostname { zone_id: String, hostname_id: String },
}

// ===== MockCloudflareApi =====

#[derive(Default)]
pub struct MockCloudflareApi {
    zones: Vec<Zone>,
    hostname_pages: HashMap<String, Vec<Vec<CustomHostname>>>,
    page_failures: HashMap<(String, u32), ProviderError>,
    get_failure: Option<ProviderError>,
    calls: Mutex<Vec<ApiCall>>,
}

impl MockCloudflareApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zones(mut self, zones: Vec<Zone>) -> Self {
        self.zones = zones;
        self
    }

    /// `total_pages` reported for the zone is `pages.len()`.
    pub fn with_hostname_pages(mut self, zone_id: &str, pages: Vec<Vec<CustomHostname>>) -> Self {
        self.hostname_pages.insert(zone_id.to_string(), pages);
        self
    }

    pub fn fail_page(mut self, zone_id: &str, page: u32, error: ProviderError) -> Self {
        self.page_failures.insert((zone_id.to_string(), page), error);
        self
    }

    pub fn fail_get(mut self, error: ProviderError) -> Self {
        self.get_failure = Some(error);
        self
    }

    /// Zones given through `with_zones` or `with_hostname_pages`.
    fn owns_zone(&self, zone_id: &str) -> bool {
        self.hostname_pages.contains_key(zone_id) || self.zones.iter().any(|z| z.id == zone_id)
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().await.clone()
    }

    pub async fn zone_pages_requested(&self) -> Vec<u32> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|c| match c {
                ApiCall::ListZones { page } => Some(*page),
                _ => None,
            })
            .collect()
    }

    pub async fn hostname_pages_requested(&self, zone: &str) -> Vec<u32> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|c| match c {
                ApiCall::ListCustomHostnames { zone_id, page } if zone_id == zone => Some(*page),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl CloudflareApi for MockCloudflareApi {
    async fn verify_token(&self) -> Result<bool> {
        Ok(true)
    }

    async fn list_zones(&self, params: &PaginationParams) -> Result<PaginatedResponse<Zone>> {
        self.calls
            .lock()
            .await
            .push(ApiCall::ListZones { page: params.page });

        let start = ((params.page.max(1) - 1) * params.page_size) as usize;
        let items: Vec<Zone> = self
            .zones
            .iter()
            .skip(start)
            .take(params.page_size as usize)
            .cloned()
            .collect();
        let total = u32::try_from(self.zones.len()).unwrap_or(u32::MAX);

        Ok(PaginatedResponse::new(
            items,
            params.page,
            params.page_size,
            total,
        ))
    }

    async fn list_custom_hostnames(
        &self,
        zone_id: &str,
        page: u32,
    ) -> Result<(Vec<CustomHostname>, ResultInfo)> {
        self.calls.lock().await.push(ApiCall::ListCustomHostnames {
            zone_id: zone_id.to_string(),
            page,
        });

        if let Some(err) = self.page_failures.get(&(zone_id.to_string(), page)) {
            return Err(err.clone());
        }
        if !self.owns_zone(zone_id) {
            return Err(ProviderError::ZoneNotFound {
                provider: "cloudflare".to_string(),
                zone_id: zone_id.to_string(),
                raw_message: Some("Could not route to /zones".to_string()),
            });
        }

        let pages = self.hostname_pages.get(zone_id).cloned().unwrap_or_default();
        let items = pages
            .get(page.saturating_sub(1) as usize)
            .cloned()
            .unwrap_or_default();
        let total_count: usize = pages.iter().map(Vec::len).sum();

        let info = ResultInfo {
            page,
            per_page: MOCK_PER_PAGE,
            count: u32::try_from(items.len()).unwrap_or(u32::MAX),
            total_count: u32::try_from(total_count).unwrap_or(u32::MAX),
            total_pages: u32::try_from(pages.len()).unwrap_or(u32::MAX),
        };
        Ok((items, info))
    }

    async fn get_custom_hostname(
        &self,
        zone_id: &str,
        hostname_id: &str,
    ) -> Result<CustomHostname> {
        self.calls.lock().await.push(ApiCall::GetCustomHostname {
            zone_id: zone_id.to_string(),
            hostname_id: hostname_id.to_string(),
        });

        if let Some(err) = &self.get_failure {
            return Err(err.clone());
        }

        self.hostname_pages
            .get(zone_id)
            .into_iter()
            .flatten()
            .flatten()
            .find(|h| h.id == hostname_id)
            .cloned()
            .ok_or_else(|| ProviderError::HostnameNotFound {
                provider: "cloudflare".to_string(),
                hostname_id: hostname_id.to_string(),
                raw_message: None,
            })
    }
}

// ===== Fixtures =====

pub fn zone(id: &str) -> Zone {
    Zone {
        id: id.to_string(),
        name: format!("{id}.example.com"),
        status: "active".to_string(),
    }
}

pub fn hostname(id: &str, name: &str) -> CustomHostname {
    CustomHostname {
        id: id.to_string(),
        hostname: name.to_string(),
        status: CustomHostnameStatus::Pending,
        ..CustomHostname::default()
    }
}

pub fn hostname_with_ssl(id: &str) -> CustomHostname {
    CustomHostname {
        id: id.to_string(),
        hostname: format!("{id}.customer.example"),
        custom_origin_server: "origin.example.net".to_string(),
        custom_origin_sni: None,
        status: CustomHostnameStatus::Active,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single(),
        ssl: Some(CustomHostnameSsl {
            id: format!("ssl-{id}"),
            status: "active".to_string(),
            method: "txt".to_string(),
            ssl_type: "dv".to_string(),
            wildcard: Some(true),
            certificate_authority: "lets_encrypt".to_string(),
            settings: CustomHostnameSslSettings {
                http2: Some("on".to_string()),
                min_tls_version: Some("1.2".to_string()),
                ..CustomHostnameSslSettings::default()
            },
            bundle_method: None,
            cname_target: None,
        }),
    }
}
