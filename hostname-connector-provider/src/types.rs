use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::log_sanitizer::mask_secret;

// ============ Pagination ============

/// Pagination parameters for list operations.
///
/// Pages are 1-indexed.
///
/// # Default
///
/// The default is `page = 1, page_size = 20`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

impl PaginationParams {
    /// Clamp pagination values to valid ranges.
    ///
    /// - `page` is clamped to `>= 1`
    /// - `page_size` is clamped to `1..=max_page_size`
    #[must_use]
    pub fn validated(&self, max_page_size: u32) -> Self {
        Self {
            page: self.page.max(1),
            page_size: self.page_size.clamp(1, max_page_size),
        }
    }
}

/// A paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Current page number.
    pub page: u32,
    /// Page size used for this request.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total_count: u32,
    /// Whether there are more pages after this one.
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response, automatically computing [`has_more`](Self::has_more).
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: u32) -> Self {
        let has_more = page.saturating_mul(page_size) < total_count;
        Self {
            items,
            page,
            page_size,
            total_count,
            has_more,
        }
    }
}

/// Paging metadata Cloudflare attaches to list responses (`result_info`).
///
/// Missing fields decode as `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub total_pages: u32,
}

// ============ Credentials ============

/// Cloudflare authentication material.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    /// Scoped API token, sent as `Authorization: Bearer`.
    ApiToken { api_token: String },
    /// Legacy global API key, sent as `X-Auth-Email` / `X-Auth-Key`.
    ApiKey { email: String, api_key: String },
}

// secrets stay out of Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiToken { api_token } => f
                .debug_struct("ApiToken")
                .field("api_token", &mask_secret(api_token))
                .finish(),
            Self::ApiKey { email, api_key } => f
                .debug_struct("ApiKey")
                .field("email", email)
                .field("api_key", &mask_secret(api_key))
                .finish(),
        }
    }
}

/// Transport settings for [`CloudflareClient`](crate::CloudflareClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// API root, without trailing slash.
    pub base_url: String,
    /// Retries for transient failures (network, timeout, HTTP 429/5xx gateway).
    pub max_retries: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: crate::CF_API_BASE.to_string(),
            max_retries: 3,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

// ============ Zone ============

/// A Cloudflare zone, the parent of custom hostnames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
}

// ============ Custom Hostname ============

/// Lifecycle state of a custom hostname.
///
/// Backed by the wire string: unrecognised values survive in
/// [`Other`](Self::Other) and serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CustomHostnameStatus {
    Active,
    Pending,
    ActiveRedeploying,
    Moved,
    PendingDeletion,
    Deleted,
    PendingBlocked,
    PendingMigration,
    PendingProvisioned,
    TestPending,
    TestActive,
    TestActiveApex,
    TestBlocked,
    TestFailed,
    Provisioned,
    Blocked,
    Other(String),
}

impl CustomHostnameStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::ActiveRedeploying => "active_redeploying",
            Self::Moved => "moved",
            Self::PendingDeletion => "pending_deletion",
            Self::Deleted => "deleted",
            Self::PendingBlocked => "pending_blocked",
            Self::PendingMigration => "pending_migration",
            Self::PendingProvisioned => "pending_provisioned",
            Self::TestPending => "test_pending",
            Self::TestActive => "test_active",
            Self::TestActiveApex => "test_active_apex",
            Self::TestBlocked => "test_blocked",
            Self::TestFailed => "test_failed",
            Self::Provisioned => "provisioned",
            Self::Blocked => "blocked",
            Self::Other(s) => s,
        }
    }
}

impl Default for CustomHostnameStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for CustomHostnameStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => Self::Active,
            "pending" => Self::Pending,
            "active_redeploying" => Self::ActiveRedeploying,
            "moved" => Self::Moved,
            "pending_deletion" => Self::PendingDeletion,
            "deleted" => Self::Deleted,
            "pending_blocked" => Self::PendingBlocked,
            "pending_migration" => Self::PendingMigration,
            "pending_provisioned" => Self::PendingProvisioned,
            "test_pending" => Self::TestPending,
            "test_active" => Self::TestActive,
            "test_active_apex" => Self::TestActiveApex,
            "test_blocked" => Self::TestBlocked,
            "test_failed" => Self::TestFailed,
            "provisioned" => Self::Provisioned,
            "blocked" => Self::Blocked,
            _ => Self::Other(s),
        }
    }
}

impl From<CustomHostnameStatus> for String {
    fn from(status: CustomHostnameStatus) -> Self {
        match status {
            CustomHostnameStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CustomHostnameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Edge TLS settings attached to a custom hostname certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomHostnameSslSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_1_3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_tls_version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ciphers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_hints: Option<String>,
}

/// SSL configuration of a custom hostname.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomHostnameSsl {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    /// Domain control validation method (`http`, `txt`, `email`).
    #[serde(default)]
    pub method: String,
    /// Certificate type, currently always `dv`.
    #[serde(rename = "type", default)]
    pub ssl_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard: Option<bool>,
    #[serde(default)]
    pub certificate_authority: String,
    #[serde(default)]
    pub settings: CustomHostnameSslSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname_target: Option<String>,
}

/// A customer-supplied hostname served through a zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomHostname {
    pub id: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub custom_origin_server: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_origin_sni: Option<String>,
    #[serde(default)]
    pub status: CustomHostnameStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl: Option<CustomHostnameSsl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_known_and_unknown_values() {
        let known: CustomHostnameStatus = serde_json::from_str("\"pending_deletion\"").unwrap();
        assert_eq!(known, CustomHostnameStatus::PendingDeletion);
        assert_eq!(serde_json::to_string(&known).unwrap(), "\"pending_deletion\"");

        let other: CustomHostnameStatus = serde_json::from_str("\"brand_new\"").unwrap();
        assert_eq!(other, CustomHostnameStatus::Other("brand_new".to_string()));
        assert_eq!(other.as_str(), "brand_new");
    }

    #[test]
    fn custom_hostname_decodes_api_payload() {
        let json = r#"{
            "id": "0d89c70d-ad9f-4843-b99f-6cc0252067e9",
            "hostname": "app.example.com",
            "custom_origin_server": "origin.example.net",
            "status": "active",
            "created_at": "2020-02-06T18:11:23.531995Z",
            "ssl": {
                "id": "0d89c70d-ad9f-4843-b99f-6cc0252067e9",
                "status": "pending_validation",
                "method": "http",
                "type": "dv",
                "wildcard": false,
                "certificate_authority": "google",
                "settings": {
                    "http2": "on",
                    "min_tls_version": "1.2",
                    "tls_1_3": "on",
                    "ciphers": ["ECDHE-RSA-AES128-GCM-SHA256", "AES128-SHA"]
                }
            }
        }"#;

        let hostname: CustomHostname = serde_json::from_str(json).unwrap();
        assert_eq!(hostname.status, CustomHostnameStatus::Active);
        assert_eq!(hostname.custom_origin_server, "origin.example.net");
        assert!(hostname.created_at.is_some());

        let ssl = hostname.ssl.unwrap();
        assert_eq!(ssl.ssl_type, "dv");
        assert_eq!(ssl.wildcard, Some(false));
        assert_eq!(ssl.certificate_authority, "google");
        assert_eq!(ssl.settings.min_tls_version.as_deref(), Some("1.2"));
        assert_eq!(ssl.settings.ciphers.len(), 2);
    }

    #[test]
    fn custom_hostname_without_ssl_or_timestamp() {
        let json = r#"{"id": "abc", "hostname": "a.example.com", "status": "pending"}"#;
        let hostname: CustomHostname = serde_json::from_str(json).unwrap();
        assert!(hostname.ssl.is_none());
        assert!(hostname.created_at.is_none());
        assert_eq!(hostname.custom_origin_server, "");
    }

    #[test]
    fn result_info_defaults_missing_fields() {
        let info: ResultInfo = serde_json::from_str(r#"{"page": 2, "per_page": 50}"#).unwrap();
        assert_eq!(info.page, 2);
        assert_eq!(info.total_pages, 0);
    }

    #[test]
    fn credentials_debug_hides_secrets() {
        let token = Credentials::ApiToken {
            api_token: "secret-token".to_string(),
        };
        let key = Credentials::ApiKey {
            email: "ops@example.com".to_string(),
            api_key: "secret-key".to_string(),
        };
        assert!(!format!("{token:?}").contains("secret-token"));
        let key_debug = format!("{key:?}");
        assert!(key_debug.contains("ops@example.com"));
        assert!(!key_debug.contains("secret-key"));
    }

    #[test]
    fn paginated_response_has_more() {
        let page = PaginatedResponse::new(vec![1, 2], 1, 2, 5);
        assert!(page.has_more);
        let last = PaginatedResponse::new(vec![5], 3, 2, 5);
        assert!(!last.has_more);
    }
}
