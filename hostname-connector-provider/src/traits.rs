use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{CustomHostname, PaginatedResponse, PaginationParams, ResultInfo, Zone};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
    /// HTTP 状态码
    pub http_status: Option<u16>,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            http_status: None,
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            http_status: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }
}

/// 错误上下文信息（内部使用）
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Zone ID（用于 `ZoneNotFound`）
    pub zone_id: Option<String>,
    /// Custom hostname ID（用于 `HostnameNotFound`）
    pub hostname_id: Option<String>,
}

impl ErrorContext {
    pub fn zone(zone_id: &str) -> Self {
        Self {
            zone_id: Some(zone_id.to_string()),
            hostname_id: None,
        }
    }

    pub fn hostname(zone_id: &str, hostname_id: &str) -> Self {
        Self {
            zone_id: Some(zone_id.to_string()),
            hostname_id: Some(hostname_id.to_string()),
        }
    }
}

/// 错误映射 Trait（内部使用）
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Read-only Cloudflare API surface used by the custom hostname table.
///
/// [`CloudflareClient`](crate::CloudflareClient) is the HTTP implementation;
/// tests substitute in-memory fakes.
#[async_trait]
pub trait CloudflareApi: Send + Sync {
    /// 验证凭证是否有效
    async fn verify_token(&self) -> Result<bool>;

    /// 获取 zone 列表 (分页)
    async fn list_zones(&self, params: &PaginationParams) -> Result<PaginatedResponse<Zone>>;

    /// Fetches one page (1-indexed) of a zone's custom hostnames together with
    /// the paging metadata needed to decide whether to continue.
    async fn list_custom_hostnames(
        &self,
        zone_id: &str,
        page: u32,
    ) -> Result<(Vec<CustomHostname>, ResultInfo)>;

    /// 获取单个 custom hostname
    async fn get_custom_hostname(&self, zone_id: &str, hostname_id: &str)
    -> Result<CustomHostname>;
}
