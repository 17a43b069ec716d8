//! Cloudflare API 响应信封

use serde::Deserialize;

use crate::types::ResultInfo;

/// Cloudflare API 通用响应
#[derive(Debug, Deserialize)]
pub struct CloudflareResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<CloudflareError>,
    pub result_info: Option<ResultInfo>,
}

#[derive(Debug, Deserialize)]
pub struct CloudflareError {
    pub code: i64,
    pub message: String,
}

/// `/user/tokens/verify` result
#[derive(Debug, Deserialize)]
pub struct TokenVerification {
    pub status: String,
}
