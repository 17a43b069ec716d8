//! Cloudflare HTTP 请求方法

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::http_client::{HttpResponse, HttpUtils};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::types::{Credentials, ResultInfo};

use super::{CloudflareClient, CloudflareResponse};

impl CloudflareClient {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Credentials::ApiToken { api_token } => {
                request.header("Authorization", format!("Bearer {api_token}"))
            }
            Credentials::ApiKey { email, api_key } => request
                .header("X-Auth-Email", email)
                .header("X-Auth-Key", api_key),
        }
    }

    /// 执行 GET 请求，返回 `result` 与可选的 `result_info`
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<(T, Option<ResultInfo>)> {
        let url = format!("{}{path}", self.options.base_url);
        let request = self.authorize(self.client.get(&url));

        let response = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            "GET",
            &url,
            self.options.max_retries,
        )
        .await?;

        self.parse_envelope(&response, context)
    }

    /// Decodes the `{success, errors, result, result_info}` envelope.
    ///
    /// `success: false` is mapped through the error table using the first
    /// reported error. A body that is not an envelope at all is a parse error,
    /// unless the status already says the request failed.
    pub(crate) fn parse_envelope<T: DeserializeOwned>(
        &self,
        response: &HttpResponse,
        context: ErrorContext,
    ) -> Result<(T, Option<ResultInfo>)> {
        let envelope: CloudflareResponse<T> =
            match HttpUtils::parse_json(&response.body, self.provider_name()) {
                Ok(envelope) => envelope,
                Err(e) if response.status >= 400 => {
                    log::debug!("Non-envelope error body, mapping by status: {e}");
                    return Err(self.map_error(
                        RawApiError::new(format!("HTTP {}", response.status))
                            .with_status(response.status),
                        context,
                    ));
                }
                Err(e) => return Err(e),
            };

        if !envelope.success {
            let raw = envelope.errors.first().map_or_else(
                || RawApiError::new("Unknown error"),
                |e| RawApiError::with_code(e.code.to_string(), e.message.clone()),
            );
            let err = self.map_error(raw.with_status(response.status), context);
            log_api_error(&err);
            return Err(err);
        }

        let result = envelope
            .result
            .ok_or_else(|| self.parse_error("响应中缺少 result 字段"))?;

        Ok((result, envelope.result_info))
    }
}

fn log_api_error(err: &ProviderError) {
    if err.is_expected() {
        log::warn!("API 错误: {err}");
    } else {
        log::error!("API 错误: {err}");
    }
}
