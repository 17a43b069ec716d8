//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use hostname_connector_provider::{CloudflareApi, ClientOptions, Credentials, create_client};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 测试上下文 - 封装 API 客户端和测试 zone
pub struct TestContext {
    pub api: Arc<dyn CloudflareApi>,
    pub zone_id: String,
}

impl TestContext {
    /// 从 `CLOUDFLARE_API_TOKEN` / `TEST_ZONE_ID` 创建测试上下文
    pub fn from_env() -> Option<Self> {
        let api_token = env::var("CLOUDFLARE_API_TOKEN").ok()?;
        let zone_id = env::var("TEST_ZONE_ID").ok()?;

        let api = create_client(
            Credentials::ApiToken { api_token },
            ClientOptions::default(),
        )
        .ok()?;

        Some(Self { api, zone_id })
    }

    /// 取测试 zone 第一页的第一个 custom hostname ID
    pub async fn first_hostname_id(&self) -> Option<String> {
        let (hostnames, _) = self
            .api
            .list_custom_hostnames(&self.zone_id, 1)
            .await
            .ok()?;
        hostnames.into_iter().next().map(|h| h.id)
    }
}
