use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pushover 消息接口的固定地址
pub const PUSHOVER_MESSAGES_URL: &str = "https://api.pushover.net/1/messages.json";

/// # Summary
/// 通知客户端配置。
///
/// # Invariants
/// - 库本身不读取配置文件或环境变量，配置由调用方构造后传入。
/// - 默认值与远端服务的原始行为一致：无超时，固定地址。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PushoverConfig {
    /// 消息接口地址，默认为 Pushover 官方地址。仅在接入测试桩时覆盖。
    pub endpoint: String,
    /// 单次请求超时（秒），`None` 表示不设超时。
    pub timeout_secs: Option<u64>,
    /// HTTP `User-Agent` 头。
    pub user_agent: String,
}

impl PushoverConfig {
    /// # Summary
    /// 以指定的接口地址创建配置，其余字段取默认值。
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// 请求超时，未配置时返回 `None`。
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for PushoverConfig {
    fn default() -> Self {
        Self {
            endpoint: PUSHOVER_MESSAGES_URL.to_string(),
            timeout_secs: None,
            user_agent: concat!("pushover-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PushoverConfig::default();
        assert_eq!(config.endpoint, "https://api.pushover.net/1/messages.json");
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.timeout(), None);
        assert!(config.user_agent.starts_with("pushover-rs/"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: PushoverConfig = serde_json::from_str(r#"{"timeout_secs": 15}"#).unwrap();
        assert_eq!(config.endpoint, PUSHOVER_MESSAGES_URL);
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_with_endpoint() {
        let config = PushoverConfig::with_endpoint("http://127.0.0.1:9000/1/messages.json");
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/1/messages.json");
        assert_eq!(config.timeout_secs, None);
    }
}
