use pushover_core::config::PushoverConfig;
use pushover_core::notify::error::NotifyError;
use pushover_core::notify::result::NotificationResult;
use reqwest::tls::Version;
use std::error::Error;

/// # Summary
/// 为 rustls 安装进程级的 ring 加密后端。
///
/// # Invariants
/// - reqwest 以 `rustls-no-provider` 编译，构建客户端前必须已有加密后端。
/// - 重复调用是安全的：已安装时保留先前的后端。
fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::trace!("rustls crypto provider already installed");
    }
}

/// # Summary
/// 构建异步 HTTP 客户端。
///
/// # Logic
/// 1. 安装加密后端。
/// 2. 强制 TLS 1.2 及以上版本。
/// 3. 仅在配置了超时时设置超时，默认不限时。
pub(crate) fn async_client(config: &PushoverConfig) -> Result<reqwest::Client, NotifyError> {
    install_crypto_provider();
    let mut builder = reqwest::Client::builder()
        .min_tls_version(Version::TLS_1_2)
        .user_agent(config.user_agent.as_str());
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| NotifyError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// # Summary
/// 构建阻塞式 HTTP 客户端。
///
/// # Invariants
/// - reqwest 的阻塞客户端默认 30 秒超时，这里显式传入配置值（`None` 即不限时），
///   保证两条发送路径的超时行为一致。
pub(crate) fn blocking_client(
    config: &PushoverConfig,
) -> Result<reqwest::blocking::Client, NotifyError> {
    install_crypto_provider();
    reqwest::blocking::Client::builder()
        .min_tls_version(Version::TLS_1_2)
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .build()
        .map_err(|e| NotifyError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// 将错误及其 source 链拼接成一条说明，保留底层原因
pub(crate) fn describe(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// 记录终态结果后原样返回
pub(crate) fn log_outcome(result: NotificationResult) -> NotificationResult {
    match result.error() {
        None => tracing::info!(
            request_id = result
                .response()
                .and_then(|m| m.request_id.as_deref())
                .unwrap_or("-"),
            "Pushover notification accepted"
        ),
        Some(e) => tracing::warn!("Pushover notification rejected: {}", e),
    }
    result
}
