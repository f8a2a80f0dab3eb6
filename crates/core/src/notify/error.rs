use thiserror::Error;

/// # Summary
/// 通知发送错误枚举。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
/// - `Validation`、`AttachmentTooLarge` 与 `Attachment` 均在任何网络 I/O 之前产生。
/// - 所有错误原样返回给调用方，库内不做重试。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// 请求参数不合法 (如设置了 URL 标题却没有 URL)
    #[error("Invalid argument: {0}")]
    Validation(String),

    /// 附件超过远端允许的大小上限
    #[error("Attachment size {size} exceeds Pushover limit of {limit} bytes")]
    AttachmentTooLarge { size: u64, limit: u64 },

    /// 附件文件无法读取
    #[error("Attachment error: {0}")]
    Attachment(String),

    /// 网络连接、TLS 或协议层错误
    #[error("Transport error: {0}")]
    Transport(String),

    /// 远端返回非成功状态码
    #[error("Pushover rejected the request with status {status}{}", detail_suffix(.detail))]
    RemoteRejection { status: u16, detail: Option<String> },

    /// 配置错误 (如 HTTP 客户端无法构建)
    #[error("Configuration error: {0}")]
    Config(String),

    /// 异步发送任务异常终止
    #[error("Send task aborted: {0}")]
    Aborted(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(": {}", d),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_with_and_without_detail() {
        let bare = NotifyError::RemoteRejection {
            status: 500,
            detail: None,
        };
        assert_eq!(bare.to_string(), "Pushover rejected the request with status 500");

        let detailed = NotifyError::RemoteRejection {
            status: 400,
            detail: Some("user key is invalid".to_string()),
        };
        assert_eq!(
            detailed.to_string(),
            "Pushover rejected the request with status 400: user key is invalid"
        );
    }

    #[test]
    fn test_attachment_too_large_message() {
        let err = NotifyError::AttachmentTooLarge {
            size: 2_621_441,
            limit: 2_621_440,
        };
        assert_eq!(
            err.to_string(),
            "Attachment size 2621441 exceeds Pushover limit of 2621440 bytes"
        );
    }
}
