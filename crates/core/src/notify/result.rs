use crate::notify::error::NotifyError;
use serde::Deserialize;

/// # Summary
/// 远端响应的元数据。
///
/// # Invariants
/// - `http_status` 总是存在；其余字段来自响应体 JSON，解析失败时为空。
/// - 响应体无法解析不会改变发送结果的成败。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseMeta {
    pub http_status: u16,
    // 响应体中的 `status` 字段，1 表示接受
    pub api_status: Option<i64>,
    // 远端分配的请求 ID
    pub request_id: Option<String>,
    // 紧急消息的回执 ID
    pub receipt: Option<String>,
    pub errors: Vec<String>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    status: Option<i64>,
    request: Option<String>,
    receipt: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

impl ResponseMeta {
    /// # Summary
    /// 从 HTTP 状态码与响应体构造元数据。
    ///
    /// # Logic
    /// 1. 尝试将响应体按 messages.json 的格式解析。
    /// 2. 解析失败时只保留状态码。
    pub fn from_body(http_status: u16, body: &str) -> Self {
        match serde_json::from_str::<MessagesResponse>(body) {
            Ok(parsed) => Self {
                http_status,
                api_status: parsed.status,
                request_id: parsed.request,
                receipt: parsed.receipt,
                errors: parsed.errors,
            },
            Err(e) => {
                tracing::debug!("Unparseable Pushover response body: {}", e);
                Self {
                    http_status,
                    ..Self::default()
                }
            }
        }
    }

    /// 将远端返回的错误列表合并为一条说明
    pub fn error_detail(&self) -> Option<String> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self.errors.join("; "))
        }
    }
}

/// 发送结果的判别值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

/// # Summary
/// 一次发送的终态结果。
///
/// # Invariants
/// - 仅在发送流程的终点构造一次，之后不可修改。
/// - `Failed` 总是携带 `error`；`Succeeded` 从不携带。
/// - 返回给调用方的结果都已完成 (`is_complete() == true`)，
///   "仍在进行中" 只由未完成的发送句柄表示。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationResult {
    outcome: Outcome,
    error: Option<NotifyError>,
    response: Option<ResponseMeta>,
}

impl NotificationResult {
    pub fn succeeded(response: ResponseMeta) -> Self {
        Self {
            outcome: Outcome::Succeeded,
            error: None,
            response: Some(response),
        }
    }

    pub fn failed(error: NotifyError, response: Option<ResponseMeta>) -> Self {
        Self {
            outcome: Outcome::Failed,
            error: Some(error),
            response,
        }
    }

    /// # Summary
    /// 根据 HTTP 状态码与响应体得出终态结果。
    ///
    /// # Logic
    /// 1. 2xx 视为成功。
    /// 2. 其他状态码视为远端拒绝，附带响应体中的错误说明（若有）。
    pub fn from_response(http_status: u16, body: &str) -> Self {
        let meta = ResponseMeta::from_body(http_status, body);
        if (200..300).contains(&http_status) {
            Self::succeeded(meta)
        } else {
            let error = NotifyError::RemoteRejection {
                status: http_status,
                detail: meta.error_detail(),
            };
            Self::failed(error, Some(meta))
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Succeeded
    }

    pub fn error(&self) -> Option<&NotifyError> {
        self.error.as_ref()
    }

    pub fn response(&self) -> Option<&ResponseMeta> {
        self.response.as_ref()
    }

    /// 结果只在终点构造，因此总是已完成
    pub fn is_complete(&self) -> bool {
        true
    }

    /// 转换为 `Result`，便于调用方使用 `?`
    pub fn into_result(self) -> Result<Option<ResponseMeta>, NotifyError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.response),
        }
    }
}
