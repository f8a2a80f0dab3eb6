use crate::attachment::{ATTACHMENT_FILE_NAME, ATTACHMENT_MIME, read_attachment};
use crate::transport::{async_client, describe, log_outcome};
use async_trait::async_trait;
use pushover_core::config::PushoverConfig;
use pushover_core::notify::entity::NotificationRequest;
use pushover_core::notify::error::NotifyError;
use pushover_core::notify::port::Notifier;
use pushover_core::notify::result::NotificationResult;
use pushover_core::notify::wire::{WireFields, prepare};
use reqwest::multipart::{Form, Part};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// # Summary
/// 通过 Pushover 消息接口发送通知的异步实现。
///
/// # Invariants
/// - 请求体总是 `multipart/form-data`，附件作为 `attachment` 部分上传。
/// - 内部的 `reqwest::Client` 不可变，克隆开销很小，可在多个任务间共享。
/// - 每次发送只发起一次 POST，不重试。
#[derive(Clone)]
pub struct PushoverNotifier {
    /// The HTTP client used for requests.
    client: reqwest::Client,
    /// The messages endpoint.
    endpoint: String,
}

impl PushoverNotifier {
    /// # Summary
    /// Creates a new `PushoverNotifier`.
    ///
    /// # Logic
    /// Builds a TLS 1.2+ HTTP client from the configuration.
    ///
    /// # Arguments
    /// * `config` - Endpoint, timeout and user agent settings.
    ///
    /// # Returns
    /// * A new instance of `PushoverNotifier` or `NotifyError::Config`.
    pub fn new(config: &PushoverConfig) -> Result<Self, NotifyError> {
        Ok(Self {
            client: async_client(config)?,
            endpoint: config.endpoint.clone(),
        })
    }

    /// # Summary
    /// Sends a notification and resolves once the remote call has finished.
    ///
    /// # Logic
    /// 1. Validates the request; a validation failure returns before any I/O.
    /// 2. Reads the attachment, if any, rejecting files over the size cap.
    /// 3. Encodes the wire fields as a multipart form and POSTs it.
    /// 4. Maps the HTTP status and body to a terminal `NotificationResult`.
    ///
    /// # Arguments
    /// * `request` - The notification to send.
    ///
    /// # Returns
    /// * A completed `NotificationResult`; transport errors and HTTP rejections are
    ///   reported as failures, never as panics.
    pub async fn send(&self, request: &NotificationRequest) -> NotificationResult {
        let fields = match prepare(request) {
            Ok(fields) => fields,
            Err(e) => return NotificationResult::failed(e, None),
        };

        let attachment = match &request.attachment {
            Some(path) => match read_attachment(path).await {
                Ok(bytes) => Some(bytes),
                Err(e) => return NotificationResult::failed(e, None),
            },
            None => None,
        };

        let form = match multipart_form(fields, attachment) {
            Ok(form) => form,
            Err(e) => return NotificationResult::failed(e, None),
        };

        debug!(
            priority = %request.priority,
            attachment = request.attachment.is_some(),
            "Submitting Pushover notification"
        );

        let response = match self.client.post(&self.endpoint).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => {
                let message = describe(&e);
                warn!("Pushover transport error: {}", message);
                return NotificationResult::failed(NotifyError::Transport(message), None);
            }
        };

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        log_outcome(NotificationResult::from_response(status, &body))
    }

    /// # Summary
    /// Starts a send on the tokio runtime and returns a handle to it.
    ///
    /// # Logic
    /// The request is moved into a spawned task so the caller is never blocked;
    /// the handle can be polled with `is_complete` or awaited with `wait`.
    /// Must be called from within a tokio runtime.
    ///
    /// # Arguments
    /// * `request` - The notification to send.
    ///
    /// # Returns
    /// * A `SendHandle` for the in-flight send.
    pub fn spawn(&self, request: NotificationRequest) -> SendHandle {
        let notifier = self.clone();
        SendHandle {
            task: tokio::spawn(async move { notifier.send(&request).await }),
        }
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn notify(&self, request: &NotificationRequest) -> NotificationResult {
        self.send(request).await
    }
}

/// # Summary
/// Handle to a notification being sent in the background.
///
/// # Invariants
/// - `wait` yields exactly one terminal result, even if the task panicked or was aborted.
pub struct SendHandle {
    task: JoinHandle<NotificationResult>,
}

impl SendHandle {
    /// Returns `true` once the send has resolved, for callers that poll.
    pub fn is_complete(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the terminal result.
    pub async fn wait(self) -> NotificationResult {
        match self.task.await {
            Ok(result) => result,
            Err(e) => {
                warn!("Pushover send task did not complete: {}", e);
                NotificationResult::failed(NotifyError::Aborted(e.to_string()), None)
            }
        }
    }
}

/// Encodes the wire fields as multipart text parts, followed by the attachment.
fn multipart_form(fields: WireFields, attachment: Option<Vec<u8>>) -> Result<Form, NotifyError> {
    let form = fields
        .into_iter()
        .fold(Form::new(), |form, (key, value)| form.text(key, value));

    match attachment {
        Some(bytes) => {
            let part = Part::bytes(bytes)
                .file_name(ATTACHMENT_FILE_NAME)
                .mime_str(ATTACHMENT_MIME)
                .map_err(|e| NotifyError::Attachment(format!("Failed to create multipart: {}", e)))?;
            Ok(form.part("attachment", part))
        }
        None => Ok(form),
    }
}
