use crate::transport::{blocking_client, describe, log_outcome};
use pushover_core::config::PushoverConfig;
use pushover_core::notify::entity::NotificationRequest;
use pushover_core::notify::error::NotifyError;
use pushover_core::notify::result::NotificationResult;
use pushover_core::notify::wire::prepare;
use tracing::{debug, warn};

/// # Summary
/// A notifier that sends via the Pushover messages API and blocks the calling thread.
///
/// # Invariants
/// * The body is always `application/x-www-form-urlencoded`; attachments are not sent.
/// * Must not be used from inside an async runtime; use `PushoverNotifier` there.
pub struct BlockingPushoverNotifier {
    /// The blocking HTTP client.
    client: reqwest::blocking::Client,
    /// The messages endpoint.
    endpoint: String,
}

impl BlockingPushoverNotifier {
    /// # Summary
    /// Creates a new `BlockingPushoverNotifier`.
    ///
    /// # Arguments
    /// * `config` - Endpoint, timeout and user agent settings.
    ///
    /// # Returns
    /// * A new instance or `NotifyError::Config`.
    pub fn new(config: &PushoverConfig) -> Result<Self, NotifyError> {
        Ok(Self {
            client: blocking_client(config)?,
            endpoint: config.endpoint.clone(),
        })
    }

    /// # Summary
    /// Sends a notification, returning once the remote call has finished.
    ///
    /// # Logic
    /// 1. Validates the request; a validation failure returns before any I/O.
    /// 2. POSTs the wire fields form-encoded.
    /// 3. Maps the HTTP status and body to a terminal `NotificationResult`.
    ///
    /// # Arguments
    /// * `request` - The notification to send. `request.attachment` is ignored.
    ///
    /// # Returns
    /// * A completed `NotificationResult`.
    pub fn send(&self, request: &NotificationRequest) -> NotificationResult {
        let fields = match prepare(request) {
            Ok(fields) => fields,
            Err(e) => return NotificationResult::failed(e, None),
        };
        if request.attachment.is_some() {
            warn!("Attachments are only uploaded by the async notifier; ignoring attachment");
        }

        let pairs: Vec<(&'static str, String)> = fields.into_iter().collect();
        debug!(priority = %request.priority, "Submitting Pushover notification");

        let response = match self.client.post(&self.endpoint).form(&pairs).send() {
            Ok(response) => response,
            Err(e) => {
                let message = describe(&e);
                warn!("Pushover transport error: {}", message);
                return NotificationResult::failed(NotifyError::Transport(message), None);
            }
        };

        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        log_outcome(NotificationResult::from_response(status, &body))
    }
}
