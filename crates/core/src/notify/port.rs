use crate::notify::entity::NotificationRequest;
use crate::notify::result::NotificationResult;
use async_trait::async_trait;

/// # Summary
/// 发送通知到外部推送服务的接口定义。
///
/// # Invariants
/// - 实现必须是 `Send` 和 `Sync` 以支持并发调用。
/// - 每次调用至多发起一次出站请求，不做重试。
/// - 无论成功、远端拒绝还是传输失败，都必须返回一个已完成的结果，不得 panic。
#[async_trait]
pub trait Notifier: Send + Sync {
    /// # Summary
    /// 发送一条通知。
    ///
    /// # Logic
    /// 1. 校验请求，失败时直接返回，不进行任何网络 I/O。
    /// 2. 按目标平台要求编码字段并发送。
    /// 3. 将传输结果归一化为 `NotificationResult`。
    ///
    /// # Arguments
    /// * `request` - 通知请求。
    ///
    /// # Returns
    /// * 终态的 `NotificationResult`。
    async fn notify(&self, request: &NotificationRequest) -> NotificationResult;
}
