//! # `pushover-notify` - Pushover 传输适配器
//!
//! 实现 `pushover-core` 中的 `Notifier` 端口：
//! - `pushover::PushoverNotifier`：异步 multipart 发送，支持附件与可轮询的发送句柄。
//! - `blocking::BlockingPushoverNotifier`：阻塞式 form-urlencoded 发送。
//!
//! 两条路径共用 `pushover_core::notify::wire::prepare` 产出的字段集合。

pub mod attachment;
pub mod blocking;
pub mod pushover;
mod transport;
