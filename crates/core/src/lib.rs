//! # `pushover-core` - Pushover 通知领域模型
//!
//! 定义通知请求、线格式字段 (wire fields)、发送结果与错误类型，
//! 以及供传输适配器实现的 `Notifier` 端口。本 crate 不做任何网络 I/O。

pub mod config;
pub mod notify;
