use pushover_core::config::PushoverConfig;
use pushover_core::notify::entity::{NotificationRequest, Priority, Sound};
use pushover_core::notify::port::Notifier;
use pushover_notify::blocking::BlockingPushoverNotifier;
use pushover_notify::pushover::PushoverNotifier;
use std::env;

fn live_request(message: &str) -> NotificationRequest {
    dotenvy::dotenv().ok();
    let token = env::var("PUSHOVER_APP_TOKEN").expect("PUSHOVER_APP_TOKEN must be set");
    let user = env::var("PUSHOVER_USER_KEY").expect("PUSHOVER_USER_KEY must be set");
    NotificationRequest::new(token, user, message)
        .with_title("pushover-rs")
        .with_sound(Sound::Pushover)
}

/// # Summary
/// 集成测试：通过真实接口验证异步发送。
///
/// # Logic
/// 1. 加载 .env 环境变量。
/// 2. 从环境变量获取 App Token 和 User Key。
/// 3. 通过 `Notifier` 端口发送测试消息并断言结果。
#[tokio::test]
#[ignore] // 默认忽略，仅在手动测试时通过环境变量开启
async fn test_live_async_notification() {
    let notifier = PushoverNotifier::new(&PushoverConfig::default()).unwrap();
    let request = live_request("这是一条来自异步集成测试的消息").with_priority(Priority::Low);

    let result = notifier.notify(&request).await;

    assert!(result.is_success(), "Pushover notification failed: {:?}", result);
}

/// # Summary
/// 集成测试：通过真实接口验证阻塞式发送。
#[test]
#[ignore] // 默认忽略
fn test_live_blocking_notification() {
    let notifier = BlockingPushoverNotifier::new(&PushoverConfig::default()).unwrap();
    let request = live_request("这是一条来自阻塞式集成测试的消息");

    let result = notifier.send(&request);

    assert!(result.is_success(), "Pushover notification failed: {:?}", result);
}
