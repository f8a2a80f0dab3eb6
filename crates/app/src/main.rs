use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use pushover_core::config::PushoverConfig;
use pushover_core::notify::entity::{
    DEFAULT_EMERGENCY_EXPIRE, DEFAULT_EMERGENCY_RETRY, NotificationRequest, Priority, Sound,
};
use pushover_core::notify::port::Notifier;
use pushover_core::notify::result::NotificationResult;
use pushover_notify::blocking::BlockingPushoverNotifier;
use pushover_notify::pushover::PushoverNotifier;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 手动验证 Pushover 客户端的命令行工具
#[derive(Parser, Debug)]
#[command(name = "pushover", version, about = "Send a test notification through Pushover")]
struct Cli {
    /// Application API token
    #[arg(long)]
    token: String,
    /// Recipient user or group key
    #[arg(long)]
    user: String,
    /// Message body (truncated to 512 characters)
    #[arg(long)]
    message: String,
    #[arg(long)]
    title: Option<String>,
    /// lowest, low, normal, high or emergency
    #[arg(long, default_value = "normal")]
    priority: Priority,
    /// Sound keyword, or "default" to use the device setting
    #[arg(long, default_value = "default")]
    sound: Sound,
    /// Target device name
    #[arg(long)]
    device: Option<String>,
    #[arg(long)]
    url: Option<String>,
    #[arg(long)]
    url_title: Option<String>,
    /// Emergency retry interval in seconds (30-3600)
    #[arg(long, default_value_t = DEFAULT_EMERGENCY_RETRY)]
    retry: u32,
    /// Emergency expiry in seconds (60-86400)
    #[arg(long, default_value_t = DEFAULT_EMERGENCY_EXPIRE)]
    expire: u32,
    /// File to attach (async multipart upload only)
    #[arg(long, conflicts_with = "blocking")]
    attachment: Option<PathBuf>,
    /// Use the blocking form-encoded sender
    #[arg(long)]
    blocking: bool,
    /// Override the messages endpoint
    #[arg(long)]
    endpoint: Option<String>,
    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl Cli {
    /// # Summary
    /// 检查必填项，与服务端的必填约束一致。
    ///
    /// # Returns
    /// * `Err(msg)` - 第一个缺失的必填项说明。
    fn check_mandatory(&self) -> Result<(), String> {
        if self.token.trim().is_empty() {
            return Err("Application token is a mandatory field.".to_string());
        }
        if self.user.trim().is_empty() {
            return Err("User key is a mandatory field.".to_string());
        }
        if self.message.trim().is_empty() {
            return Err("Message body is a mandatory field.".to_string());
        }
        Ok(())
    }

    fn config(&self) -> PushoverConfig {
        let mut config = match &self.endpoint {
            Some(endpoint) => PushoverConfig::with_endpoint(endpoint.clone()),
            None => PushoverConfig::default(),
        };
        config.timeout_secs = self.timeout;
        config
    }

    fn request(&self) -> NotificationRequest {
        let mut request = NotificationRequest::new(&self.token, &self.user, &self.message)
            .with_priority(self.priority)
            .with_sound(self.sound)
            .with_retry(self.retry)
            .with_expire(self.expire);
        request.title = self.title.clone();
        request.device = self.device.clone();
        request.url = self.url.clone();
        request.url_title = self.url_title.clone();
        request.attachment = self.attachment.clone();
        request
    }
}

/// # Summary
/// 应用启动入口。
///
/// # Logic
/// 1. 初始化全局日志。
/// 2. 解析命令行并检查必填项。
/// 3. 按 `--blocking` 选择阻塞式或异步发送器。
/// 4. 输出结果，失败时以非零状态码退出。
#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // 1. 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 2. 解析参数
    let cli = Cli::parse();
    if let Err(msg) = cli.check_mandatory() {
        report_missing(&msg);
        return Ok(ExitCode::from(2));
    }

    let config = cli.config();
    let request = cli.request();
    info!(priority = %request.priority, blocking = cli.blocking, "Sending notification");

    // 3. 发送
    let result = if cli.blocking {
        // 阻塞式客户端的创建、使用与销毁都必须在运行时之外的线程上
        tokio::task::spawn_blocking(move || {
            BlockingPushoverNotifier::new(&config).map(|notifier| notifier.send(&request))
        })
        .await??
    } else {
        let notifier: Arc<dyn Notifier> = Arc::new(PushoverNotifier::new(&config)?);
        notifier.notify(&request).await
    };

    // 4. 输出结果
    Ok(report(&result))
}

#[allow(clippy::print_stderr)]
fn report_missing(msg: &str) {
    eprintln!("Data missing: {}", msg);
}

#[allow(clippy::print_stdout)]
fn report(result: &NotificationResult) -> ExitCode {
    if result.is_success() {
        println!(
            "Your message was sent to Pushover successfully. Please check your device(s) to confirm receipt."
        );
        if let Some(id) = result.response().and_then(|m| m.request_id.as_deref()) {
            println!("Request: {}", id);
        }
        if let Some(receipt) = result.response().and_then(|m| m.receipt.as_deref()) {
            println!("Receipt: {}", receipt);
        }
        return ExitCode::SUCCESS;
    }

    match result.error() {
        Some(e) => println!(
            "Your message was not sent successfully. An error was detected with the message: {}",
            e
        ),
        None => println!(
            "Your message was not sent successfully. Unfortunately, Pushover did not return an error with details."
        ),
    }
    ExitCode::FAILURE
}
