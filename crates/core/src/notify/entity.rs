use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// 消息正文的最大字符数，超出部分被静默截断
pub const MAX_MESSAGE_CHARS: usize = 512;
/// 紧急消息重复提醒间隔的默认值（秒）
pub const DEFAULT_EMERGENCY_RETRY: u32 = 120;
/// 紧急消息过期时间的默认值（秒）
pub const DEFAULT_EMERGENCY_EXPIRE: u32 = 3600;
/// 附件大小上限（2.5 MiB）
pub const MAX_ATTACHMENT_BYTES: u64 = 2_621_440;

/// # Summary
/// 消息优先级。
///
/// # Invariants
/// - 线格式编码为连续整数区间 -2..=2：
///   `Lowest`→-2, `Low`→-1, `Normal`→0, `High`→1, `Emergency`→2。
/// - 仅 `Emergency` 需要 `retry`/`expire` 字段。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    // 不产生任何提醒
    Lowest,
    // 静默提醒
    Low,
    // 普通提醒
    #[default]
    Normal,
    // 绕过用户的免打扰时段
    High,
    // 重复提醒直到用户确认
    Emergency,
}

impl Priority {
    /// 远端接口要求的整数值
    pub fn wire_value(self) -> i8 {
        match self {
            Priority::Lowest => -2,
            Priority::Low => -1,
            Priority::Normal => 0,
            Priority::High => 1,
            Priority::Emergency => 2,
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lowest" | "-2" => Ok(Priority::Lowest),
            "low" | "-1" => Ok(Priority::Low),
            "normal" | "0" => Ok(Priority::Normal),
            "high" | "1" => Ok(Priority::High),
            "emergency" | "2" => Ok(Priority::Emergency),
            _ => Err(format!("Unknown Priority: {}", s)),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Lowest => write!(f, "lowest"),
            Priority::Low => write!(f, "low"),
            Priority::Normal => write!(f, "normal"),
            Priority::High => write!(f, "high"),
            Priority::Emergency => write!(f, "emergency"),
        }
    }
}

/// # Summary
/// 提醒音效。
///
/// # Invariants
/// - 除 `DeviceDefault` 外，每个值都对应一个小写的接口关键字。
/// - `DeviceDefault` 表示不发送 `sound` 字段，由接收设备自行决定。
/// - `None` 是远端定义的"静音"音效，关键字为 `none`，与 `DeviceDefault` 不同。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Sound {
    Pushover,
    Bike,
    Bugle,
    CashRegister,
    Classical,
    Cosmic,
    Falling,
    Gamelan,
    Incoming,
    Intermission,
    Magic,
    Mechanical,
    PianoBar,
    Siren,
    SpaceAlarm,
    TugBoat,
    Alien,
    Climb,
    Persistent,
    Echo,
    UpDown,
    None,
    #[default]
    DeviceDefault,
}

impl Sound {
    /// 所有可选音效，顺序与远端文档一致
    pub const ALL: [Sound; 23] = [
        Sound::Pushover,
        Sound::Bike,
        Sound::Bugle,
        Sound::CashRegister,
        Sound::Classical,
        Sound::Cosmic,
        Sound::Falling,
        Sound::Gamelan,
        Sound::Incoming,
        Sound::Intermission,
        Sound::Magic,
        Sound::Mechanical,
        Sound::PianoBar,
        Sound::Siren,
        Sound::SpaceAlarm,
        Sound::TugBoat,
        Sound::Alien,
        Sound::Climb,
        Sound::Persistent,
        Sound::Echo,
        Sound::UpDown,
        Sound::None,
        Sound::DeviceDefault,
    ];

    /// # Summary
    /// 返回音效的接口关键字。
    ///
    /// # Returns
    /// * `Some(keyword)` - 需要发送的小写关键字。
    /// * `None` - `DeviceDefault`，不发送该字段。
    pub fn keyword(self) -> Option<&'static str> {
        let keyword = match self {
            Sound::Pushover => "pushover",
            Sound::Bike => "bike",
            Sound::Bugle => "bugle",
            Sound::CashRegister => "cashregister",
            Sound::Classical => "classical",
            Sound::Cosmic => "cosmic",
            Sound::Falling => "falling",
            Sound::Gamelan => "gamelan",
            Sound::Incoming => "incoming",
            Sound::Intermission => "intermission",
            Sound::Magic => "magic",
            Sound::Mechanical => "mechanical",
            Sound::PianoBar => "pianobar",
            Sound::Siren => "siren",
            Sound::SpaceAlarm => "spacealarm",
            Sound::TugBoat => "tugboat",
            Sound::Alien => "alien",
            Sound::Climb => "climb",
            Sound::Persistent => "persistent",
            Sound::Echo => "echo",
            Sound::UpDown => "updown",
            Sound::None => "none",
            Sound::DeviceDefault => return None,
        };
        Some(keyword)
    }
}

impl FromStr for Sound {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_'))
            .collect();
        match normalized.as_str() {
            "default" | "devicedefault" | "device-default" => Ok(Sound::DeviceDefault),
            other => Sound::ALL
                .iter()
                .copied()
                .find(|sound| sound.keyword() == Some(other))
                .ok_or_else(|| format!("Unknown Sound: {}", s)),
        }
    }
}

impl std::fmt::Display for Sound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword().unwrap_or("device-default"))
    }
}

/// # Summary
/// 一次通知发送请求。
///
/// # Invariants
/// - `token`、`user`、`message` 为必填项，由 `new` 传入。
/// - 其余字段都有默认值；空字符串与 `None` 等价，不会出现在线格式字段中。
/// - 每次发送构造新的请求，请求对象本身不被发送流程修改。
///
/// # Defaults
/// * `title`, `device`, `url`, `url_title` - `None`
/// * `priority` - `Priority::Normal`
/// * `sound` - `Sound::DeviceDefault`
/// * `retry` - 120 秒（仅紧急消息发送，合法区间 30..=3600）
/// * `expire` - 3600 秒（仅紧急消息发送，合法区间 60..=86400）
/// * `attachment` - `None`（仅异步 multipart 发送使用）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationRequest {
    // 应用 API token
    pub token: String,
    // 接收者的 user/group key
    pub user: String,
    // 消息正文
    pub message: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub sound: Sound,
    // 目标设备名称
    #[serde(default)]
    pub device: Option<String>,
    // 附加链接
    #[serde(default)]
    pub url: Option<String>,
    // 附加链接的标题，要求 `url` 非空
    #[serde(default)]
    pub url_title: Option<String>,
    #[serde(default = "default_retry")]
    pub retry: u32,
    #[serde(default = "default_expire")]
    pub expire: u32,
    // 本地附件路径
    #[serde(default)]
    pub attachment: Option<PathBuf>,
}

fn default_retry() -> u32 {
    DEFAULT_EMERGENCY_RETRY
}

fn default_expire() -> u32 {
    DEFAULT_EMERGENCY_EXPIRE
}

impl NotificationRequest {
    /// # Summary
    /// 以必填字段创建请求，其余字段取默认值。
    ///
    /// # Arguments
    /// * `token` - 应用 API token。
    /// * `user` - 接收者 key。
    /// * `message` - 消息正文，超过 512 个字符的部分在发送时被截断。
    pub fn new(token: impl Into<String>, user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: user.into(),
            message: message.into(),
            title: None,
            priority: Priority::default(),
            sound: Sound::default(),
            device: None,
            url: None,
            url_title: None,
            retry: DEFAULT_EMERGENCY_RETRY,
            expire: DEFAULT_EMERGENCY_EXPIRE,
            attachment: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_sound(mut self, sound: Sound) -> Self {
        self.sound = sound;
        self
    }

    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_url_title(mut self, url_title: impl Into<String>) -> Self {
        self.url_title = Some(url_title.into());
        self
    }

    /// 紧急消息的重复提醒间隔（秒），越界时发送默认值 120
    pub fn with_retry(mut self, retry: u32) -> Self {
        self.retry = retry;
        self
    }

    /// 紧急消息的过期时间（秒），越界时发送默认值 3600
    pub fn with_expire(mut self, expire: u32) -> Self {
        self.expire = expire;
        self
    }

    pub fn with_attachment(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachment = Some(path.into());
        self
    }
}
