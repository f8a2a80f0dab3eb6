use crate::notify::entity::{
    DEFAULT_EMERGENCY_EXPIRE, DEFAULT_EMERGENCY_RETRY, MAX_MESSAGE_CHARS, NotificationRequest,
    Priority,
};
use crate::notify::error::NotifyError;
use std::ops::RangeInclusive;

/// 紧急消息重复提醒间隔的合法区间（秒）
pub const EMERGENCY_RETRY_RANGE: RangeInclusive<u32> = 30..=3600;
/// 紧急消息过期时间的合法区间（秒）
pub const EMERGENCY_EXPIRE_RANGE: RangeInclusive<u32> = 60..=86400;

/// # Summary
/// 最终写入 POST 请求体的键值对集合。
///
/// # Invariants
/// - 键的顺序固定：token, user, message, priority, sound, title, device, url, url_title, retry, expire。
/// - 每个键最多出现一次。
/// - 同步与异步发送使用同一份字段集合，只是编码方式不同。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WireFields {
    fields: Vec<(&'static str, String)>,
}

impl WireFields {
    /// 按键查找字段值
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// 按发送顺序返回所有键
    pub fn keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(k, _)| *k).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.fields.push((key, value.into()));
    }

    fn push_non_empty(&mut self, key: &'static str, value: Option<&str>) {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.push(key, v);
        }
    }
}

impl IntoIterator for WireFields {
    type Item = (&'static str, String);
    type IntoIter = std::vec::IntoIter<(&'static str, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// # Summary
/// 校验请求中唯一会导致硬失败的约束。
///
/// # Logic
/// 1. `url_title` 非空而 `url` 为空时返回 `Validation` 错误。
/// 2. 过长的正文与越界的 retry/expire 不在此处报错，由 `normalize` 静默修正。
///
/// # Returns
/// * `Ok(())` - 请求可以发送。
/// * `Err(NotifyError::Validation)` - URL 标题缺少对应 URL。
pub fn validate(request: &NotificationRequest) -> Result<(), NotifyError> {
    let has_url = request.url.as_deref().is_some_and(|u| !u.is_empty());
    let has_url_title = request.url_title.as_deref().is_some_and(|t| !t.is_empty());
    if has_url_title && !has_url {
        return Err(NotifyError::Validation(
            "If a URL title is specified, a URL must also be specified.".to_string(),
        ));
    }
    Ok(())
}

/// # Summary
/// 将请求映射为线格式字段。
///
/// # Logic
/// 1. token/user/截断后的 message/priority 总是包含。
/// 2. 非 `DeviceDefault` 时包含 sound 关键字。
/// 3. title/device/url/url_title 仅在非空时包含。
/// 4. 仅 `Emergency` 优先级包含修正后的 retry 与 expire。
///
/// # Arguments
/// * `request` - 待发送的请求，不会被修改。
///
/// # Returns
/// 按固定顺序排列的 `WireFields`。
pub fn normalize(request: &NotificationRequest) -> WireFields {
    let mut fields = WireFields::default();
    fields.push("token", request.token.as_str());
    fields.push("user", request.user.as_str());
    fields.push("message", truncate_message(&request.message));
    fields.push("priority", request.priority.wire_value().to_string());
    if let Some(keyword) = request.sound.keyword() {
        fields.push("sound", keyword);
    }
    fields.push_non_empty("title", request.title.as_deref());
    fields.push_non_empty("device", request.device.as_deref());
    fields.push_non_empty("url", request.url.as_deref());
    fields.push_non_empty("url_title", request.url_title.as_deref());
    if request.priority == Priority::Emergency {
        fields.push("retry", clamp_retry(request.retry).to_string());
        fields.push("expire", clamp_expire(request.expire).to_string());
    }
    fields
}

/// # Summary
/// 校验并映射请求，两条发送路径共用的入口。
///
/// # Returns
/// * `Ok(WireFields)` - 校验通过后的字段集合。
/// * `Err(NotifyError::Validation)` - 校验失败，调用方不得发起网络请求。
pub fn prepare(request: &NotificationRequest) -> Result<WireFields, NotifyError> {
    validate(request)?;
    Ok(normalize(request))
}

/// 保留正文的前 512 个字符
pub fn truncate_message(message: &str) -> String {
    match message.char_indices().nth(MAX_MESSAGE_CHARS) {
        Some((cut, _)) => message[..cut].to_string(),
        None => message.to_string(),
    }
}

/// 越界的 retry 值替换为默认值 120
pub fn clamp_retry(retry: u32) -> u32 {
    if EMERGENCY_RETRY_RANGE.contains(&retry) {
        retry
    } else {
        DEFAULT_EMERGENCY_RETRY
    }
}

/// 越界的 expire 值替换为默认值 3600
pub fn clamp_expire(expire: u32) -> u32 {
    if EMERGENCY_EXPIRE_RANGE.contains(&expire) {
        expire
    } else {
        DEFAULT_EMERGENCY_EXPIRE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::entity::Sound;

    #[test]
    fn test_minimal_request_fields() {
        let req = NotificationRequest::new("abc", "xyz", "hello");
        let fields = normalize(&req);
        assert_eq!(fields.keys(), vec!["token", "user", "message", "priority"]);
        assert_eq!(fields.get("token"), Some("abc"));
        assert_eq!(fields.get("user"), Some("xyz"));
        assert_eq!(fields.get("message"), Some("hello"));
        assert_eq!(fields.get("priority"), Some("0"));
    }

    #[test]
    fn test_emergency_out_of_range_values_fall_back_to_defaults() {
        let req = NotificationRequest::new("abc", "xyz", "hello")
            .with_priority(Priority::Emergency)
            .with_retry(5000)
            .with_expire(86_401);
        let fields = normalize(&req);
        assert_eq!(fields.get("priority"), Some("2"));
        assert_eq!(fields.get("retry"), Some("120"));
        assert_eq!(fields.get("expire"), Some("3600"));
    }

    #[test]
    fn test_expire_of_100_is_within_range_and_kept() {
        let req = NotificationRequest::new("abc", "xyz", "hello")
            .with_priority(Priority::Emergency)
            .with_retry(5000)
            .with_expire(100);
        let fields = normalize(&req);
        assert_eq!(fields.get("retry"), Some("120"));
        assert_eq!(fields.get("expire"), Some("100"));
    }

    #[test]
    fn test_emergency_in_range_values_are_kept() {
        let req = NotificationRequest::new("abc", "xyz", "hello")
            .with_priority(Priority::Emergency)
            .with_retry(30)
            .with_expire(86400);
        let fields = normalize(&req);
        assert_eq!(fields.get("retry"), Some("30"));
        assert_eq!(fields.get("expire"), Some("86400"));
    }

    #[test]
    fn test_clamp_boundaries() {
        assert_eq!(clamp_retry(29), 120);
        assert_eq!(clamp_retry(30), 30);
        assert_eq!(clamp_retry(3600), 3600);
        assert_eq!(clamp_retry(3601), 120);
        assert_eq!(clamp_expire(59), 3600);
        assert_eq!(clamp_expire(60), 60);
        assert_eq!(clamp_expire(86401), 3600);
    }

    #[test]
    fn test_non_emergency_never_sends_retry_or_expire() {
        for priority in [Priority::Lowest, Priority::Low, Priority::Normal, Priority::High] {
            let req = NotificationRequest::new("abc", "xyz", "hello")
                .with_priority(priority)
                .with_retry(60)
                .with_expire(600);
            let fields = normalize(&req);
            assert!(!fields.contains("retry"), "{:?}", priority);
            assert!(!fields.contains("expire"), "{:?}", priority);
        }
    }

    #[test]
    fn test_sound_field() {
        let req = NotificationRequest::new("abc", "xyz", "hello").with_sound(Sound::SpaceAlarm);
        assert_eq!(normalize(&req).get("sound"), Some("spacealarm"));

        let req = NotificationRequest::new("abc", "xyz", "hello").with_sound(Sound::DeviceDefault);
        assert!(!normalize(&req).contains("sound"));
    }

    #[test]
    fn test_long_message_is_truncated_to_512_chars() {
        let long = "é".repeat(600);
        let req = NotificationRequest::new("abc", "xyz", long.clone());
        let fields = normalize(&req);
        let sent = fields.get("message").unwrap();
        assert_eq!(sent.chars().count(), 512);
        assert!(long.starts_with(sent));

        let exact = "a".repeat(512);
        assert_eq!(truncate_message(&exact), exact);
    }

    #[test]
    fn test_optional_fields_skip_empty_strings() {
        let req = NotificationRequest::new("abc", "xyz", "hello")
            .with_title("")
            .with_device("phone")
            .with_url("https://example.com")
            .with_url_title("Example");
        let fields = normalize(&req);
        assert!(!fields.contains("title"));
        assert_eq!(
            fields.keys(),
            vec!["token", "user", "message", "priority", "device", "url", "url_title"]
        );
    }

    #[test]
    fn test_url_title_without_url_is_rejected() {
        let req = NotificationRequest::new("abc", "xyz", "hello").with_url_title("Example");
        assert!(matches!(validate(&req), Err(NotifyError::Validation(_))));

        let req = NotificationRequest::new("abc", "xyz", "hello")
            .with_url("")
            .with_url_title("Example");
        assert!(matches!(prepare(&req), Err(NotifyError::Validation(_))));
    }

    #[test]
    fn test_soft_corrections_do_not_fail_validation() {
        let req = NotificationRequest::new("abc", "xyz", "x".repeat(1000))
            .with_priority(Priority::Emergency)
            .with_retry(1)
            .with_expire(1);
        assert!(validate(&req).is_ok());
        let req = NotificationRequest::new("abc", "xyz", "hello").with_url("https://example.com");
        assert!(validate(&req).is_ok());
    }
}
