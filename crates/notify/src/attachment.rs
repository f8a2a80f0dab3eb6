use pushover_core::notify::entity::MAX_ATTACHMENT_BYTES;
use pushover_core::notify::error::NotifyError;
use std::path::Path;
use tokio::io::AsyncReadExt;

/// multipart 中附件部分使用的文件名
pub const ATTACHMENT_FILE_NAME: &str = "image.jpeg";
/// multipart 中附件部分使用的 Content-Type
///
/// 无论文件的真实类型如何都声明为 JPEG，非 JPEG 附件在远端可能被误判。
pub const ATTACHMENT_MIME: &str = "image/jpeg";

/// # Summary
/// 读取附件的全部内容。
///
/// # Logic
/// 1. 打开文件并读取元数据中的大小，超过 2,621,440 字节时立即返回 `AttachmentTooLarge`。
/// 2. 读取至多上限加一个字节，读取期间文件变大同样判定为超限。
/// 3. 文件句柄在函数返回时释放，所有退出路径都不会泄漏。
///
/// # Arguments
/// * `path` - 本地文件路径。
///
/// # Returns
/// * `Ok(bytes)` - 文件内容。
/// * `Err(NotifyError::AttachmentTooLarge)` - 超过大小上限。
/// * `Err(NotifyError::Attachment)` - 文件无法打开或读取。
pub async fn read_attachment(path: &Path) -> Result<Vec<u8>, NotifyError> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| NotifyError::Attachment(format!("{}: {}", path.display(), e)))?;

    let size = file
        .metadata()
        .await
        .map_err(|e| NotifyError::Attachment(format!("{}: {}", path.display(), e)))?
        .len();
    check_size(size)?;

    let mut bytes = Vec::new();
    file.take(MAX_ATTACHMENT_BYTES + 1)
        .read_to_end(&mut bytes)
        .await
        .map_err(|e| NotifyError::Attachment(format!("{}: {}", path.display(), e)))?;
    check_size(u64::try_from(bytes.len()).unwrap_or(u64::MAX))?;

    Ok(bytes)
}

fn check_size(size: u64) -> Result<(), NotifyError> {
    if size > MAX_ATTACHMENT_BYTES {
        return Err(NotifyError::AttachmentTooLarge {
            size,
            limit: MAX_ATTACHMENT_BYTES,
        });
    }
    Ok(())
}
