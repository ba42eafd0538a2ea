//! # 文件类别（MIME 类型）
//!
//! 根据文件名扩展名解析两级类别标签 `主类型/子类型`，例如 `image/png`。
//!
//! ## 解析规则
//! - 取最后一个 `.` 之后的扩展名，大小写不敏感
//! - 在静态映射表 `MIME_TABLE` 中查找
//! - 找不到映射（或没有扩展名）时返回 `GcuError::UnknownType`
//!
//! ## 依赖关系
//! - 被 `file.rs` 和 `codecs/` 使用
//! - 无外部模块依赖

use crate::error::{GcuError, Result};
use serde::Serialize;

/// 扩展名 -> MIME 类型映射表
const MIME_TABLE: &[(&str, &str)] = &[
    // 图像
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("jpe", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("ico", "image/vnd.microsoft.icon"),
    // 音频
    ("wav", "audio/x-wav"),
    ("mp3", "audio/mpeg"),
    ("ogg", "audio/ogg"),
    ("flac", "audio/flac"),
    ("aac", "audio/aac"),
    ("m4a", "audio/mp4"),
    // 视频
    ("mp4", "video/mp4"),
    ("m4v", "video/mp4"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("mkv", "video/x-matroska"),
    ("webm", "video/webm"),
    ("mpeg", "video/mpeg"),
    ("mpg", "video/mpeg"),
    // 应用
    ("json", "application/json"),
    ("xml", "application/xml"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("tar", "application/x-tar"),
    // 文本
    ("txt", "text/plain"),
    ("text", "text/plain"),
    ("log", "text/plain"),
    ("csv", "text/csv"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("md", "text/markdown"),
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("py", "text/x-python"),
];

/// 两级文件类别标签
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Category {
    /// 主类型 (image, audio, video, application, text)
    pub primary: String,
    /// 子类型 (png, json, csv, ...)
    pub secondary: String,
}

impl Category {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Category {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// 从 `主类型/子类型` 字符串解析
    pub fn parse(mime: &str) -> Option<Self> {
        let (primary, secondary) = mime.split_once('/')?;
        if primary.is_empty() || secondary.is_empty() {
            return None;
        }
        Some(Category::new(primary, secondary))
    }

    /// 从文件名推断类别
    pub fn from_filename(filename: &str) -> Result<Self> {
        let unknown = || GcuError::UnknownType {
            filename: filename.to_string(),
        };

        let ext = extension_of(filename).ok_or_else(unknown)?;
        let mime = lookup_mime(ext).ok_or_else(unknown)?;
        Category::parse(mime).ok_or_else(unknown)
    }

    /// 完整 MIME 字符串
    pub fn mime(&self) -> String {
        format!("{}/{}", self.primary, self.secondary)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.primary, self.secondary)
    }
}

/// 文件名中最后一个 `.` 之后的扩展名（隐藏文件如 `.bashrc` 没有扩展名）
pub fn extension_of(filename: &str) -> Option<&str> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
}

/// 在映射表中查找扩展名
fn lookup_mime(ext: &str) -> Option<&'static str> {
    let ext = ext.to_lowercase();
    MIME_TABLE
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}
