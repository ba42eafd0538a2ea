//! # 文件内容数据模型
//!
//! 不同类别的文件读取后得到不同形态的内容，统一用 `Content` 枚举表示。
//!
//! ## 依赖关系
//! - 被 `codecs/` 和 `file.rs` 使用
//! - 无外部模块依赖

/// 媒体文件（图像/音频/视频）的原始数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaData {
    /// 子类型，例如 png, mpeg
    pub format: String,
    /// 文件原始字节
    pub bytes: Vec<u8>,
}

impl MediaData {
    pub fn new(format: impl Into<String>, bytes: Vec<u8>) -> Self {
        MediaData {
            format: format.into(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// CSV 表格
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    /// 表头（`has_headers = false` 时为空）
    pub headers: Option<Vec<String>>,
    /// 数据行
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new(headers: Option<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        CsvTable { headers, rows }
    }
}

/// 文件内容
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Image(MediaData),
    Audio(MediaData),
    Video(MediaData),
    Json(serde_json::Value),
    Xml(String),
    Text(String),
    Csv(CsvTable),
}

impl Content {
    /// 内容种类名称
    pub fn kind(&self) -> &'static str {
        match self {
            Content::Image(_) => "image",
            Content::Audio(_) => "audio",
            Content::Video(_) => "video",
            Content::Json(_) => "json",
            Content::Xml(_) => "xml",
            Content::Text(_) => "text",
            Content::Csv(_) => "csv",
        }
    }

    /// 单行摘要，用于终端显示
    pub fn summary(&self) -> String {
        match self {
            Content::Image(m) | Content::Audio(m) | Content::Video(m) => {
                format!("{} {} bytes", m.format, m.len())
            }
            Content::Json(value) => match value {
                serde_json::Value::Object(map) => format!("object with {} keys", map.len()),
                serde_json::Value::Array(items) => format!("array of {} items", items.len()),
                other => format!("scalar {}", other),
            },
            Content::Xml(text) => format!("{} characters of xml", text.chars().count()),
            Content::Text(text) => format!("{} lines", text.lines().count()),
            Content::Csv(table) => format!(
                "{} rows x {} columns",
                table.rows.len(),
                table
                    .headers
                    .as_ref()
                    .map(|h| h.len())
                    .or_else(|| table.rows.first().map(|r| r.len()))
                    .unwrap_or(0)
            ),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) | Content::Xml(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Content::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_csv(&self) -> Option<&CsvTable> {
        match self {
            Content::Csv(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_media(&self) -> Option<&MediaData> {
        match self {
            Content::Image(m) | Content::Audio(m) | Content::Video(m) => Some(m),
            _ => None,
        }
    }
}
