//! # 结构化文本编解码器 (JSON, XML)
//!
//! - JSON 使用 `serde_json` 解析为 `serde_json::Value`
//! - XML 以文本保留，读取时只检查是否为标记文本
//!
//! ## 依赖关系
//! - 被 `codecs/mod.rs` 注册
//! - 使用 `serde_json`

use super::{read_string, wrong_content, write_bytes, Codec, ReadOptions, WriteOptions};
use crate::error::{GcuError, Result};
use crate::models::{Category, Content};

use std::path::Path;

/// JSON 编解码器
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn read(&self, path: &Path, _category: &Category, _options: &ReadOptions) -> Result<Content> {
        let text = read_string(path, "json")?;
        let value = serde_json::from_str(&text).map_err(|e| GcuError::DecodeError {
            format: "json".to_string(),
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Content::Json(value))
    }

    fn write(&self, path: &Path, content: &Content, options: &WriteOptions) -> Result<()> {
        let value = content
            .as_json()
            .ok_or_else(|| wrong_content("json", path, content))?;

        let mut text = if options.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        text.push('\n');

        write_bytes(path, text.as_bytes())
    }
}

/// XML 编解码器
pub struct XmlCodec;

impl Codec for XmlCodec {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn read(&self, path: &Path, _category: &Category, _options: &ReadOptions) -> Result<Content> {
        let text = read_string(path, "xml")?;
        let trimmed = text.trim();
        if !(trimmed.starts_with('<') && trimmed.ends_with('>')) {
            return Err(GcuError::DecodeError {
                format: "xml".to_string(),
                path: path.display().to_string(),
                reason: "document is not markup".to_string(),
            });
        }
        Ok(Content::Xml(text))
    }

    fn write(&self, path: &Path, content: &Content, _options: &WriteOptions) -> Result<()> {
        match content {
            Content::Xml(text) => write_bytes(path, text.as_bytes()),
            other => Err(wrong_content("xml", path, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let content = Content::Json(json!({"name": "gcu", "tags": [1, 2, 3]}));

        JsonCodec
            .write(&path, &content, &WriteOptions::default())
            .unwrap();
        let read = JsonCodec
            .read(
                &path,
                &Category::new("application", "json"),
                &ReadOptions::default(),
            )
            .unwrap();
        assert_eq!(read, content);
    }

    #[test]
    fn test_compact_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let options = WriteOptions {
            pretty: false,
            ..Default::default()
        };
        JsonCodec
            .write(&path, &Content::Json(json!({"a": 1})), &options)
            .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"a\":1}\n");
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = JsonCodec.read(
            &path,
            &Category::new("application", "json"),
            &ReadOptions::default(),
        );
        assert!(matches!(result, Err(GcuError::DecodeError { .. })));
    }

    #[test]
    fn test_xml_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.xml");
        std::fs::write(&path, "<?xml version=\"1.0\"?>\n<root><a/></root>\n").unwrap();

        let content = XmlCodec
            .read(
                &path,
                &Category::new("application", "xml"),
                &ReadOptions::default(),
            )
            .unwrap();
        assert!(content.as_text().unwrap().contains("<root>"));

        std::fs::write(&path, "plain words").unwrap();
        let result = XmlCodec.read(
            &path,
            &Category::new("application", "xml"),
            &ReadOptions::default(),
        );
        assert!(result.is_err());
    }
}
