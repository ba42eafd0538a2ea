//! # 视频文件属性
//!
//! 报告容器格式；ISO-BMFF 容器（mp4, mov）额外读取 `ftyp` 盒中的主品牌。
//!
//! ## 依赖关系
//! - 被 `codecs/mod.rs` 注册为 video 属性提取器

use super::{read_bytes, PropertyExtractor};
use crate::error::Result;
use crate::models::{Category, Properties};

use std::path::Path;

/// 读取 `ftyp` 盒的主品牌，例如 `isom`, `qt  `
pub fn major_brand(bytes: &[u8]) -> Option<String> {
    if bytes.get(4..8)? != b"ftyp" {
        return None;
    }
    let brand = bytes.get(8..12)?;
    Some(String::from_utf8_lossy(brand).trim_end().to_string())
}

/// 视频属性提取器
pub struct VideoProperties;

impl PropertyExtractor for VideoProperties {
    fn extract(&self, path: &Path, category: &Category, properties: &mut Properties) -> Result<()> {
        properties.insert("container", category.secondary.as_str());

        if matches!(category.secondary.as_str(), "mp4" | "quicktime") {
            let bytes = read_bytes(path)?;
            if let Some(brand) = major_brand(&bytes) {
                properties.insert("major_brand", brand);
            }
        }

        Ok(())
    }
}
