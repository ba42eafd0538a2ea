//! # 图像文件属性
//!
//! 从文件头读取图像尺寸，不解码像素。
//!
//! ## 支持格式
//! - PNG: IHDR 块（宽、高、位深、颜色类型）
//! - GIF: 逻辑屏幕描述符
//! - BMP: BITMAPINFOHEADER
//! - JPEG: 第一个 SOFn 段
//!
//! ## 依赖关系
//! - 被 `codecs/mod.rs` 注册为 image 属性提取器
//! - 被 `codecs/media.rs` 用于文件头校验

use super::{read_bytes, PropertyExtractor};
use crate::error::Result;
use crate::models::{Category, Properties};

use std::path::Path;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}

pub fn is_gif(bytes: &[u8]) -> bool {
    bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a")
}

pub fn is_bmp(bytes: &[u8]) -> bool {
    bytes.starts_with(b"BM")
}

pub fn is_jpeg(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0xFF, 0xD8])
}

/// 图像尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// 按文件签名识别格式并读取尺寸
pub fn dimensions(bytes: &[u8]) -> Option<Dimensions> {
    if is_png(bytes) {
        png_dimensions(bytes)
    } else if is_gif(bytes) {
        gif_dimensions(bytes)
    } else if is_bmp(bytes) {
        bmp_dimensions(bytes)
    } else if is_jpeg(bytes) {
        jpeg_dimensions(bytes)
    } else {
        None
    }
}

fn be_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let b = bytes.get(at..at + 2)?;
    Some(u16::from_be_bytes([b[0], b[1]]))
}

fn be_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let b = bytes.get(at..at + 4)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

fn le_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let b = bytes.get(at..at + 2)?;
    Some(u16::from_le_bytes([b[0], b[1]]))
}

fn le_i32(bytes: &[u8], at: usize) -> Option<i32> {
    let b = bytes.get(at..at + 4)?;
    Some(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

fn png_dimensions(bytes: &[u8]) -> Option<Dimensions> {
    // 签名(8) + 长度(4) + "IHDR"(4)
    if bytes.get(12..16)? != b"IHDR" {
        return None;
    }
    Some(Dimensions {
        width: be_u32(bytes, 16)?,
        height: be_u32(bytes, 20)?,
    })
}

fn gif_dimensions(bytes: &[u8]) -> Option<Dimensions> {
    Some(Dimensions {
        width: le_u16(bytes, 6)? as u32,
        height: le_u16(bytes, 8)? as u32,
    })
}

fn bmp_dimensions(bytes: &[u8]) -> Option<Dimensions> {
    // 高度为负表示自上而下存储
    Some(Dimensions {
        width: le_i32(bytes, 18)?.unsigned_abs(),
        height: le_i32(bytes, 22)?.unsigned_abs(),
    })
}

fn jpeg_dimensions(bytes: &[u8]) -> Option<Dimensions> {
    let mut i = 2;
    while i + 3 < bytes.len() {
        if bytes[i] != 0xFF {
            return None;
        }
        let marker = bytes[i + 1];
        // 填充字节
        if marker == 0xFF {
            i += 1;
            continue;
        }
        // 无长度的独立标记
        if marker == 0x01 || (0xD0..=0xD9).contains(&marker) {
            i += 2;
            continue;
        }
        let len = be_u16(bytes, i + 2)? as usize;
        let is_sof = (0xC0..=0xCF).contains(&marker) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_sof {
            return Some(Dimensions {
                height: be_u16(bytes, i + 5)? as u32,
                width: be_u16(bytes, i + 7)? as u32,
            });
        }
        i += 2 + len;
    }
    None
}

/// 图像属性提取器
pub struct ImageProperties;

impl PropertyExtractor for ImageProperties {
    fn extract(&self, path: &Path, category: &Category, properties: &mut Properties) -> Result<()> {
        let bytes = read_bytes(path)?;

        properties.insert("format", category.secondary.as_str());

        if let Some(dims) = dimensions(&bytes) {
            properties.insert("width", dims.width);
            properties.insert("height", dims.height);
        }

        if is_png(&bytes) {
            if let (Some(depth), Some(color)) = (bytes.get(24), bytes.get(25)) {
                properties.insert("bit_depth", *depth as u32);
                properties.insert("color_type", png_color_type(*color));
            }
        }

        Ok(())
    }
}

fn png_color_type(code: u8) -> &'static str {
    match code {
        0 => "grayscale",
        2 => "rgb",
        3 => "indexed",
        4 => "grayscale-alpha",
        6 => "rgba",
        _ => "unknown",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 只含 IHDR 和 IEND 的最小 PNG 文件头（CRC 不校验）
    pub(crate) fn tiny_png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(b"IEND");
        bytes.extend_from_slice(&[0xAE, 0x42, 0x60, 0x82]);
        bytes
    }

    #[test]
    fn test_png_dimensions() {
        let dims = dimensions(&tiny_png(640, 480)).unwrap();
        assert_eq!(dims, Dimensions { width: 640, height: 480 });
    }

    #[test]
    fn test_gif_dimensions() {
        let mut gif = b"GIF89a".to_vec();
        gif.extend_from_slice(&17u16.to_le_bytes());
        gif.extend_from_slice(&9u16.to_le_bytes());
        assert_eq!(dimensions(&gif), Some(Dimensions { width: 17, height: 9 }));
    }

    #[test]
    fn test_bmp_top_down_height() {
        let mut bmp = vec![0u8; 26];
        bmp[0] = b'B';
        bmp[1] = b'M';
        bmp[18..22].copy_from_slice(&32i32.to_le_bytes());
        bmp[22..26].copy_from_slice(&(-16i32).to_le_bytes());
        assert_eq!(dimensions(&bmp), Some(Dimensions { width: 32, height: 16 }));
    }

    #[test]
    fn test_jpeg_dimensions_after_app0() {
        let mut jpeg = vec![0xFF, 0xD8];
        // APP0, 长度 16
        jpeg.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
        jpeg.extend_from_slice(&[0u8; 14]);
        // SOF0: 长度, 精度, 高, 宽
        jpeg.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
        jpeg.extend_from_slice(&200u16.to_be_bytes());
        jpeg.extend_from_slice(&300u16.to_be_bytes());
        jpeg.extend_from_slice(&[0u8; 10]);

        assert_eq!(
            dimensions(&jpeg),
            Some(Dimensions { width: 300, height: 200 })
        );
    }

    #[test]
    fn test_extract_png_properties() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.png");
        std::fs::write(&path, tiny_png(4, 5)).unwrap();

        let mut props = Properties::new();
        ImageProperties
            .extract(&path, &Category::new("image", "png"), &mut props)
            .unwrap();

        assert_eq!(props.get_int("width"), Some(4));
        assert_eq!(props.get_int("height"), Some(5));
        assert_eq!(props.get_int("bit_depth"), Some(8));
        assert_eq!(props.get("color_type").unwrap().to_string(), "rgba");
    }

    #[test]
    fn test_unknown_image_has_no_dimensions() {
        assert_eq!(dimensions(b"RIFF....WEBP"), None);
    }
}
