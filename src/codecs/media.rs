//! # 媒体文件编解码器
//!
//! 图像、音频、视频文件以原始字节形式读写，不做像素/采样级解码。
//! 对已知签名的格式（PNG, GIF, BMP, JPEG, WAV）读取时校验文件头。
//!
//! ## 依赖关系
//! - 被 `codecs/mod.rs` 注册
//! - 使用 `codecs/image.rs`, `codecs/audio.rs` 的文件头识别

use super::{read_bytes, wrong_content, write_bytes, Codec, ReadOptions, WriteOptions};
use crate::error::{GcuError, Result};
use crate::models::{Category, Content, MediaData};

use std::path::Path;

/// 媒体种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Audio,
    Video,
}

/// 原始字节媒体编解码器
pub struct MediaCodec {
    kind: MediaKind,
}

impl MediaCodec {
    pub fn image() -> Self {
        MediaCodec {
            kind: MediaKind::Image,
        }
    }

    pub fn audio() -> Self {
        MediaCodec {
            kind: MediaKind::Audio,
        }
    }

    pub fn video() -> Self {
        MediaCodec {
            kind: MediaKind::Video,
        }
    }

    fn wrap(&self, data: MediaData) -> Content {
        match self.kind {
            MediaKind::Image => Content::Image(data),
            MediaKind::Audio => Content::Audio(data),
            MediaKind::Video => Content::Video(data),
        }
    }

    fn unwrap<'a>(&self, content: &'a Content) -> Option<&'a MediaData> {
        match (self.kind, content) {
            (MediaKind::Image, Content::Image(m))
            | (MediaKind::Audio, Content::Audio(m))
            | (MediaKind::Video, Content::Video(m)) => Some(m),
            _ => None,
        }
    }

    /// 已知格式的文件头校验
    fn check_signature(&self, subtype: &str, bytes: &[u8]) -> std::result::Result<(), String> {
        let ok = match (self.kind, subtype) {
            (MediaKind::Image, "png") => super::image::is_png(bytes),
            (MediaKind::Image, "gif") => super::image::is_gif(bytes),
            (MediaKind::Image, "bmp") => super::image::is_bmp(bytes),
            (MediaKind::Image, "jpeg") => super::image::is_jpeg(bytes),
            (MediaKind::Audio, "x-wav") => super::audio::is_wav(bytes),
            _ => true,
        };
        if ok {
            Ok(())
        } else {
            Err(format!("file header does not match {}", subtype))
        }
    }
}

impl Codec for MediaCodec {
    fn name(&self) -> &'static str {
        "media"
    }

    fn read(&self, path: &Path, category: &Category, _options: &ReadOptions) -> Result<Content> {
        let bytes = read_bytes(path)?;

        self.check_signature(&category.secondary, &bytes)
            .map_err(|reason| GcuError::DecodeError {
                format: category.mime(),
                path: path.display().to_string(),
                reason,
            })?;

        Ok(self.wrap(MediaData::new(category.secondary.clone(), bytes)))
    }

    fn write(&self, path: &Path, content: &Content, _options: &WriteOptions) -> Result<()> {
        let data = self
            .unwrap(content)
            .ok_or_else(|| wrong_content(content_label(self.kind), path, content))?;
        write_bytes(path, &data.bytes)
    }
}

fn content_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image",
        MediaKind::Audio => "audio",
        MediaKind::Video => "video",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::image::tests::tiny_png;

    #[test]
    fn test_read_write_png() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.png");
        std::fs::write(&src, tiny_png(3, 2)).unwrap();

        let codec = MediaCodec::image();
        let category = Category::new("image", "png");
        let content = codec.read(&src, &category, &ReadOptions::default()).unwrap();

        let data = content.as_media().unwrap();
        assert_eq!(data.format, "png");
        assert_eq!(data.bytes, tiny_png(3, 2));

        let dst = dir.path().join("b.png");
        codec.write(&dst, &content, &WriteOptions::default()).unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), tiny_png(3, 2));
    }

    #[test]
    fn test_bad_signature_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("fake.png");
        std::fs::write(&src, b"definitely not a png").unwrap();

        let result = MediaCodec::image().read(
            &src,
            &Category::new("image", "png"),
            &ReadOptions::default(),
        );
        assert!(matches!(result, Err(GcuError::DecodeError { .. })));
    }

    #[test]
    fn test_write_rejects_other_content() {
        let dir = tempfile::tempdir().unwrap();
        let result = MediaCodec::audio().write(
            &dir.path().join("x.wav"),
            &Content::Text("hello".into()),
            &WriteOptions::default(),
        );
        assert!(matches!(result, Err(GcuError::EncodeError { .. })));
    }
}
