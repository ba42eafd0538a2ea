//! # 编解码器模块
//!
//! 按文件类别分派读取、写入和属性提取。分派表是数据而不是条件链：
//! 新格式通过 `CodecRegistry::register_codec` 注册即可，不需要修改控制流。
//!
//! ## 标准分派表
//! ```text
//! image/*           -> media (Image)
//! audio/*           -> media (Audio)
//! video/*           -> media (Video)
//! application/json  -> json
//! application/xml   -> xml
//! text/plain        -> text
//! text/csv          -> csv
//! 其他              -> Unsupported
//! ```
//!
//! 属性提取只按主类型分派：image/audio/video 各有专用提取器，
//! application 和 text 共用文本文件提取器。
//!
//! ## 依赖关系
//! - 被 `file.rs` 使用
//! - 使用 `models/`
//! - 子模块: media, image, audio, video, structured, text

pub mod audio;
pub mod image;
pub mod media;
pub mod structured;
pub mod text;
pub mod video;

use crate::error::{GcuError, Result};
use crate::models::{Category, Content, Properties};

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// 子类型通配符
pub const ANY_SUBTYPE: &str = "*";

/// 分派结果：已处理，或该类别没有注册处理器（软失败）
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch<T> {
    Handled(T),
    Unsupported(Category),
}

impl<T> Dispatch<T> {
    pub fn is_handled(&self) -> bool {
        matches!(self, Dispatch::Handled(_))
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Dispatch::Unsupported(_))
    }
}

/// 读取选项（原样传递给编解码器）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// CSV 分隔符
    pub delimiter: u8,
    /// CSV 第一行是否为表头
    pub has_headers: bool,
    /// CSV 是否允许行长度不一致
    pub flexible: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            delimiter: b',',
            has_headers: true,
            flexible: false,
        }
    }
}

/// 写入选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// JSON 是否缩进输出
    pub pretty: bool,
    /// CSV 分隔符
    pub delimiter: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            pretty: true,
            delimiter: b',',
        }
    }
}

/// 内容编解码器
pub trait Codec: Send + Sync {
    /// 编解码器名称（用于日志）
    fn name(&self) -> &'static str;

    /// 从文件读取内容
    fn read(&self, path: &Path, category: &Category, options: &ReadOptions) -> Result<Content>;

    /// 将内容写入文件
    fn write(&self, path: &Path, content: &Content, options: &WriteOptions) -> Result<()>;
}

/// 属性提取器
pub trait PropertyExtractor: Send + Sync {
    fn extract(&self, path: &Path, category: &Category, properties: &mut Properties)
        -> Result<()>;
}

/// 类别 -> 处理器 分派表
#[derive(Default)]
pub struct CodecRegistry {
    codecs: HashMap<(String, String), Arc<dyn Codec>>,
    extractors: HashMap<String, Arc<dyn PropertyExtractor>>,
}

impl CodecRegistry {
    /// 创建空分派表
    pub fn empty() -> Self {
        Self::default()
    }

    /// 创建标准分派表
    pub fn standard() -> Self {
        let mut registry = Self::empty();

        registry.register_codec("image", ANY_SUBTYPE, media::MediaCodec::image());
        registry.register_codec("audio", ANY_SUBTYPE, media::MediaCodec::audio());
        registry.register_codec("video", ANY_SUBTYPE, media::MediaCodec::video());
        registry.register_codec("application", "json", structured::JsonCodec);
        registry.register_codec("application", "xml", structured::XmlCodec);
        registry.register_codec("text", "plain", text::PlainTextCodec);
        registry.register_codec("text", "csv", text::CsvCodec);

        registry.register_extractor("image", image::ImageProperties);
        registry.register_extractor("audio", audio::AudioProperties);
        registry.register_extractor("video", video::VideoProperties);
        registry.register_extractor("application", text::TextFileProperties);
        registry.register_extractor("text", text::TextFileProperties);

        registry
    }

    /// 进程内共享的标准分派表
    pub fn shared() -> Arc<CodecRegistry> {
        static SHARED: OnceLock<Arc<CodecRegistry>> = OnceLock::new();
        SHARED
            .get_or_init(|| Arc::new(CodecRegistry::standard()))
            .clone()
    }

    /// 注册编解码器，`secondary` 为 `"*"` 时匹配该主类型下所有子类型
    pub fn register_codec(
        &mut self,
        primary: &str,
        secondary: &str,
        codec: impl Codec + 'static,
    ) -> &mut Self {
        self.codecs
            .insert((primary.to_string(), secondary.to_string()), Arc::new(codec));
        self
    }

    /// 注册属性提取器
    pub fn register_extractor(
        &mut self,
        primary: &str,
        extractor: impl PropertyExtractor + 'static,
    ) -> &mut Self {
        self.extractors
            .insert(primary.to_string(), Arc::new(extractor));
        self
    }

    /// 查找编解码器：先精确匹配，再匹配通配子类型
    pub fn codec_for(&self, category: &Category) -> Option<&dyn Codec> {
        let exact = (category.primary.clone(), category.secondary.clone());
        let wildcard = (category.primary.clone(), ANY_SUBTYPE.to_string());
        self.codecs
            .get(&exact)
            .or_else(|| self.codecs.get(&wildcard))
            .map(|c| c.as_ref())
    }

    /// 查找属性提取器
    pub fn extractor_for(&self, category: &Category) -> Option<&dyn PropertyExtractor> {
        self.extractors.get(&category.primary).map(|e| e.as_ref())
    }
}

impl std::fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut codecs: Vec<String> = self
            .codecs
            .iter()
            .map(|((p, s), c)| format!("{}/{} -> {}", p, s, c.name()))
            .collect();
        codecs.sort();
        let mut extractors: Vec<&String> = self.extractors.keys().collect();
        extractors.sort();
        f.debug_struct("CodecRegistry")
            .field("codecs", &codecs)
            .field("extractors", &extractors)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────
// 编解码器共用的文件读写辅助函数
// ─────────────────────────────────────────────────────────────

pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| GcuError::read(path, e))
}

pub(crate) fn read_string(path: &Path, format: &str) -> Result<String> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes).map_err(|e| GcuError::DecodeError {
        format: format.to_string(),
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| GcuError::write(path, e))
}

/// 内容种类与编解码器不匹配时的错误
pub(crate) fn wrong_content(format: &str, path: &Path, content: &Content) -> GcuError {
    GcuError::EncodeError {
        format: format.to_string(),
        path: path.display().to_string(),
        reason: format!("cannot encode {} content as {}", content.kind(), format),
    }
}
