//! # gcu
//!
//! 笔记本会话的文件工具库。
//!
//! ## 功能
//! - `TypedFile`: 按扩展名推断 MIME 类别，读取、写入并提取属性
//! - `BatchIngestProcessor`: 把上传的文件移动到目标目录并按策略命名
//! - 上传/下载触发器抽象，目录打包为 zip
//! - 递归目录扫描
//!
//! ## 依赖关系
//! ```text
//! file.rs ── codecs/ ── models/
//! ingest/ ── file.rs
//! transfer/ ── ingest/
//! batch/ (目录扫描、顺序执行)
//! cli/ + commands/ (可执行文件)
//! ```

pub mod batch;
pub mod cli;
pub mod codecs;
pub mod commands;
pub mod error;
pub mod file;
pub mod ingest;
pub mod models;
pub mod transfer;
pub mod utils;

pub use codecs::{CodecRegistry, Dispatch, ReadOptions, WriteOptions};
pub use error::{GcuError, Result};
pub use file::{TypedFile, TypedFileBuilder};
pub use ingest::{BatchIngestProcessor, CollisionPolicy, IngestConfig, Ingested, NamingPolicy};
pub use models::{Category, Content, Properties, PropertyValue};
pub use transfer::{download_folder_as_zip, DownloadTrigger, UploadTrigger};
