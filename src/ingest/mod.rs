//! # 批量导入模块
//!
//! 把刚上传的原始文件整理到目标目录并包装为 `TypedFile`。
//!
//! ## 依赖关系
//! - 被 `transfer/upload.rs` 和 `commands/upload.rs` 使用
//! - 子模块: naming, processor

pub mod naming;
pub mod processor;

pub use naming::NamingPolicy;
pub use processor::{BatchIngestProcessor, CollisionPolicy, IngestConfig, Ingested, DEFAULT_ROOT};
