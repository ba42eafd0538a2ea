//! # upload 子命令 CLI 定义
//!
//! 把本地文件放入会话根目录，移动到目标目录并按策略命名
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/upload.rs`

use crate::ingest::{CollisionPolicy, NamingPolicy};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 目标文件已存在时的处理方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OnCollision {
    /// Replace the existing file
    #[default]
    Overwrite,
    /// Abort the upload
    Fail,
}

impl From<OnCollision> for CollisionPolicy {
    fn from(value: OnCollision) -> Self {
        match value {
            OnCollision::Overwrite => CollisionPolicy::Overwrite,
            OnCollision::Fail => CollisionPolicy::Fail,
        }
    }
}

/// upload 子命令参数
#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Local files to upload
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Target directory relative to the root (empty = root)
    #[arg(short, long, default_value = "")]
    pub to: String,

    /// Rename files to this stem ('stem.ext', or 'stem N.ext' for several files)
    #[arg(short, long, conflicts_with = "uuid")]
    pub name: Option<String>,

    /// Rename files to freshly generated unique ids
    #[arg(long, default_value_t = false)]
    pub uuid: bool,

    /// Read file content right after upload
    #[arg(long, default_value_t = false)]
    pub read: bool,

    /// What to do when a file with the same name already exists
    #[arg(long, value_enum, default_value_t = OnCollision::Overwrite)]
    pub on_collision: OnCollision,

    /// CSV delimiter used when reading content
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Treat the first CSV row as data, not headers
    #[arg(long, default_value_t = false)]
    pub no_headers: bool,
}

impl UploadArgs {
    /// 根据参数确定命名策略
    pub fn naming(&self) -> NamingPolicy {
        if self.uuid {
            NamingPolicy::UniqueId
        } else if let Some(stem) = &self.name {
            NamingPolicy::FixedStem(stem.clone())
        } else {
            NamingPolicy::KeepOriginal
        }
    }
}
