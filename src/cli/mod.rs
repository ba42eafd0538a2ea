//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `upload`: 上传本地文件到根目录并整理命名
//! - `download`: 将目录打包为 zip 并交付
//! - `collect`: 按扩展名收集目录中的文件
//! - `info`: 显示文件类别与属性
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: upload, download, collect, info

pub mod collect;
pub mod download;
pub mod info;
pub mod upload;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// gcu - 笔记本会话的文件工具
#[derive(Parser)]
#[command(name = "gcu")]
#[command(author = "Jacob Hart")]
#[command(version)]
#[command(about = "Typed file handling, batch upload and zip download for notebook sessions", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// 全局参数
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Session root directory that uploads land in
    #[arg(long, global = true, env = "GCU_ROOT", default_value = crate::ingest::DEFAULT_ROOT)]
    pub root: PathBuf,

    /// Print debug logs (RUST_LOG overrides)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Upload local files into the session root and organize them
    Upload(upload::UploadArgs),

    /// Zip a folder and deliver the archive
    Download(download::DownloadArgs),

    /// List files of accepted formats under a directory
    Collect(collect::CollectArgs),

    /// Show category and properties of files
    Info(info::InfoArgs),
}
