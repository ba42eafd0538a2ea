//! # download 子命令 CLI 定义
//!
//! 将目录打包为 zip 并复制到目标目录
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/download.rs`

use clap::Args;
use std::path::PathBuf;

/// download 子命令参数
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Folder to package (relative paths resolve against the root)
    pub folder: PathBuf,

    /// Directory that receives the archive
    #[arg(short, long, default_value = ".")]
    pub dest: PathBuf,
}
