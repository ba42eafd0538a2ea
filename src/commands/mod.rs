//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `ingest/`, `transfer/`, `batch/`, `utils/`
//! - 子模块: upload, download, collect, info

pub mod collect;
pub mod download;
pub mod info;
pub mod upload;

use crate::cli::{Cli, Commands};
use crate::error::Result;

use std::path::{Path, PathBuf};

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::Upload(args) => upload::execute(args, &global),
        Commands::Download(args) => download::execute(args, &global),
        Commands::Collect(args) => collect::execute(args),
        Commands::Info(args) => info::execute(args),
    }
}

/// 相对路径按根目录解析
pub(crate) fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
