//! # info 子命令 CLI 定义
//!
//! 显示文件的类别、属性，以及可选的内容摘要
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/info.rs`

use clap::Args;
use std::path::PathBuf;

/// info 子命令参数
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Files or directories to inspect
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Also read content and print a summary
    #[arg(long, default_value_t = false)]
    pub read: bool,

    /// Accepted extensions when a directory is given, comma separated
    #[arg(short, long, value_delimiter = ',')]
    pub formats: Vec<String>,

    /// Print a JSON report instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
