//! # collect 子命令 CLI 定义
//!
//! 在目录中收集指定格式的文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/collect.rs`

use clap::Args;
use std::path::PathBuf;

/// collect 子命令参数
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Directory to scan
    pub dir: PathBuf,

    /// Accepted extensions, comma separated (empty = all)
    #[arg(short, long, value_delimiter = ',')]
    pub formats: Vec<String>,

    /// Glob pattern for file names, comma separated
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Only scan the top level of the directory
    #[arg(long, default_value_t = false)]
    pub no_recursive: bool,
}
