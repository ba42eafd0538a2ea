//! # collect 命令实现
//!
//! 递归扫描目录，列出扩展名（和可选模式）匹配的文件。
//!
//! ## 依赖关系
//! - 使用 `cli/collect.rs` 定义的参数
//! - 使用 `batch/collector.rs`
//! - 使用 `utils/output.rs`

use crate::batch::FileCollector;
use crate::cli::collect::CollectArgs;
use crate::error::{GcuError, Result};
use crate::utils::output;

/// 执行 collect 命令
pub fn execute(args: CollectArgs) -> Result<()> {
    if !args.dir.exists() {
        return Err(GcuError::DirectoryNotFound {
            path: args.dir.display().to_string(),
        });
    }

    let mut collector = FileCollector::new(&args.dir)
        .with_formats(&args.formats)
        .recursive(!args.no_recursive);
    if let Some(pattern) = &args.pattern {
        collector = collector.with_pattern(pattern)?;
    }

    let mut count = 0;
    for path in collector.iter() {
        println!("{}", path.display());
        count += 1;
    }

    if count == 0 {
        output::print_warning("No matching files found.");
    } else {
        output::print_done(&format!("Found {} file(s)", count));
    }
    Ok(())
}
