//! # download 命令实现
//!
//! 将目录打包为 zip，并把压缩包交付到目标目录。
//!
//! ## 依赖关系
//! - 使用 `cli/download.rs` 定义的参数
//! - 使用 `transfer/download.rs`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use super::resolve;
use crate::cli::download::DownloadArgs;
use crate::cli::GlobalArgs;
use crate::error::Result;
use crate::transfer::{download_folder_as_zip, LocalDownload};
use crate::utils::{output, progress};

/// 执行 download 命令
pub fn execute(args: DownloadArgs, global: &GlobalArgs) -> Result<()> {
    output::print_header("Downloading Folder");

    let folder = resolve(&global.root, &args.folder);
    output::print_info(&format!("Packaging '{}'", folder.display()));

    let mut trigger = LocalDownload::new(&args.dest);

    let spinner = progress::create_spinner("Compressing...");
    let result = download_folder_as_zip(&folder, &mut trigger);
    spinner.finish_and_clear();

    let count = result?;
    for archive in trigger.delivered() {
        output::print_success(&format!("Archive written to '{}'", archive.display()));
    }
    output::print_done(&format!("Packaged {} file(s)", count));
    Ok(())
}
