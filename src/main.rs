//! # gcu - 笔记本会话文件工具
//!
//! 按 MIME 类别读写文件、批量上传整理、目录打包下载，统一成单一可执行文件。
//!
//! ## 子命令
//! - `upload`   - 上传文件到会话根目录，移动并重命名
//! - `download` - 将目录打包为 zip 并交付
//! - `collect`  - 按扩展名收集目录中的文件
//! - `info`     - 显示文件类别与属性
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── transfer/  (上传/下载触发)
//!   │     ├── ingest/    (批量导入)
//!   │     ├── file.rs    (TypedFile)
//!   │     └── codecs/    (按类别分派的编解码器)
//!   ├── utils/      (输出、进度、日志)
//!   └── error.rs    (错误处理)
//! ```

use clap::Parser;
use gcu::cli::Cli;
use gcu::{commands, utils};

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    utils::logging::init(cli.global.verbose);

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
