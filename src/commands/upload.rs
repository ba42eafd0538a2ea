//! # upload 命令实现
//!
//! 把本地文件复制到会话根目录（本地上传），再交给批量导入处理器
//! 移动到目标目录并重命名。
//!
//! ## 依赖关系
//! - 使用 `cli/upload.rs` 定义的参数
//! - 使用 `transfer/upload.rs`, `ingest/`
//! - 使用 `utils/output.rs`

use crate::cli::upload::UploadArgs;
use crate::cli::GlobalArgs;
use crate::codecs::ReadOptions;
use crate::error::{GcuError, Result};
use crate::ingest::{BatchIngestProcessor, IngestConfig};
use crate::transfer::{self, LocalUpload};
use crate::utils::output;

/// 执行 upload 命令
pub fn execute(args: UploadArgs, global: &GlobalArgs) -> Result<()> {
    output::print_header("Uploading Files");

    let delimiter = u8::try_from(args.delimiter).map_err(|_| {
        GcuError::InvalidArgument(format!("Delimiter must be ASCII: '{}'", args.delimiter))
    })?;

    let config = IngestConfig::new(&global.root)
        .with_collision(args.on_collision.into())
        .with_read_content(args.read)
        .with_read_options(ReadOptions {
            delimiter,
            has_headers: !args.no_headers,
            ..Default::default()
        });
    let processor = BatchIngestProcessor::new(config);

    output::print_info(&format!(
        "Target: '{}'",
        processor.target_dir(&args.to).display()
    ));

    let mut trigger = LocalUpload::new(&global.root, args.files.clone());
    let naming = args.naming();

    let Some(ingested) = transfer::upload(&mut trigger, &processor, &args.to, &naming)? else {
        output::print_warning("Nothing was uploaded.");
        return Ok(());
    };

    for (source, file) in args.files.iter().zip(ingested.iter()) {
        let dest = file
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        output::print_move(&source.display().to_string(), &dest);

        if args.read {
            let name = file.filename().unwrap_or_default();
            match file.content() {
                Some(content) => output::print_info(&format!("{}: {}", name, content.summary())),
                None => output::print_skip(&format!("{}: content type not supported", name)),
            }
        }
    }

    output::print_done(&format!("Uploaded {} file(s)", ingested.len()));
    Ok(())
}
