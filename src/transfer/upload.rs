//! # 上传
//!
//! 上传触发器由调用方注入：
//! - `NoopUpload`: 笔记本平台之外的替身，总是返回“没有上传”
//! - `LocalUpload`: 把本地文件复制到根目录下的暂存目录，模拟一次上传
//!
//! `upload` 触发上传后把得到的原始文件名交给 `BatchIngestProcessor`。
//!
//! ## 依赖关系
//! - 被 `commands/upload.rs` 使用
//! - 使用 `ingest/`

use crate::error::{GcuError, Result};
use crate::ingest::{BatchIngestProcessor, Ingested, NamingPolicy};

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tracing::{debug, info};

/// 上传触发器
pub trait UploadTrigger {
    /// 触发一次上传，返回相对于根目录的原始文件名。
    /// 返回 `None` 或空列表表示取消。
    fn upload(&mut self) -> Result<Option<Vec<String>>>;
}

/// 空上传：在没有上传平台的环境中使用
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopUpload;

impl UploadTrigger for NoopUpload {
    fn upload(&mut self) -> Result<Option<Vec<String>>> {
        debug!("no upload platform available, nothing uploaded");
        Ok(None)
    }
}

/// 本地上传：把给定文件复制到根目录下的私有暂存目录
///
/// 暂存目录随触发器一起删除。返回的原始文件名形如 `.gcu-upload-XXXX/a.txt`，
/// 根目录中已有的同名文件在导入前保持不变。
#[derive(Debug)]
pub struct LocalUpload {
    root: PathBuf,
    sources: Vec<PathBuf>,
    staging: Option<TempDir>,
}

impl LocalUpload {
    pub fn new(root: impl Into<PathBuf>, sources: Vec<PathBuf>) -> Self {
        LocalUpload {
            root: root.into(),
            sources,
            staging: None,
        }
    }

    /// 检查所有源文件，返回它们的文件名（批内不能重名）
    fn source_names(&self) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut names = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            if !source.is_file() {
                return Err(GcuError::FileNotFound {
                    path: source.display().to_string(),
                });
            }
            let name = source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    GcuError::InvalidArgument(format!(
                        "'{}' does not name a file",
                        source.display()
                    ))
                })?;
            if !seen.insert(name.clone()) {
                return Err(GcuError::DuplicateName { name });
            }
            names.push(name);
        }

        Ok(names)
    }
}

impl UploadTrigger for LocalUpload {
    fn upload(&mut self) -> Result<Option<Vec<String>>> {
        if self.sources.is_empty() {
            return Ok(None);
        }
        let names = self.source_names()?;

        fs::create_dir_all(&self.root).map_err(|e| GcuError::write(&self.root, e))?;
        let staging = tempfile::Builder::new()
            .prefix(".gcu-upload-")
            .tempdir_in(&self.root)
            .map_err(|e| GcuError::write(&self.root, e))?;
        let staging_name = staging
            .path()
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_default();

        let mut raw = Vec::with_capacity(names.len());
        for (source, name) in self.sources.iter().zip(&names) {
            let dest = staging.path().join(name);
            fs::copy(source, &dest).map_err(|e| {
                GcuError::TransferError(format!(
                    "cannot copy {} to {}: {}",
                    source.display(),
                    dest.display(),
                    e
                ))
            })?;
            raw.push(staging_name.join(name).to_string_lossy().into_owned());
        }

        info!(count = raw.len(), staging = %staging.path().display(), "staged local upload");
        self.staging = Some(staging);
        Ok(Some(raw))
    }
}

/// 触发上传并导入到 `target` 目录。上传被取消时返回 `None`
pub fn upload(
    trigger: &mut dyn UploadTrigger,
    processor: &BatchIngestProcessor,
    target: &str,
    naming: &NamingPolicy,
) -> Result<Option<Ingested>> {
    match trigger.upload()? {
        Some(names) if !names.is_empty() => processor.ingest(target, names.as_slice(), naming),
        _ => {
            debug!("upload cancelled");
            Ok(None)
        }
    }
}
