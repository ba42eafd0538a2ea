//! # 打包下载
//!
//! 将目录递归打包为 zip（条目路径相对于该目录，使用 `/` 分隔），
//! 交给下载触发器，然后删除临时压缩包。压缩包放在临时目录中，
//! 无论触发器成功与否都会被清理。
//!
//! ## 依赖关系
//! - 被 `commands/download.rs` 使用
//! - 使用 `zip` 写压缩包，`walkdir` 遍历目录，`tempfile` 管理临时目录

use crate::error::{GcuError, Result};

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// 下载触发器
pub trait DownloadTrigger {
    /// 交付压缩包。调用返回后压缩包即被删除
    fn download(&mut self, archive: &Path) -> Result<()>;
}

/// 本地下载：把压缩包复制到目标目录
#[derive(Debug, Clone)]
pub struct LocalDownload {
    dest: PathBuf,
    delivered: Vec<PathBuf>,
}

impl LocalDownload {
    pub fn new(dest: impl Into<PathBuf>) -> Self {
        LocalDownload {
            dest: dest.into(),
            delivered: Vec::new(),
        }
    }

    /// 已交付的文件
    pub fn delivered(&self) -> &[PathBuf] {
        &self.delivered
    }
}

impl DownloadTrigger for LocalDownload {
    fn download(&mut self, archive: &Path) -> Result<()> {
        let name = archive
            .file_name()
            .ok_or_else(|| GcuError::TransferError(format!("bad archive path {}", archive.display())))?;

        fs::create_dir_all(&self.dest).map_err(|e| GcuError::write(&self.dest, e))?;
        let target = self.dest.join(name);
        fs::copy(archive, &target).map_err(|e| {
            GcuError::TransferError(format!("cannot deliver {}: {}", target.display(), e))
        })?;

        info!(archive = %target.display(), "archive delivered");
        self.delivered.push(target);
        Ok(())
    }
}

/// 把 `dir` 下所有文件写入 `archive`，返回写入的文件数
pub fn zip_directory(dir: &Path, archive: &Path) -> Result<usize> {
    if !dir.is_dir() {
        return Err(GcuError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let file = File::create(archive).map_err(|e| GcuError::write(archive, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut count = 0;
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| GcuError::FileReadError {
            path: dir.display().to_string(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() || entry.path() == archive {
            continue;
        }

        let name = entry_name(dir, entry.path())?;
        debug!(entry = %name, "adding to archive");

        zip.start_file(name, options)?;
        let mut src = File::open(entry.path()).map_err(|e| GcuError::read(entry.path(), e))?;
        io::copy(&mut src, &mut zip).map_err(|e| GcuError::write(archive, e))?;
        count += 1;
    }

    zip.finish()?;
    Ok(count)
}

/// 条目名：相对路径，统一使用 `/`
fn entry_name(dir: &Path, path: &Path) -> Result<String> {
    let rel = path.strip_prefix(dir).map_err(|_| {
        GcuError::InvalidArgument(format!("{} is outside {}", path.display(), dir.display()))
    })?;
    Ok(rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

/// 打包 `dir` 为 `<目录名>.zip` 并交给下载触发器，返回打包的文件数
pub fn download_folder_as_zip(dir: &Path, trigger: &mut dyn DownloadTrigger) -> Result<usize> {
    let stem = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());

    // TempDir 在离开作用域时删除，触发器失败也一样
    let staging = tempfile::tempdir().map_err(|e| GcuError::write(std::env::temp_dir(), e))?;
    let archive = staging.path().join(format!("{}.zip", stem));

    let count = zip_directory(dir, &archive)?;
    info!(files = count, archive = %archive.display(), "archive created");

    trigger.download(&archive)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn sample_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("x.txt"), "x").unwrap();
        fs::write(root.join("sub/y.txt"), "y").unwrap();
        dir
    }

    fn entries(archive: &Path) -> BTreeSet<String> {
        let zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        zip.file_names().map(str::to_string).collect()
    }

    #[test]
    fn test_zip_preserves_relative_paths() {
        let tree = sample_tree();
        let out = tempfile::tempdir().unwrap();
        let archive = out.path().join("root.zip");

        let count = zip_directory(&tree.path().join("root"), &archive).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            entries(&archive),
            ["sub/y.txt", "x.txt"]
                .iter()
                .map(|s| s.to_string())
                .collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn test_zip_content_is_readable() {
        use std::io::Read;

        let tree = sample_tree();
        let archive = tree.path().join("out.zip");
        zip_directory(&tree.path().join("root"), &archive).unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        let mut body = String::new();
        zip.by_name("sub/y.txt").unwrap().read_to_string(&mut body).unwrap();
        assert_eq!(body, "y");
    }

    #[test]
    fn test_missing_directory() {
        let out = tempfile::tempdir().unwrap();
        let result = zip_directory(&out.path().join("nope"), &out.path().join("a.zip"));
        assert!(matches!(result, Err(GcuError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_download_delivers_and_cleans_up() {
        let tree = sample_tree();
        let dest = tempfile::tempdir().unwrap();
        let mut trigger = LocalDownload::new(dest.path());

        let count = download_folder_as_zip(&tree.path().join("root"), &mut trigger).unwrap();
        assert_eq!(count, 2);

        let delivered = trigger.delivered().to_vec();
        assert_eq!(delivered, vec![dest.path().join("root.zip")]);
        assert_eq!(entries(&delivered[0]).len(), 2);
    }

    #[test]
    fn test_archive_removed_when_trigger_fails() {
        struct Failing {
            seen: Option<PathBuf>,
        }
        impl DownloadTrigger for Failing {
            fn download(&mut self, archive: &Path) -> Result<()> {
                assert!(archive.is_file());
                self.seen = Some(archive.to_path_buf());
                Err(GcuError::TransferError("browser closed".into()))
            }
        }

        let tree = sample_tree();
        let mut trigger = Failing { seen: None };
        let result = download_folder_as_zip(&tree.path().join("root"), &mut trigger);

        assert!(matches!(result, Err(GcuError::TransferError(_))));
        let seen = trigger.seen.unwrap();
        assert!(!seen.exists());
        assert!(!seen.parent().unwrap().exists());
    }
}
