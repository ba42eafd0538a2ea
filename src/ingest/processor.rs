//! # 批量导入处理器
//!
//! 将上传得到的原始文件移动到目标目录，按命名策略重命名，
//! 并构造 `TypedFile` 对象。
//!
//! ## 流程
//! 1. 计算最终文件名（批内唯一），并确认每个名称都有已知类型
//! 2. 创建 `root/target`（含父目录）
//! 3. 逐个重命名 `root/raw[i]` -> `root/target/final[i]`
//! 4. 一个文件返回 `Ingested::Single`，多个返回 `Ingested::Many`
//!
//! 移动失败时整批中止，已移动的文件保留在目标目录中。
//!
//! ## 依赖关系
//! - 被 `transfer/upload.rs` 和 `commands/upload.rs` 使用
//! - 使用 `file.rs`, `ingest/naming.rs`

use super::naming::NamingPolicy;
use crate::codecs::ReadOptions;
use crate::error::{GcuError, Result};
use crate::file::TypedFile;
use crate::models::Category;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 默认根目录
pub const DEFAULT_ROOT: &str = "/content";

/// 目标路径已存在时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// 覆盖已有文件（后写入者胜出）
    #[default]
    Overwrite,
    /// 报错并中止整批
    Fail,
}

/// 批量导入配置
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// 原始路径和目标目录都相对于此根目录
    pub root: PathBuf,
    /// 目标路径冲突处理
    pub collision: CollisionPolicy,
    /// 导入后立即读取内容（默认 false）
    pub read_content: bool,
    /// 读取选项
    pub read_options: ReadOptions,
}

impl Default for IngestConfig {
    fn default() -> Self {
        IngestConfig::new(DEFAULT_ROOT)
    }
}

impl IngestConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        IngestConfig {
            root: root.into(),
            collision: CollisionPolicy::default(),
            read_content: false,
            read_options: ReadOptions::default(),
        }
    }

    pub fn with_collision(mut self, collision: CollisionPolicy) -> Self {
        self.collision = collision;
        self
    }

    pub fn with_read_content(mut self, read_content: bool) -> Self {
        self.read_content = read_content;
        self
    }

    pub fn with_read_options(mut self, options: ReadOptions) -> Self {
        self.read_options = options;
        self
    }
}

/// 导入结果：单个文件或有序文件列表
#[derive(Debug, Clone)]
pub enum Ingested {
    Single(TypedFile),
    Many(Vec<TypedFile>),
}

impl Ingested {
    pub fn len(&self) -> usize {
        match self {
            Ingested::Single(_) => 1,
            Ingested::Many(files) => files.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypedFile> {
        match self {
            Ingested::Single(file) => std::slice::from_ref(file).iter(),
            Ingested::Many(files) => files.iter(),
        }
    }

    pub fn into_vec(self) -> Vec<TypedFile> {
        match self {
            Ingested::Single(file) => vec![file],
            Ingested::Many(files) => files,
        }
    }
}

/// 批量导入处理器
#[derive(Debug, Clone, Default)]
pub struct BatchIngestProcessor {
    config: IngestConfig,
}

impl BatchIngestProcessor {
    pub fn new(config: IngestConfig) -> Self {
        BatchIngestProcessor { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// 目标目录的绝对位置，空串表示根目录本身
    pub fn target_dir(&self, target: &str) -> PathBuf {
        if target.is_empty() {
            self.config.root.clone()
        } else {
            self.config.root.join(target)
        }
    }

    /// 导入一批原始文件。输入为空时返回 `None`
    pub fn ingest<P: AsRef<Path>>(
        &self,
        target: &str,
        raw_paths: &[P],
        naming: &NamingPolicy,
    ) -> Result<Option<Ingested>> {
        if raw_paths.is_empty() {
            debug!("nothing to ingest");
            return Ok(None);
        }

        // 名称和类型先全部确定，失败时不改动文件系统
        let names = naming.final_names(raw_paths)?;
        for name in &names {
            Category::from_filename(name)?;
        }

        let dest_dir = self.target_dir(target);
        if !dest_dir.is_dir() {
            fs::create_dir_all(&dest_dir).map_err(|e| GcuError::write(&dest_dir, e))?;
        }

        let mut moved = Vec::with_capacity(names.len());
        for (index, (raw, name)) in raw_paths.iter().zip(&names).enumerate() {
            let from = self.config.root.join(raw.as_ref());
            let to = dest_dir.join(name);
            self.move_file(index, &from, &to)?;
            moved.push(to);
        }

        info!(count = moved.len(), dir = %dest_dir.display(), "ingested files");

        let mut files = moved
            .into_iter()
            .map(|path| self.typed_file(path))
            .collect::<Result<Vec<_>>>()?;

        if files.len() == 1 {
            Ok(files.pop().map(Ingested::Single))
        } else {
            Ok(Some(Ingested::Many(files)))
        }
    }

    fn move_file(&self, index: usize, from: &Path, to: &Path) -> Result<()> {
        let move_error = |reason: String| GcuError::MoveError {
            index,
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            reason,
        };

        if !from.is_file() {
            return Err(move_error("source file does not exist".to_string()));
        }
        if from == to {
            return Ok(());
        }
        if to.exists() {
            match self.config.collision {
                CollisionPolicy::Fail => {
                    return Err(move_error("destination already exists".to_string()))
                }
                CollisionPolicy::Overwrite => {
                    debug!(dest = %to.display(), "overwriting existing file");
                }
            }
        }

        if fs::rename(from, to).is_err() {
            // 跨文件系统时 rename 失败，改为复制后删除
            fs::copy(from, to).map_err(|e| move_error(e.to_string()))?;
            fs::remove_file(from).map_err(|e| move_error(e.to_string()))?;
        }

        debug!(from = %from.display(), to = %to.display(), "moved");
        Ok(())
    }

    fn typed_file(&self, path: PathBuf) -> Result<TypedFile> {
        TypedFile::builder()
            .path(path)
            .auto_read(self.config.read_content)
            .read_options(self.config.read_options.clone())
            .build()
    }
}
