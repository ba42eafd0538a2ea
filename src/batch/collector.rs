//! # 文件收集器
//!
//! 在目录树中收集指定扩展名（和可选文件名模式）的文件。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - 扩展名过滤（空集合表示全部接受）
//! - glob 文件名模式
//! - 深度优先遍历，顺序与文件系统的遍历顺序一致
//! - 惰性迭代 (`iter`) 或一次性收集 (`collect`)
//!
//! ## 依赖关系
//! - 被 `commands/collect.rs`, `commands/info.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 匹配文件名

use crate::error::{GcuError, Result};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 收集 `root` 下所有扩展名在 `accepted` 中的文件
pub fn collect_files<S: AsRef<str>>(root: impl Into<PathBuf>, accepted: &[S]) -> Vec<PathBuf> {
    FileCollector::new(root).with_formats(accepted).collect()
}

/// 文件收集器
#[derive(Debug, Clone)]
pub struct FileCollector {
    /// 输入路径
    input: PathBuf,
    /// 接受的扩展名（不含点）
    formats: Vec<String>,
    /// 文件名匹配模式
    patterns: Vec<glob::Pattern>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建新的文件收集器（默认递归、接受所有文件）
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            formats: Vec::new(),
            patterns: Vec::new(),
            recursive: true,
        }
    }

    /// 设置接受的扩展名，可带或不带前导点
    pub fn with_formats<S: AsRef<str>>(mut self, formats: &[S]) -> Self {
        self.formats = formats
            .iter()
            .map(|f| f.as_ref().trim().trim_start_matches('.').to_string())
            .filter(|f| !f.is_empty())
            .collect();
        self
    }

    /// 设置匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.patterns = pattern
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                glob::Pattern::new(s).map_err(|e| {
                    GcuError::InvalidArgument(format!("Invalid glob pattern '{}': {}", s, e))
                })
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 惰性遍历匹配的文件
    pub fn iter(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(move |e| self.accepts(e.path()))
            .map(|e| e.into_path())
    }

    /// 收集所有匹配的文件
    pub fn collect(&self) -> Vec<PathBuf> {
        self.iter().collect()
    }

    /// 检查文件是否满足扩展名和模式条件
    fn accepts(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        if !self.formats.is_empty() {
            let ext = match crate::models::category::extension_of(filename) {
                Some(ext) => ext,
                None => return false,
            };
            if !self.formats.iter().any(|f| f == ext) {
                return false;
            }
        }

        self.patterns.is_empty() || self.patterns.iter().any(|p| p.matches(filename))
    }
}
