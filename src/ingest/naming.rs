//! # 导入文件命名策略
//!
//! ## 策略
//! - `KeepOriginal`: 保留原文件名
//! - `UniqueId`: UUID v4 + 原扩展名
//! - `FixedStem(stem)`: 单个文件为 `stem.ext`；多个文件为 `stem N.ext`，N 从 0 开始
//!
//! ## 依赖关系
//! - 被 `ingest/processor.rs` 使用
//! - 使用 `uuid` 生成唯一文件名

use crate::error::{GcuError, Result};

use std::collections::HashSet;
use std::path::Path;

/// 命名策略
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NamingPolicy {
    #[default]
    KeepOriginal,
    UniqueId,
    FixedStem(String),
}

/// 带前导点的扩展名，没有扩展名时为空串
fn dotted_extension(raw: &Path) -> String {
    raw.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

fn basename(raw: &Path) -> Result<String> {
    raw.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            GcuError::InvalidArgument(format!("'{}' does not name a file", raw.display()))
        })
}

impl NamingPolicy {
    /// 按输入顺序计算最终文件名，保证批内唯一
    pub fn final_names<P: AsRef<Path>>(&self, raw_paths: &[P]) -> Result<Vec<String>> {
        let names = match self {
            NamingPolicy::KeepOriginal => raw_paths
                .iter()
                .map(|p| basename(p.as_ref()))
                .collect::<Result<Vec<_>>>()?,

            NamingPolicy::UniqueId => raw_paths
                .iter()
                .map(|p| format!("{}{}", uuid::Uuid::new_v4(), dotted_extension(p.as_ref())))
                .collect(),

            NamingPolicy::FixedStem(stem) => {
                if stem.is_empty() || stem.contains(['/', '\\']) {
                    return Err(GcuError::InvalidArgument(format!(
                        "Invalid file stem: '{}'",
                        stem
                    )));
                }
                if raw_paths.len() == 1 {
                    vec![format!("{}{}", stem, dotted_extension(raw_paths[0].as_ref()))]
                } else {
                    raw_paths
                        .iter()
                        .enumerate()
                        .map(|(i, p)| format!("{} {}{}", stem, i, dotted_extension(p.as_ref())))
                        .collect()
                }
            }
        };

        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(GcuError::DuplicateName { name: name.clone() });
            }
        }

        Ok(names)
    }
}
