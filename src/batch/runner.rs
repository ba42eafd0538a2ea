//! # 批量执行器
//!
//! 顺序处理文件列表，单个文件的失败不会中断整批。
//!
//! ## 功能
//! - 进度条显示
//! - 错误收集与汇总报告
//!
//! ## 依赖关系
//! - 被 `commands/info.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条

use crate::utils::progress;

use std::path::PathBuf;

/// 单个文件处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessResult {
    /// 处理成功
    Success(String),
    /// 跳过（如类型不支持）
    Skipped(String),
    /// 处理失败
    Failed(String, String), // (文件路径, 错误信息)
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 跳过数量
    pub skipped: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl BatchResult {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Success(_) => self.success += 1,
            ProcessResult::Skipped(_) => self.skipped += 1,
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.skipped + self.failed
    }
}

/// 批量执行器
#[derive(Debug, Default)]
pub struct BatchRunner {
    /// 是否显示进度条
    show_progress: bool,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(show_progress: bool) -> Self {
        Self { show_progress }
    }

    /// 依次处理文件列表
    pub fn run<F>(&self, files: &[PathBuf], mut processor: F) -> BatchResult
    where
        F: FnMut(&PathBuf) -> ProcessResult,
    {
        let pb = self
            .show_progress
            .then(|| progress::create_progress_bar(files.len() as u64, "Processing"));

        let mut batch_result = BatchResult::default();
        for file in files {
            let result = processor(file);
            if let (Some(pb), ProcessResult::Failed(path, err)) = (&pb, &result) {
                pb.suspend(|| tracing::warn!(%path, %err, "processing failed"));
            }
            batch_result.merge(result);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }

        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        batch_result
    }
}
