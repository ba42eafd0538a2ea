//! # 批量处理模块
//!
//! 提供统一的文件批量处理能力。
//!
//! ## 功能
//! - 目录扫描，按扩展名/模式收集文件列表
//! - 顺序处理，进度反馈与统计
//!
//! ## 依赖关系
//! - 被各命令模块使用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::{collect_files, FileCollector};
pub use runner::{BatchResult, BatchRunner, ProcessResult};
