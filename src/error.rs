//! # 统一错误处理模块
//!
//! 定义 gcu 的所有错误类型，使用 `thiserror` 派生。
//!
//! 注意：不支持的文件类型不是错误，见 `codecs::Dispatch::Unsupported`。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use std::path::PathBuf;
use thiserror::Error;

/// gcu 统一错误类型
#[derive(Error, Debug)]
pub enum GcuError {
    // ─────────────────────────────────────────────────────────────
    // 类型解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown file type: '{filename}' has no known MIME mapping")]
    UnknownType { filename: String },

    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 批量导入错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to move file #{index}: {from} -> {to}\nReason: {reason}")]
    MoveError {
        index: usize,
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    #[error("Duplicate file name in batch: {name}")]
    DuplicateName { name: String },

    // ─────────────────────────────────────────────────────────────
    // 编解码错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to decode {format} file: {path}\nReason: {reason}")]
    DecodeError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Failed to encode {format} file: {path}\nReason: {reason}")]
    EncodeError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("No content to write for: {filename}")]
    MissingContent { filename: String },

    #[error("No location on disk for: {filename}")]
    MissingPath { filename: String },

    // ─────────────────────────────────────────────────────────────
    // 传输与打包错误
    // ─────────────────────────────────────────────────────────────
    #[error("Archive error: {0}")]
    ArchiveError(#[from] zip::result::ZipError),

    #[error("Transfer failed: {0}")]
    TransferError(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 序列化错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl GcuError {
    /// 构造读文件错误
    pub fn read(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        GcuError::FileReadError {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// 构造写文件错误
    pub fn write(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        GcuError::FileWriteError {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, GcuError>;
