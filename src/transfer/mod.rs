//! # 传输模块
//!
//! 上传和打包下载。平台相关的触发器通过 trait 注入。
//!
//! ## 依赖关系
//! - 被 `commands/upload.rs`, `commands/download.rs` 使用
//! - 子模块: upload, download

pub mod download;
pub mod upload;

pub use download::{download_folder_as_zip, zip_directory, DownloadTrigger, LocalDownload};
pub use upload::{upload, LocalUpload, NoopUpload, UploadTrigger};
