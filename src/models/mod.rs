//! # 数据模型模块
//!
//! 定义文件类别、文件内容和文件属性的数据模型。
//!
//! ## 依赖关系
//! - 被 `codecs/`, `file.rs` 和 `commands/` 使用
//! - 子模块: category, content, properties

pub mod category;
pub mod content;
pub mod properties;

pub use category::Category;
pub use content::{Content, CsvTable, MediaData};
pub use properties::{Properties, PropertyValue};
