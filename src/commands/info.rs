//! # info 命令实现
//!
//! 显示文件类别和属性（表格或 JSON），可选读取内容并打印摘要。
//! 不支持的类型和单个文件的错误不会中断整批。
//!
//! ## 依赖关系
//! - 使用 `cli/info.rs` 定义的参数
//! - 使用 `file.rs`, `batch/`
//! - 使用 `utils/output.rs`, `tabled`, `serde_json`

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::info::InfoArgs;
use crate::codecs::{Dispatch, ReadOptions};
use crate::error::{GcuError, Result};
use crate::file::TypedFile;
use crate::models::{Category, Properties};
use crate::utils::output;

use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 单个文件的检查结果
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub category: Category,
    pub properties: Properties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// 表格行
#[derive(Debug, Clone, Tabled)]
struct PropertyRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Property")]
    property: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// 执行 info 命令
pub fn execute(args: InfoArgs) -> Result<()> {
    if !args.json {
        output::print_header("File Information");
    }

    let files = expand_inputs(&args)?;
    if files.is_empty() {
        output::print_warning("No files to inspect.");
        return Ok(());
    }

    let mut reports = Vec::new();
    let runner = BatchRunner::new(files.len() > 1 && !args.json);
    let result = runner.run(&files, |path| match inspect(path, args.read) {
        Ok(Dispatch::Handled(report)) => {
            let name = report.path.clone();
            reports.push(report);
            ProcessResult::Success(name)
        }
        Ok(Dispatch::Unsupported(category)) => {
            ProcessResult::Skipped(format!("{} ({})", path.display(), category))
        }
        Err(e) => ProcessResult::Failed(path.display().to_string(), e.to_string()),
    });

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_table(&reports);
    }

    for (path, err) in &result.failures {
        output::print_warning(&format!("{}: {}", path, err));
    }
    if !args.json {
        output::print_done(&format!(
            "{} inspected, {} unsupported, {} failed",
            result.success, result.skipped, result.failed
        ));
    }
    Ok(())
}

fn print_table(reports: &[FileReport]) {
    let rows: Vec<PropertyRow> = reports
        .iter()
        .flat_map(|report| {
            report.properties.iter().map(|(key, value)| PropertyRow {
                file: report.path.clone(),
                property: key.clone(),
                value: value.to_string(),
            })
        })
        .collect();

    if !rows.is_empty() {
        println!("{}", Table::new(&rows));
    }
    for report in reports {
        if let Some(summary) = &report.summary {
            output::print_info(&format!("{}: {}", report.path, summary));
        }
    }
}

/// 展开输入：目录按扩展名收集，文件原样保留
fn expand_inputs(args: &InfoArgs) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in &args.paths {
        if path.is_dir() {
            files.extend(FileCollector::new(path).with_formats(&args.formats).iter());
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(GcuError::FileNotFound {
                path: path.display().to_string(),
            });
        }
    }
    Ok(files)
}

/// 检查单个文件：属性不支持时整体视为不支持，内容不支持时只记在摘要里
pub fn inspect(path: &Path, read: bool) -> Result<Dispatch<FileReport>> {
    let mut file = TypedFile::builder().path(path).auto_read(false).build()?;

    let properties = match file.file_properties()? {
        Dispatch::Handled(props) => props.clone(),
        Dispatch::Unsupported(category) => return Ok(Dispatch::Unsupported(category)),
    };

    let summary = if read {
        Some(match file.read_content(&ReadOptions::default())? {
            Dispatch::Handled(content) => content.summary(),
            Dispatch::Unsupported(category) => format!("reading {} is not supported", category),
        })
    } else {
        None
    };

    let category = file
        .category()
        .cloned()
        .ok_or_else(|| GcuError::InvalidArgument(format!("'{}' has no type", path.display())))?;

    Ok(Dispatch::Handled(FileReport {
        path: path.display().to_string(),
        category,
        properties,
        summary,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_report_serializes_properties() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "{\"a\": 1, \"b\": [2, 3]}").unwrap();

        let report = inspect(&path, true).unwrap();
        let Dispatch::Handled(report) = report else {
            panic!("json should be supported");
        };
        assert_eq!(report.summary.as_deref(), Some("object with 2 keys"));

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["category"]["primary"], "application");
        assert_eq!(value["category"]["secondary"], "json");
        assert_eq!(value["properties"]["mime"], "application/json");
        assert_eq!(value["properties"]["lines"], 1);
    }

    #[test]
    fn test_summary_omitted_without_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<p>hi</p>").unwrap();

        let Dispatch::Handled(report) = inspect(&path, false).unwrap() else {
            panic!("text files have properties");
        };
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("summary").is_none());
        assert_eq!(value["properties"]["extension"], "html");
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.zzz");
        fs::write(&path, "x").unwrap();

        assert!(matches!(
            inspect(&path, false),
            Err(GcuError::UnknownType { .. })
        ));
    }
}
