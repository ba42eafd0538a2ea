//! # 文本文件编解码器 (plain, CSV)
//!
//! - 纯文本按 UTF-8 读写
//! - CSV 使用 `csv` crate，分隔符和表头由 `ReadOptions`/`WriteOptions` 决定
//! - `TextFileProperties` 为 application 和 text 两个主类型共用
//!
//! ## 依赖关系
//! - 被 `codecs/mod.rs` 注册
//! - 使用 `csv`

use super::{
    read_bytes, read_string, wrong_content, write_bytes, Codec, PropertyExtractor, ReadOptions,
    WriteOptions,
};
use crate::error::{GcuError, Result};
use crate::models::{Category, Content, CsvTable, Properties};

use std::path::Path;

/// 纯文本编解码器
pub struct PlainTextCodec;

impl Codec for PlainTextCodec {
    fn name(&self) -> &'static str {
        "text"
    }

    fn read(&self, path: &Path, _category: &Category, _options: &ReadOptions) -> Result<Content> {
        Ok(Content::Text(read_string(path, "text")?))
    }

    fn write(&self, path: &Path, content: &Content, _options: &WriteOptions) -> Result<()> {
        match content {
            Content::Text(text) => write_bytes(path, text.as_bytes()),
            other => Err(wrong_content("text", path, other)),
        }
    }
}

/// CSV 编解码器
pub struct CsvCodec;

impl CsvCodec {
    fn decode_error(path: &Path, e: csv::Error) -> GcuError {
        GcuError::DecodeError {
            format: "csv".to_string(),
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    }

    fn encode_error(path: &Path, reason: impl ToString) -> GcuError {
        GcuError::EncodeError {
            format: "csv".to_string(),
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl Codec for CsvCodec {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn read(&self, path: &Path, _category: &Category, options: &ReadOptions) -> Result<Content> {
        let text = read_string(path, "csv")?;

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(options.has_headers)
            .flexible(options.flexible)
            .from_reader(text.as_bytes());

        let headers = if options.has_headers {
            let record = rdr.headers().map_err(|e| Self::decode_error(path, e))?;
            Some(record.iter().map(str::to_string).collect())
        } else {
            None
        };

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| Self::decode_error(path, e))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Content::Csv(CsvTable::new(headers, rows)))
    }

    fn write(&self, path: &Path, content: &Content, options: &WriteOptions) -> Result<()> {
        let table = content
            .as_csv()
            .ok_or_else(|| wrong_content("csv", path, content))?;

        let mut wtr = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .flexible(true)
            .from_writer(Vec::new());

        // 空表头写出来会变成一个空字段
        if let Some(headers) = table.headers.as_ref().filter(|h| !h.is_empty()) {
            wtr.write_record(headers)
                .map_err(|e| Self::encode_error(path, e))?;
        }
        for row in &table.rows {
            wtr.write_record(row)
                .map_err(|e| Self::encode_error(path, e))?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| Self::encode_error(path, e.error()))?;
        write_bytes(path, &bytes)
    }
}

/// 文本文件属性提取器（application 与 text 共用）
pub struct TextFileProperties;

impl PropertyExtractor for TextFileProperties {
    fn extract(&self, path: &Path, _category: &Category, properties: &mut Properties) -> Result<()> {
        let bytes = read_bytes(path)?;

        match std::str::from_utf8(&bytes) {
            Ok(text) => {
                properties.insert("encoding", "utf-8");
                properties.insert("lines", text.lines().count());
                properties.insert("words", text.split_whitespace().count());
                properties.insert("characters", text.chars().count());
            }
            Err(_) => properties.insert("encoding", "binary"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_category() -> Category {
        Category::new("text", "csv")
    }

    #[test]
    fn test_csv_read_with_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.csv");
        std::fs::write(&path, "name,age\nada,36\nalan,41\n").unwrap();

        let content = CsvCodec
            .read(&path, &csv_category(), &ReadOptions::default())
            .unwrap();
        let table = content.as_csv().unwrap();
        assert_eq!(table.headers, Some(vec!["name".into(), "age".into()]));
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["alan".to_string(), "41".to_string()]);
    }

    #[test]
    fn test_csv_semicolon_without_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        std::fs::write(&path, "1;2\n3;4\n").unwrap();

        let options = ReadOptions {
            delimiter: b';',
            has_headers: false,
            ..Default::default()
        };
        let content = CsvCodec.read(&path, &csv_category(), &options).unwrap();
        let table = content.as_csv().unwrap();
        assert!(table.headers.is_none());
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_ragged_csv_needs_flexible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        std::fs::write(&path, "a,b\n1\n").unwrap();

        let strict = CsvCodec.read(&path, &csv_category(), &ReadOptions::default());
        assert!(matches!(strict, Err(GcuError::DecodeError { .. })));

        let options = ReadOptions {
            flexible: true,
            ..Default::default()
        };
        assert!(CsvCodec.read(&path, &csv_category(), &options).is_ok());
    }

    #[test]
    fn test_csv_write_quotes_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let table = CsvTable::new(
            Some(vec!["k".into(), "v".into()]),
            vec![vec!["x".into(), "a,b".into()]],
        );

        CsvCodec
            .write(&path, &Content::Csv(table), &WriteOptions::default())
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "k,v\nx,\"a,b\"\n"
        );
    }

    #[test]
    fn test_text_properties() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "hello world\nsecond line\n").unwrap();

        let mut props = Properties::new();
        TextFileProperties
            .extract(&path, &Category::new("text", "plain"), &mut props)
            .unwrap();
        assert_eq!(props.get_int("lines"), Some(2));
        assert_eq!(props.get_int("words"), Some(4));
        assert_eq!(props.get_int("characters"), Some(24));
    }

    #[test]
    fn test_binary_application_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, [0x25, 0x50, 0xFF, 0xFE]).unwrap();

        let mut props = Properties::new();
        TextFileProperties
            .extract(&path, &Category::new("application", "pdf"), &mut props)
            .unwrap();
        assert_eq!(props.get("encoding").unwrap().to_string(), "binary");
        assert!(props.get("lines").is_none());
    }
}
