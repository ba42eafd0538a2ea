//! # TypedFile - 带类型的文件对象
//!
//! 表示磁盘上的一个文件：由文件名推断类别，按需读取内容和属性，
//! 写入时通过同一个分派表选择编码器。
//!
//! ## 构造规则
//! - 给定 `path` 时，从中拆分出 `filename` 和 `directory`
//! - 给定 `filename` 时，推断 `extension` 和 `category`（未知类型构造失败）
//! - 给定 `content` 时跳过自动读取
//! - `fetch_properties = true` 且有 `path` 时，构造时提取属性
//! - `auto_read` 默认为 true；批量导入路径显式传入 false
//!
//! ## 依赖关系
//! - 被 `ingest/` 和 `commands/` 使用
//! - 使用 `codecs/` 分派表和 `models/`

use crate::codecs::{CodecRegistry, Dispatch, ReadOptions, WriteOptions};
use crate::error::{GcuError, Result};
use crate::models::{category, Category, Content, Properties};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// 带类型的文件
#[derive(Debug, Clone)]
pub struct TypedFile {
    path: Option<PathBuf>,
    filename: Option<String>,
    directory: Option<PathBuf>,
    extension: Option<String>,
    category: Option<Category>,
    content: Option<Content>,
    properties: Option<Properties>,
    registry: Arc<CodecRegistry>,
}

/// TypedFile 构造器
#[derive(Debug, Default)]
pub struct TypedFileBuilder {
    path: Option<PathBuf>,
    filename: Option<String>,
    directory: Option<PathBuf>,
    content: Option<Content>,
    fetch_properties: bool,
    auto_read: Option<bool>,
    read_options: ReadOptions,
    registry: Option<Arc<CodecRegistry>>,
}

impl TypedFileBuilder {
    /// 文件路径（会覆盖 filename 和 directory）
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// 预先提供的内容，跳过自动读取
    pub fn content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    /// 构造时提取属性
    pub fn fetch_properties(mut self, fetch: bool) -> Self {
        self.fetch_properties = fetch;
        self
    }

    /// 构造时自动读取内容（默认 true）
    pub fn auto_read(mut self, auto_read: bool) -> Self {
        self.auto_read = Some(auto_read);
        self
    }

    /// 传递给读取分派的选项
    pub fn read_options(mut self, options: ReadOptions) -> Self {
        self.read_options = options;
        self
    }

    /// 使用自定义分派表
    pub fn registry(mut self, registry: Arc<CodecRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// 构造 TypedFile
    pub fn build(self) -> Result<TypedFile> {
        let mut filename = self.filename;
        let mut directory = self.directory;

        if let Some(path) = &self.path {
            filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned());
            directory = path.parent().map(Path::to_path_buf);
        }

        let (extension, category) = match &filename {
            Some(name) => (
                category::extension_of(name).map(str::to_string),
                Some(Category::from_filename(name)?),
            ),
            None => (None, None),
        };

        let mut file = TypedFile {
            path: self.path,
            filename,
            directory,
            extension,
            category,
            content: self.content,
            properties: None,
            registry: self.registry.unwrap_or_else(CodecRegistry::shared),
        };

        if file.path.is_some() && self.fetch_properties {
            file.file_properties()?;
        }

        // 只有文件名、没有位置的文件无从读取
        let readable = file.filename.is_some() && file.location().is_some();
        if self.auto_read.unwrap_or(true) && readable && file.content.is_none() {
            file.read_content(&self.read_options)?;
        }

        Ok(file)
    }
}

impl TypedFile {
    pub fn builder() -> TypedFileBuilder {
        TypedFileBuilder::default()
    }

    /// 打开磁盘上的文件并立即读取内容
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::builder().path(path).build()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }

    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn properties(&self) -> Option<&Properties> {
        self.properties.as_ref()
    }

    /// 替换内容（下次 `write` 时写出）
    pub fn set_content(&mut self, content: Content) {
        self.content = Some(content);
    }

    /// 文件在磁盘上的位置：`path`，或 `directory/filename`
    pub fn location(&self) -> Option<PathBuf> {
        if let Some(path) = &self.path {
            return Some(path.clone());
        }
        match (&self.directory, &self.filename) {
            (Some(dir), Some(name)) => Some(dir.join(name)),
            _ => None,
        }
    }

    fn display_name(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| "<unnamed>".to_string())
    }

    fn require_category(&self) -> Result<&Category> {
        self.category.as_ref().ok_or_else(|| GcuError::InvalidArgument(
            "file has no filename, category is unknown".to_string(),
        ))
    }

    fn require_location(&self) -> Result<PathBuf> {
        self.location().ok_or_else(|| GcuError::MissingPath {
            filename: self.display_name(),
        })
    }

    /// 读取内容。类别没有注册编解码器时返回 `Dispatch::Unsupported`，内容置空
    pub fn read_content(&mut self, options: &ReadOptions) -> Result<Dispatch<&Content>> {
        let category = self.require_category()?.clone();

        let Some(codec) = self.registry.codec_for(&category) else {
            debug!(file = %self.display_name(), %category, "content retrieval not supported");
            self.content = None;
            return Ok(Dispatch::Unsupported(category));
        };

        let location = self.require_location()?;
        debug!(file = %location.display(), codec = codec.name(), "reading content");
        let content = codec.read(&location, &category, options)?;

        let content: &Content = self.content.insert(content);
        Ok(Dispatch::Handled(content))
    }

    /// 将内容写入 `directory/filename`，返回写入的路径
    pub fn write(&self, options: &WriteOptions) -> Result<Dispatch<PathBuf>> {
        let category = self.require_category()?;

        let Some(codec) = self.registry.codec_for(category) else {
            debug!(file = %self.display_name(), %category, "content writing not supported");
            return Ok(Dispatch::Unsupported(category.clone()));
        };

        let content = self.content.as_ref().ok_or_else(|| GcuError::MissingContent {
            filename: self.display_name(),
        })?;
        let location = self.require_location()?;

        debug!(file = %location.display(), codec = codec.name(), "writing content");
        codec.write(&location, content, options)?;

        Ok(Dispatch::Handled(location))
    }

    /// 提取文件属性并保存到 `properties`
    pub fn file_properties(&mut self) -> Result<Dispatch<&Properties>> {
        let category = self.require_category()?.clone();

        let Some(extractor) = self.registry.extractor_for(&category) else {
            debug!(file = %self.display_name(), %category, "property retrieval not supported");
            return Ok(Dispatch::Unsupported(category));
        };

        let location = self.require_location()?;
        let metadata = std::fs::metadata(&location).map_err(|e| GcuError::read(&location, e))?;

        let mut properties = Properties::new();
        properties.insert("filename", self.display_name());
        if let Some(ext) = &self.extension {
            properties.insert("extension", ext.as_str());
        }
        properties.insert("mime", category.mime());
        properties.insert("size_bytes", metadata.len());

        extractor.extract(&location, &category, &mut properties)?;

        let properties: &Properties = self.properties.insert(properties);
        Ok(Dispatch::Handled(properties))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::image::tests::tiny_png;
    use crate::models::CsvTable;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_path_splits_into_filename_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hi").unwrap();

        let file = TypedFile::open(&path).unwrap();
        assert_eq!(file.filename(), Some("notes.txt"));
        assert_eq!(file.directory(), Some(dir.path()));
        assert_eq!(file.extension(), Some("txt"));
        assert_eq!(file.category(), Some(&Category::new("text", "plain")));
        assert_eq!(file.content(), Some(&Content::Text("hi".to_string())));
    }

    #[test]
    fn test_unknown_type_fails_construction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.zzz");
        fs::write(&path, "x").unwrap();

        for _ in 0..2 {
            let result = TypedFile::builder().path(&path).auto_read(false).build();
            assert!(matches!(result, Err(GcuError::UnknownType { .. })));
        }
    }

    #[test]
    fn test_auto_read_can_be_suppressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.json");
        fs::write(&path, "{\"k\": 1}").unwrap();

        let mut file = TypedFile::builder().path(&path).auto_read(false).build().unwrap();
        assert!(file.content().is_none());

        let read = file.read_content(&ReadOptions::default()).unwrap();
        assert_eq!(read, Dispatch::Handled(&Content::Json(json!({"k": 1}))));
    }

    #[test]
    fn test_supplied_content_skips_read() {
        // 文件不存在：如果尝试读取会报错
        let file = TypedFile::builder()
            .path("/nonexistent/dir/new.txt")
            .content(Content::Text("fresh".into()))
            .build()
            .unwrap();
        assert_eq!(file.content().and_then(Content::as_text), Some("fresh"));
    }

    #[test]
    fn test_content_only_file() {
        let file = TypedFile::builder()
            .filename("draft.txt")
            .content(Content::Text("x".into()))
            .build()
            .unwrap();
        assert!(file.path().is_none());
        assert!(file.location().is_none());

        let result = file.write(&WriteOptions::default());
        assert!(matches!(result, Err(GcuError::MissingPath { .. })));
    }

    #[test]
    fn test_filename_with_directory_writes_there() {
        let dir = tempfile::tempdir().unwrap();
        let file = TypedFile::builder()
            .filename("out.txt")
            .directory(dir.path())
            .content(Content::Text("written".into()))
            .build()
            .unwrap();

        let written = file.write(&WriteOptions::default()).unwrap();
        assert_eq!(written, Dispatch::Handled(dir.path().join("out.txt")));
        assert_eq!(fs::read_to_string(dir.path().join("out.txt")).unwrap(), "written");
    }

    #[test]
    fn test_round_trip_exact_formats() {
        let dir = tempfile::tempdir().unwrap();
        let cases = [
            ("a.txt", "line one\nline two\n"),
            ("b.json", "{\"nested\": {\"list\": [1, 2.5, \"x\"]}, \"ok\": true}"),
            ("c.csv", "h1,h2\n1,2\n\"q,1\",3\n"),
            ("d.csv", ""),
        ];

        for (name, raw) in cases {
            let src = dir.path().join(name);
            fs::write(&src, raw).unwrap();
            let original = TypedFile::open(&src).unwrap();

            let dst = dir.path().join(format!("copy-{}", name));
            let copy = TypedFile::builder()
                .path(&dst)
                .content(original.content().unwrap().clone())
                .build()
                .unwrap();
            assert!(copy.write(&WriteOptions::default()).unwrap().is_handled());

            let reread = TypedFile::open(&dst).unwrap();
            assert_eq!(reread.content(), original.content(), "round trip of {}", name);
        }
    }

    #[test]
    fn test_unsupported_category_is_soft() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<html></html>").unwrap();

        // 自动读取也不会失败
        let mut file = TypedFile::open(&path).unwrap();
        assert!(file.content().is_none());

        let read = file.read_content(&ReadOptions::default()).unwrap();
        assert_eq!(read, Dispatch::Unsupported(Category::new("text", "html")));

        file.set_content(Content::Text("<p/>".into()));
        assert!(file.write(&WriteOptions::default()).unwrap().is_unsupported());
        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_unsupported_properties_with_custom_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("n.txt");
        fs::write(&path, "abc").unwrap();

        let mut file = TypedFile::builder()
            .path(&path)
            .registry(Arc::new(CodecRegistry::empty()))
            .build()
            .unwrap();

        assert!(file.content().is_none());
        assert!(file.file_properties().unwrap().is_unsupported());
        assert!(file.properties().is_none());
    }

    #[test]
    fn test_fetch_properties_on_build() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pic.png");
        fs::write(&path, tiny_png(12, 7)).unwrap();

        let file = TypedFile::builder()
            .path(&path)
            .fetch_properties(true)
            .auto_read(false)
            .build()
            .unwrap();

        let props = file.properties().unwrap();
        assert_eq!(props.get("mime").unwrap().to_string(), "image/png");
        assert_eq!(props.get_int("width"), Some(12));
        assert_eq!(props.get_int("size_bytes"), Some(tiny_png(12, 7).len() as u64));
        assert!(file.content().is_none());
    }

    #[test]
    fn test_read_options_forwarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "1\t2\n").unwrap();

        let file = TypedFile::builder()
            .path(&path)
            .read_options(ReadOptions {
                delimiter: b'\t',
                has_headers: false,
                flexible: false,
            })
            .build()
            .unwrap();

        assert_eq!(
            file.content(),
            Some(&Content::Csv(CsvTable::new(
                None,
                vec![vec!["1".into(), "2".into()]]
            )))
        );
    }

    #[test]
    fn test_write_without_content() {
        let dir = tempfile::tempdir().unwrap();
        let file = TypedFile::builder()
            .path(dir.path().join("empty.json"))
            .auto_read(false)
            .build()
            .unwrap();
        assert!(matches!(
            file.write(&WriteOptions::default()),
            Err(GcuError::MissingContent { .. })
        ));
    }
}
