// ==========================================
// 库存管理系统 - 平面文件存储层
// ==========================================
// 职责: TXT / JSON / CSV 三种保存日志的追加与全量读取
// 约束: 每次操作独立打开文件，作用域结束即释放句柄
// 约束: 平面文件与库存表互不自动同步
// ==========================================

pub mod document_store;
pub mod error;
pub mod line_store;
pub mod tabular_store;

pub use document_store::DocumentStore;
pub use error::{StoreError, StoreResult};
pub use line_store::LineStore;
pub use tabular_store::{TabularRow, TabularStore};

use crate::domain::{LogEntry, StoreFormat};
use crate::i18n::t;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// 文件不存在时的展示占位（随当前语言）
pub fn empty_marker() -> String {
    t("common.empty_file")
}

// ==========================================
// FlatStore Trait
// ==========================================
// 用途: 单一格式的平面文件存储句柄
// 实现者: LineStore, DocumentStore, TabularStore
pub trait FlatStore: Send + Sync {
    /// 存储格式
    fn format(&self) -> StoreFormat;

    /// 文件路径
    fn path(&self) -> &Path;

    /// 追加一条保存记录，返回实际写入的条目
    fn append(&self, entry: &LogEntry) -> StoreResult<LogEntry>;

    /// 全量内容的展示文本
    fn render(&self) -> StoreResult<String>;

    /// 读取导入源
    ///
    /// # 返回
    /// - Ok(Some(bytes)): 文件存在且非空
    /// - Ok(None): 文件不存在或长度为 0
    fn read_source(&self) -> StoreResult<Option<Vec<u8>>> {
        read_non_empty(self.path())
    }
}

// ==========================================
// FlatStores - 三种存储的集合
// ==========================================
pub struct FlatStores {
    pub line: LineStore,
    pub document: DocumentStore,
    pub tabular: TabularStore,
}

impl FlatStores {
    /// 在数据目录下创建三种存储（datos.txt / datos.json / datos.csv）
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            line: LineStore::new(data_dir.join(StoreFormat::Line.file_name())),
            document: DocumentStore::new(data_dir.join(StoreFormat::Document.file_name())),
            tabular: TabularStore::new(data_dir.join(StoreFormat::Tabular.file_name())),
        }
    }

    /// 按格式取存储句柄
    pub fn get(&self, format: StoreFormat) -> &dyn FlatStore {
        match format {
            StoreFormat::Line => &self.line,
            StoreFormat::Document => &self.document,
            StoreFormat::Tabular => &self.tabular,
        }
    }
}

/// 读取文件全部字节；不存在或为空时返回 None，路径不是普通文件时报错
pub(crate) fn read_non_empty(path: &Path) -> StoreResult<Option<Vec<u8>>> {
    match fs::metadata(path) {
        Ok(meta) if !meta.is_file() => {
            let e = std::io::Error::new(ErrorKind::InvalidInput, "不是普通文件");
            Err(StoreError::io(path)(e))
        }
        Ok(meta) if meta.len() == 0 => Ok(None),
        Ok(_) => fs::read(path).map(Some).map_err(StoreError::io(path)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path)(e)),
    }
}

/// 确保父目录存在
pub(crate) fn ensure_parent_dir(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(StoreError::io(parent))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_non_empty_missing_and_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nada.txt");
        assert!(read_non_empty(&path).unwrap().is_none());

        fs::write(&path, "").unwrap();
        assert!(read_non_empty(&path).unwrap().is_none());

        fs::write(&path, "x").unwrap();
        assert_eq!(read_non_empty(&path).unwrap(), Some(b"x".to_vec()));
    }

    #[test]
    fn test_read_non_empty_rejects_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datos.txt");
        fs::create_dir(&path).unwrap();
        assert!(matches!(read_non_empty(&path), Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_stores_dispatch_by_format() {
        let dir = TempDir::new().unwrap();
        let stores = FlatStores::in_dir(dir.path());
        for format in StoreFormat::IMPORT_ORDER {
            let store = stores.get(format);
            assert_eq!(store.format(), format);
            assert_eq!(store.path(), dir.path().join(format.file_name()));
        }
    }
}
