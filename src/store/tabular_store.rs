// ==========================================
// 库存管理系统 - CSV 表格存储 (datos.csv)
// ==========================================
// 表头: timestamp,name,quantity,price
// 追加: 文件不存在或为空时先写表头，再追加一行（单价两位小数）
// 读取: 按表头列名映射为行记录
// ==========================================

use crate::domain::{LogEntry, StoreFormat};
use crate::store::error::{StoreError, StoreResult};
use crate::store::{empty_marker, ensure_parent_dir, read_non_empty, FlatStore};
use csv::{ReaderBuilder, WriterBuilder};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// CSV 表头
pub const HEADER: [&str; 4] = ["timestamp", "name", "quantity", "price"];

/// 单行记录（列名 -> 值）
pub type TabularRow = BTreeMap<String, String>;

/// 行解析结果
#[derive(Debug, Default)]
pub struct ParsedRows {
    pub rows: Vec<TabularRow>,
    /// 无法解析的行数
    pub skipped: usize,
}

/// 解析 CSV 字节为行记录
///
/// - 表头与值均做 TRIM
/// - 允许行长度不一致
/// - 跳过完全空白的行
pub fn parse_rows(bytes: &[u8]) -> ParsedRows {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(|h| h.trim().to_string()).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "CSV 表头读取失败");
            return ParsedRows::default();
        }
    };

    let mut parsed = ParsedRows::default();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(error = %e, "CSV 行解析失败，跳过");
                parsed.skipped += 1;
                continue;
            }
        };

        let row: TabularRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.trim().to_string()))
            .collect();

        if row.values().all(|v| v.is_empty()) {
            continue;
        }
        parsed.rows.push(row);
    }
    parsed
}

pub struct TabularStore {
    path: PathBuf,
    // 表头判定与追加须原子完成
    write_lock: Mutex<()>,
}

impl TabularStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// 读取全部行；文件不存在或为空时返回空
    pub fn read_all(&self) -> StoreResult<Vec<TabularRow>> {
        Ok(read_non_empty(&self.path)?
            .map(|bytes| parse_rows(&bytes).rows)
            .unwrap_or_default())
    }

    fn needs_header(&self) -> bool {
        fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true)
    }
}

impl FlatStore for TabularStore {
    fn format(&self) -> StoreFormat {
        StoreFormat::Tabular
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, entry: &LogEntry) -> StoreResult<LogEntry> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))?;

        ensure_parent_dir(&self.path)?;
        let write_header = self.needs_header();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(StoreError::io(&self.path))?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        if write_header {
            writer.write_record(HEADER)?;
        }
        writer.write_record([
            entry.timestamp.as_str(),
            entry.name.as_str(),
            entry.quantity.to_string().as_str(),
            entry.price_2dp().as_str(),
        ])?;
        writer.flush().map_err(StoreError::io(&self.path))?;

        tracing::debug!(path = %self.path.display(), name = %entry.name, write_header, "CSV 追加一行");
        Ok(entry.clone())
    }

    fn render(&self) -> StoreResult<String> {
        if self.needs_header() {
            return Ok(empty_marker());
        }
        Ok(serde_json::to_string_pretty(&self.read_all()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::lock_locale;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_header_written_once() {
        let dir = TempDir::new().unwrap();
        let store = TabularStore::new(dir.path().join("datos.csv"));

        store.append(&LogEntry::now("Widget", 2, 9.99)).unwrap();
        store.append(&LogEntry::now("Gadget", 1, 3.5)).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "timestamp,name,quantity,price");
        assert_eq!(raw.matches("timestamp,name").count(), 1);
        assert!(lines[2].ends_with(",Gadget,1,3.50"));
    }

    #[test]
    fn test_header_written_into_existing_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let store = TabularStore::new(file.path());
        store.append(&LogEntry::now("Widget", 2, 9.99)).unwrap();

        let rows = store.read_all().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(&"Widget".to_string()));
        assert_eq!(rows[0].get("price"), Some(&"9.99".to_string()));
    }

    #[test]
    fn test_read_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = TabularStore::new(dir.path().join("datos.csv"));
        assert!(store.read_all().unwrap().is_empty());

        let _locale = lock_locale("es");
        assert_eq!(store.render().unwrap(), "(archivo vacío)");
    }

    #[test]
    fn test_parse_rows_skip_blank_rows() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "fecha,nombre,cantidad,precio").unwrap();
        writeln!(temp_file, "2025-01-01T00:00:00, Goma ,3,0.50").unwrap();
        writeln!(temp_file, ",,,").unwrap();
        writeln!(temp_file, "2025-01-01T00:00:01,Regla,1,1.00").unwrap();

        let parsed = parse_rows(&fs::read(temp_file.path()).unwrap());
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].get("nombre"), Some(&"Goma".to_string()));
    }

    #[test]
    fn test_name_with_comma_is_quoted() {
        let dir = TempDir::new().unwrap();
        let store = TabularStore::new(dir.path().join("datos.csv"));
        store.append(&LogEntry::now("Tijeras, grandes", 1, 2.0)).unwrap();

        let rows = store.read_all().unwrap();
        assert_eq!(rows[0].get("name"), Some(&"Tijeras, grandes".to_string()));
    }
}
