// ==========================================
// 库存管理系统 - 行文本存储 (datos.txt)
// ==========================================
// 行格式: "<时间戳> | <名称> | <数量> | <单价两位小数>\n"
// 追加: 仅追加模式打开，写入一行
// ==========================================

use crate::domain::{LogEntry, StoreFormat};
use crate::store::error::{StoreError, StoreResult};
use crate::store::{empty_marker, ensure_parent_dir, FlatStore};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// 字段分隔符
pub const FIELD_SEPARATOR: char = '|';

pub struct LineStore {
    path: PathBuf,
}

impl LineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 序列化为单行文本（含换行符）
    pub fn format_line(entry: &LogEntry) -> String {
        format!(
            "{} | {} | {} | {}\n",
            entry.timestamp,
            entry.name,
            entry.quantity,
            entry.price_2dp()
        )
    }

    /// 读取原始内容；文件不存在时返回占位文本
    pub fn read_all(&self) -> StoreResult<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(empty_marker()),
            Err(e) => Err(StoreError::io(&self.path)(e)),
        }
    }
}

impl FlatStore for LineStore {
    fn format(&self) -> StoreFormat {
        StoreFormat::Line
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, entry: &LogEntry) -> StoreResult<LogEntry> {
        ensure_parent_dir(&self.path)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(StoreError::io(&self.path))?;
        file.write_all(Self::format_line(entry).as_bytes())
            .map_err(StoreError::io(&self.path))?;

        tracing::debug!(path = %self.path.display(), name = %entry.name, "TXT 追加一行");
        Ok(entry.clone())
    }

    fn render(&self) -> StoreResult<String> {
        self.read_all()
    }
}
