// ==========================================
// 库存管理系统 - JSON 文档存储 (datos.json)
// ==========================================
// 文档形态: 单个 JSON 数组，缩进 2 空格，UTF-8 不转义
// 追加: 读全量 -> push -> 重写全量（O(已写记录数)）
// 容错: 文件损坏或根不是数组时按空数组处理
// ==========================================

use crate::domain::{LogEntry, StoreFormat};
use crate::store::error::{StoreError, StoreResult};
use crate::store::{ensure_parent_dir, read_non_empty, FlatStore};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct DocumentStore {
    path: PathBuf,
    // 串行化同一句柄上的 读-改-写；跨进程写入仍可能丢失更新
    write_lock: Mutex<()>,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// 读取全部元素
    ///
    /// # 返回
    /// - 文件不存在 / 为空 / JSON 损坏 / 根不是数组: 空序列
    pub fn read_all(&self) -> StoreResult<Vec<Value>> {
        let bytes = match read_non_empty(&self.path)? {
            Some(bytes) => bytes,
            None => return Ok(Vec::new()),
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(items)) => Ok(items),
            Ok(_) => {
                tracing::warn!(path = %self.path.display(), "JSON 根不是数组，按空文档处理");
                Ok(Vec::new())
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "JSON 解析失败，按空文档处理");
                Ok(Vec::new())
            }
        }
    }

    fn write_all(&self, items: &[Value]) -> StoreResult<()> {
        ensure_parent_dir(&self.path)?;
        let body = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, body).map_err(StoreError::io(&self.path))
    }
}

impl FlatStore for DocumentStore {
    fn format(&self) -> StoreFormat {
        StoreFormat::Document
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, entry: &LogEntry) -> StoreResult<LogEntry> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))?;

        let mut items = self.read_all()?;
        items.push(serde_json::to_value(entry)?);
        self.write_all(&items)?;

        tracing::debug!(
            path = %self.path.display(),
            name = %entry.name,
            total = items.len(),
            "JSON 重写文档"
        );
        Ok(entry.clone())
    }

    fn render(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(&self.read_all()?)?)
    }
}
