// ==========================================
// 库存管理系统 - 平面文件存储错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use std::path::Path;
use thiserror::Error;

/// 平面文件存储错误类型
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("文件读写失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON 序列化失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV 读写失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("存储锁获取失败: {0}")]
    LockError(String),
}

impl StoreError {
    /// 构造带路径的 I/O 错误转换器
    pub fn io(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
        let path = path.display().to_string();
        move |source| StoreError::Io { path, source }
    }
}

/// Result 类型别名
pub type StoreResult<T> = Result<T, StoreError>;
