// ==========================================
// 库存管理系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 格式错误的行/记录不在此列，它们在解码阶段被跳过并计数
// ==========================================

use crate::repository::RepositoryError;
use crate::store::StoreError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("导入源读取失败: {0}")]
    Store(#[from] StoreError),

    #[error("JSON 文档无效: {0}")]
    InvalidDocument(String),

    // ===== 数据库错误 =====
    #[error("库存表写入失败: {0}")]
    Repository(#[from] RepositoryError),
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
