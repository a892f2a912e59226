// ==========================================
// 库存管理系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换下层错误为用户友好的错误消息
// ==========================================

use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use crate::store::StoreError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    #[error("认证失败: {0}")]
    InvalidCredentials(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("文件存储错误: {0}")]
    StorageError(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),
}

// ==========================================
// 从 RepositoryError 转换
// 目的: 将Repository层的技术错误转换为用户友好的业务错误
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::CheckConstraintViolation(msg) => {
                ApiError::InvalidInput(format!("CHECK 约束违反: {}", msg))
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::StorageError(err.to_string())
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
