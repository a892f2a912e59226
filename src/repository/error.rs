// ==========================================
// 库存管理系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    #[error("CHECK 约束违反: {0}")]
    CheckConstraintViolation(String),
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("CHECK") {
                    RepositoryError::CheckConstraintViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_unique_violation_mapping() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (k TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();
        let err: RepositoryError = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
    }

    #[test]
    fn test_no_rows_mapping() {
        let err: RepositoryError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }
}
