// ==========================================
// 库存管理系统 - 用户数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑（口令摘要由 auth 模块负责）
// 表: usuarios (id, nombre, email, password_hash)
// ==========================================

use crate::domain::User;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct UserRepository {
    conn: Arc<Mutex<Connection>>,
}

fn map_user(row: &Row<'_>) -> SqliteResult<User> {
    Ok(User {
        id: row.get(0)?,
        nombre: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
    })
}

impl UserRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        let conn = self.get_conn()?;
        let user = conn
            .query_row(
                "SELECT id, nombre, email, password_hash FROM usuarios WHERE id = ?1",
                params![id],
                map_user,
            )
            .optional()?;
        Ok(user)
    }

    pub fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let conn = self.get_conn()?;
        let user = conn
            .query_row(
                "SELECT id, nombre, email, password_hash FROM usuarios WHERE email = ?1",
                params![email],
                map_user,
            )
            .optional()?;
        Ok(user)
    }

    /// 新增用户，返回自增 id
    ///
    /// 邮箱重复时返回 UniqueConstraintViolation
    pub fn create(&self, nombre: &str, email: &str, password_hash: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO usuarios (nombre, email, password_hash) VALUES (?1, ?2, ?3)",
            params![nombre, email, password_hash],
        )?;
        Ok(conn.last_insert_rowid())
    }
}
