// ==========================================
// 库存管理系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 集中建表（productos / usuarios）
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 库存表与用户表 DDL
///
/// 说明：
/// - CHECK 约束保证库存数量与单价非负
/// - usuarios.email 唯一，注册重复邮箱由约束兜底
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS productos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre TEXT NOT NULL,
    cantidad INTEGER NOT NULL CHECK(cantidad >= 0),
    precio REAL NOT NULL CHECK(precio >= 0)
);

CREATE TABLE IF NOT EXISTS usuarios (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);
"#;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let mut conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    install_sql_trace(&mut conn);
    Ok(conn)
}

/// 初始化 schema（幂等）
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    tracing::debug!("schema 初始化完成");
    Ok(())
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 按需安装 SQL 语句 trace
///
/// 开关：`INVENTARIO_TRACE_SQL=1`
fn install_sql_trace(conn: &mut Connection) {
    let enabled = std::env::var("INVENTARIO_TRACE_SQL")
        .map(|v| is_true(&v))
        .unwrap_or(false);

    if enabled {
        conn.trace(Some(sql_trace_callback));
    } else {
        conn.trace(None);
    }
}

fn sql_trace_callback(sql: &str) {
    tracing::trace!(target: "inventario::sql", "{}", sql.trim().replace('\n', " "));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('productos', 'usuarios')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_check_constraint_rejects_negative_quantity() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO productos(nombre, cantidad, precio) VALUES ('X', -1, 1.0)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_is_true() {
        assert!(is_true("1"));
        assert!(is_true(" Yes "));
        assert!(!is_true("0"));
        assert!(!is_true(""));
    }
}
