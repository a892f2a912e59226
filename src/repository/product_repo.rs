// ==========================================
// 库存管理系统 - 商品数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑（不做钳制、不做校验）
// 表: productos (id, nombre, cantidad, precio)
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::Product;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex, MutexGuard};

/// 按名称写入库存的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockUpsert {
    /// 新建记录
    Created(i64),
    /// 合并到已有记录（数量累加、单价覆盖）
    Merged(i64),
}

impl StockUpsert {
    pub fn id(&self) -> i64 {
        match self {
            StockUpsert::Created(id) | StockUpsert::Merged(id) => *id,
        }
    }
}

// ==========================================
// ProductRepository - 商品仓储
// ==========================================
/// 商品仓储
/// 职责: 管理 productos 表的 CRUD 与按名 upsert
pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
}

fn map_product(row: &Row<'_>) -> SqliteResult<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        unit_price: row.get(3)?,
    })
}

impl ProductRepository {
    /// 打开数据库并确保表存在
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 全表扫描，按 id 升序
    pub fn list_all(&self) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, nombre, cantidad, precio FROM productos ORDER BY id")?;
        let products = stmt
            .query_map([], map_product)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(products)
    }

    /// 按主键查询
    ///
    /// # 返回
    /// - Ok(Some(Product)): 找到
    /// - Ok(None): 未找到
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        let product = conn
            .query_row(
                "SELECT id, nombre, cantidad, precio FROM productos WHERE id = ?1",
                params![id],
                map_product,
            )
            .optional()?;
        Ok(product)
    }

    /// 按名称精确查询（区分大小写）
    pub fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        let product = conn
            .query_row(
                "SELECT id, nombre, cantidad, precio FROM productos WHERE nombre = ?1 ORDER BY id LIMIT 1",
                params![name],
                map_product,
            )
            .optional()?;
        Ok(product)
    }

    /// 新增商品，返回自增 id
    pub fn insert(&self, name: &str, quantity: i64, unit_price: f64) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO productos(nombre, cantidad, precio) VALUES (?1, ?2, ?3)",
            params![name, quantity, unit_price],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 整行更新
    ///
    /// # 返回
    /// - Ok(()): 更新成功
    /// - Err(NotFound): id 不存在
    pub fn update(
        &self,
        id: i64,
        name: &str,
        quantity: i64,
        unit_price: f64,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE productos SET nombre = ?1, cantidad = ?2, precio = ?3 WHERE id = ?4",
            params![name, quantity, unit_price, id],
        )?;
        if affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// 删除（物理删除，不可恢复）
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM productos WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// 按名称写入库存
    ///
    /// - 名称已存在: cantidad += quantity（在 i64::MAX 处饱和）, precio = unit_price
    /// - 名称不存在: 新建
    ///
    /// 查找与写入在同一次连接获取、同一事务内完成
    /// 累加在 Rust 侧完成：SQLite 整数溢出会把 cantidad 变成 REAL，导致整表读取失败
    pub fn upsert_by_name(
        &self,
        name: &str,
        quantity: i64,
        unit_price: f64,
    ) -> RepositoryResult<StockUpsert> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let existing: Option<(i64, i64)> = tx
            .query_row(
                "SELECT id, cantidad FROM productos WHERE nombre = ?1 ORDER BY id LIMIT 1",
                params![name],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let outcome = match existing {
            Some((id, current)) => {
                tx.execute(
                    "UPDATE productos SET cantidad = ?1, precio = ?2 WHERE id = ?3",
                    params![current.saturating_add(quantity), unit_price, id],
                )?;
                StockUpsert::Merged(id)
            }
            None => {
                tx.execute(
                    "INSERT INTO productos(nombre, cantidad, precio) VALUES (?1, ?2, ?3)",
                    params![name, quantity, unit_price],
                )?;
                StockUpsert::Created(tx.last_insert_rowid())
            }
        };

        tx.commit()?;
        Ok(outcome)
    }
}

fn not_found(id: i64) -> RepositoryError {
    RepositoryError::NotFound {
        entity: "Product".to_string(),
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> ProductRepository {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        ProductRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_insert_and_list_ordered_by_id() {
        let repo = setup();
        let a = repo.insert("Cuaderno", 3, 2.5).unwrap();
        let b = repo.insert("Borrador", 1, 0.4).unwrap();
        assert!(b > a);

        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Cuaderno");
        assert_eq!(all[1].name, "Borrador");
    }

    #[test]
    fn test_find_by_name_is_case_sensitive() {
        let repo = setup();
        repo.insert("Lápiz", 1, 0.5).unwrap();
        assert!(repo.find_by_name("Lápiz").unwrap().is_some());
        assert!(repo.find_by_name("lápiz").unwrap().is_none());
    }

    #[test]
    fn test_upsert_by_name_merges() {
        let repo = setup();
        let created = repo.upsert_by_name("X", 5, 1.0).unwrap();
        assert!(matches!(created, StockUpsert::Created(_)));

        let merged = repo.upsert_by_name("X", 3, 2.0).unwrap();
        assert_eq!(merged, StockUpsert::Merged(created.id()));

        let p = repo.find_by_id(created.id()).unwrap().unwrap();
        assert_eq!(p.quantity, 8);
        assert_eq!(p.unit_price, 2.0);
    }

    #[test]
    fn test_update_and_delete_missing_id() {
        let repo = setup();
        assert!(matches!(
            repo.update(99, "X", 1, 1.0),
            Err(RepositoryError::NotFound { .. })
        ));
        assert!(matches!(repo.delete(99), Err(RepositoryError::NotFound { .. })));
    }

    #[test]
    fn test_delete_ids_not_reused() {
        let repo = setup();
        let first = repo.insert("A", 1, 1.0).unwrap();
        repo.delete(first).unwrap();
        let second = repo.insert("B", 1, 1.0).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_negative_quantity_rejected_by_table() {
        let repo = setup();
        assert!(matches!(
            repo.insert("Z", -1, 1.0),
            Err(RepositoryError::CheckConstraintViolation(_))
        ));
    }

    #[test]
    fn test_new_opens_file_database() {
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();

        let id = ProductRepository::new(db_path).unwrap().insert("Regla", 2, 1.0).unwrap();

        // 重新打开后数据仍在，建表幂等
        let reopened = ProductRepository::new(db_path).unwrap();
        assert_eq!(reopened.find_by_id(id).unwrap().unwrap().quantity, 2);
    }

    #[test]
    fn test_upsert_saturates_at_max_quantity() {
        let repo = setup();
        repo.upsert_by_name("Big", i64::MAX, 1.0).unwrap();
        repo.upsert_by_name("Big", i64::MAX, 1.0).unwrap();

        // 整表读取不受影响
        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].quantity, i64::MAX);
    }
}
