// ==========================================
// 库存API
// ==========================================
// 职责: 库存表的列表/搜索/汇总与增改删
// 说明: 搜索在调用方完成（全表扫描后按名称子串过滤，不区分大小写）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{InventoryTotals, Product};
use crate::i18n::t;
use crate::repository::ProductRepository;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 库存列表视图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryView {
    /// 过滤后的商品（按 id 升序）
    pub products: Vec<Product>,
    /// 过滤后商品的汇总
    pub totals: InventoryTotals,
    /// 规范化后的查询串（小写、已 TRIM）
    pub query: String,
}

pub struct InventoryApi {
    repo: Arc<ProductRepository>,
}

impl InventoryApi {
    pub fn new(repo: Arc<ProductRepository>) -> Self {
        Self { repo }
    }

    /// 列出商品
    ///
    /// # 参数
    /// - query: 名称子串（可选，不区分大小写）
    pub fn list(&self, query: Option<&str>) -> ApiResult<InventoryView> {
        let query = query.unwrap_or("").trim().to_lowercase();
        let mut products = self.repo.list_all()?;
        if !query.is_empty() {
            products.retain(|p| p.name_contains(&query));
        }

        let totals = InventoryTotals::from_products(&products);
        Ok(InventoryView {
            products,
            totals,
            query,
        })
    }

    pub fn get(&self, id: i64) -> ApiResult<Product> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(t("inventory.not_found")))
    }

    /// 新增商品
    ///
    /// # 校验
    /// - 名称 TRIM 后非空
    /// - 数量、单价非负
    pub fn create(&self, name: &str, quantity: i64, unit_price: f64) -> ApiResult<Product> {
        let name = validate(name, quantity, unit_price)?;
        let id = self.repo.insert(&name, quantity, unit_price)?;
        tracing::info!(id, name = %name, quantity, unit_price, "商品已创建");

        Ok(Product {
            id,
            name,
            quantity,
            unit_price,
        })
    }

    /// 整行更新
    pub fn update(&self, id: i64, name: &str, quantity: i64, unit_price: f64) -> ApiResult<Product> {
        let name = validate(name, quantity, unit_price)?;
        self.repo.update(id, &name, quantity, unit_price)?;
        tracing::info!(id, name = %name, quantity, unit_price, "商品已更新");

        Ok(Product {
            id,
            name,
            quantity,
            unit_price,
        })
    }

    /// 删除商品（不可恢复）
    pub fn delete(&self, id: i64) -> ApiResult<()> {
        self.repo.delete(id)?;
        tracing::info!(id, "商品已删除");
        Ok(())
    }
}

fn validate(name: &str, quantity: i64, unit_price: f64) -> ApiResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput(t("inventory.name_required")));
    }
    if quantity < 0 || unit_price < 0.0 || !unit_price.is_finite() {
        return Err(ApiError::InvalidInput(t("inventory.negative_values")));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use rusqlite::Connection;
    use std::sync::Mutex;

    fn setup() -> InventoryApi {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        InventoryApi::new(Arc::new(ProductRepository::from_connection(Arc::new(
            Mutex::new(conn),
        ))))
    }

    #[test]
    fn test_search_case_insensitive_and_totals() {
        let api = setup();
        api.create("Cuaderno Rojo", 2, 3.0).unwrap();
        api.create("Lápiz", 10, 0.5).unwrap();
        api.create("cuaderno azul", 1, 4.0).unwrap();

        let view = api.list(Some("  CUADERNO ")).unwrap();
        assert_eq!(view.query, "cuaderno");
        assert_eq!(view.products.len(), 2);
        assert_eq!(view.totals.total_items, 3);
        assert!((view.totals.total_value - 10.0).abs() < 1e-9);

        let all = api.list(None).unwrap();
        assert_eq!(all.products.len(), 3);
        assert_eq!(all.totals.total_items, 13);
    }

    #[test]
    fn test_create_validation() {
        let api = setup();
        assert!(matches!(api.create("  ", 1, 1.0), Err(ApiError::InvalidInput(_))));
        assert!(matches!(api.create("X", -1, 1.0), Err(ApiError::InvalidInput(_))));
        assert!(matches!(api.create("X", 1, -0.5), Err(ApiError::InvalidInput(_))));
        assert!(api.list(None).unwrap().products.is_empty());
    }

    #[test]
    fn test_update_get_delete() {
        let api = setup();
        let p = api.create("Regla", 1, 1.0).unwrap();

        let updated = api.update(p.id, " Regla 30cm ", 4, 1.25).unwrap();
        assert_eq!(updated.name, "Regla 30cm");
        assert_eq!(api.get(p.id).unwrap(), updated);

        api.delete(p.id).unwrap();
        assert!(matches!(api.get(p.id), Err(ApiError::NotFound(_))));
        assert!(matches!(api.delete(p.id), Err(ApiError::NotFound(_))));
    }
}
