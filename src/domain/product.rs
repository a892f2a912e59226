// ==========================================
// 库存管理系统 - 商品领域模型
// ==========================================
// 对齐: productos 表 (id, nombre, cantidad, precio)
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Product - 库存商品
// ==========================================
// 红线: name 为自然键（精确匹配，区分大小写）
// 约束: quantity >= 0, unit_price >= 0（表级 CHECK）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,          // 自增主键，创建后不变，不复用
    pub name: String,     // 商品名（自然键）
    pub quantity: i64,    // 库存数量
    pub unit_price: f64,  // 单价
}

impl Product {
    /// 库存价值（数量 × 单价）
    pub fn stock_value(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }

    /// 名称是否包含查询串（不区分大小写）
    ///
    /// `needle` 需由调用方预先转为小写
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

// ==========================================
// InventoryTotals - 库存汇总
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryTotals {
    pub total_items: i64,
    pub total_value: f64,
}

impl InventoryTotals {
    /// 数量合计在 i64::MAX 处饱和
    pub fn from_products(products: &[Product]) -> Self {
        products.iter().fold(Self::default(), |acc, p| Self {
            total_items: acc.total_items.saturating_add(p.quantity),
            total_value: acc.total_value + p.stock_value(),
        })
    }
}
