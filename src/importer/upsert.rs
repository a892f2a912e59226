// ==========================================
// 库存管理系统 - 按名 Upsert
// ==========================================
// 规则:
// - 名称 TRIM 后为空: 不处理，不写库
// - 名称已存在: 数量累加 max(0, q)，单价覆盖为 max(0, p)
// - 名称不存在: 以钳制后的数量/单价新建
// 约束: 不做数值转换（调用方已完成宽松转换）
// ==========================================

use crate::repository::{ProductRepository, RepositoryResult, StockUpsert};
use std::sync::Arc;

/// 单条 upsert 结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created(i64),
    Merged(i64),
    /// 名称为空，未处理
    NotProcessed,
}

impl UpsertOutcome {
    /// 是否计入导入成功数
    pub fn is_processed(&self) -> bool {
        !matches!(self, UpsertOutcome::NotProcessed)
    }
}

impl From<StockUpsert> for UpsertOutcome {
    fn from(value: StockUpsert) -> Self {
        match value {
            StockUpsert::Created(id) => UpsertOutcome::Created(id),
            StockUpsert::Merged(id) => UpsertOutcome::Merged(id),
        }
    }
}

pub struct UpsertResolver {
    repo: Arc<ProductRepository>,
}

impl UpsertResolver {
    pub fn new(repo: Arc<ProductRepository>) -> Self {
        Self { repo }
    }

    pub fn resolve(&self, name: &str, quantity: i64, unit_price: f64) -> RepositoryResult<UpsertOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(UpsertOutcome::NotProcessed);
        }

        let outcome: UpsertOutcome = self
            .repo
            .upsert_by_name(name, quantity.max(0), unit_price.max(0.0))?
            .into();

        tracing::debug!(name, quantity, unit_price, ?outcome, "upsert 完成");
        Ok(outcome)
    }
}
