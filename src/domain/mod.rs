// ==========================================
// 库存管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含文件读写逻辑
// ==========================================

pub mod entry;
pub mod product;
pub mod user;

// 重导出核心类型
pub use entry::{LogEntry, ParsedRecord, StoreFormat};
pub use product::{InventoryTotals, Product};
pub use user::User;
