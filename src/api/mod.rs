// ==========================================
// 库存管理系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行/外部调用方使用
// ==========================================

pub mod auth_api;
pub mod error;
pub mod inventory_api;
pub mod persistence_api;

// 重导出核心类型
pub use auth_api::AuthApi;
pub use error::{ApiError, ApiResult};
pub use inventory_api::{InventoryApi, InventoryView};
pub use persistence_api::{ImportApiResponse, PersistenceApi, SaveResponse};
