// ==========================================
// 库存管理系统 - 应用层
// ==========================================
// 职责: 按配置装配连接、仓储、存储与 API
// ==========================================

pub mod state;

// 重导出
pub use state::AppState;
