// ==========================================
// 库存管理系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// 约束: 连接句柄显式注入，每次调用获取、作用域结束释放
// ==========================================

pub mod error;
pub mod product_repo;
pub mod user_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use product_repo::{ProductRepository, StockUpsert};
pub use user_repo::UserRepository;
