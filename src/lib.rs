// ==========================================
// 库存管理系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite + 平面文件 (TXT/JSON/CSV)
// 系统定位: 库存表为唯一事实源，平面文件为保存日志
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "es");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 平面文件存储层 - TXT/JSON/CSV
pub mod store;

// 导入层 - 平面文件 -> 库存表
pub mod importer;

// 配置层 - 路径与环境变量
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/建表）
pub mod db;

// 用户口令摘要
pub mod auth;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组件装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{InventoryTotals, LogEntry, ParsedRecord, Product, StoreFormat, User};

pub use importer::{ImportReport, ImportStatus, ProductImporter, ProductImporterImpl, UpsertOutcome, UpsertResolver};

pub use api::{AuthApi, InventoryApi, PersistenceApi};

pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Inventario";
