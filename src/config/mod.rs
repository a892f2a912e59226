// ==========================================
// 库存管理系统 - 配置层
// ==========================================
// 职责: 数据库路径 / 数据目录 / 语言
// 来源: 环境变量覆写 > 用户数据目录默认值 > 当前目录回退
// ==========================================

pub mod app_config;

// 重导出核心配置
pub use app_config::{env_keys, AppConfig};
