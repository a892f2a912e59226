// ==========================================
// 库存管理系统 - 应用配置
// ==========================================
// 职责: 解析数据库路径、平面文件目录、界面语言
// ==========================================

use crate::domain::StoreFormat;
use std::path::{Path, PathBuf};

/// 环境变量键
pub mod env_keys {
    pub const DB_PATH: &str = "INVENTARIO_DB_PATH";
    pub const DATA_DIR: &str = "INVENTARIO_DATA_DIR";
    pub const LOCALE: &str = "INVENTARIO_LOCALE";
}

/// 默认语言
pub const DEFAULT_LOCALE: &str = "es";

const DB_FILE_NAME: &str = "inventario.db";
const DATA_DIR_NAME: &str = "datos";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// SQLite 文件路径
    pub db_path: PathBuf,
    /// 平面文件目录（datos.txt / datos.json / datos.csv）
    pub data_dir: PathBuf,
    /// 界面语言
    pub locale: String,
}

impl AppConfig {
    /// 从环境变量解析配置
    ///
    /// # 环境变量
    /// - INVENTARIO_DB_PATH: 数据库文件路径
    /// - INVENTARIO_DATA_DIR: 平面文件目录
    /// - INVENTARIO_LOCALE: 语言（es / en）
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// 以根目录构造（测试/便携部署）
    pub fn in_dir(root: &Path) -> Self {
        Self {
            db_path: root.join(DB_FILE_NAME),
            data_dir: root.join(DATA_DIR_NAME),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let base = Self::in_dir(&default_root());
        Self {
            db_path: non_empty(env_keys::DB_PATH)
                .map(PathBuf::from)
                .unwrap_or(base.db_path),
            data_dir: non_empty(env_keys::DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or(base.data_dir),
            locale: non_empty(env_keys::LOCALE).unwrap_or(base.locale),
        }
    }

    /// 数据库路径（字符串形式，供 rusqlite 打开）
    pub fn db_path_str(&self) -> String {
        self.db_path.to_string_lossy().into_owned()
    }

    /// 某一格式平面文件的完整路径
    pub fn store_path(&self, format: StoreFormat) -> PathBuf {
        self.data_dir.join(format.file_name())
    }
}

/// 默认根目录
///
/// 使用用户数据目录；开发构建使用独立目录，避免污染正式数据
fn default_root() -> PathBuf {
    match dirs::data_dir() {
        Some(data_dir) => {
            if cfg!(debug_assertions) {
                data_dir.join("inventario-dev")
            } else {
                data_dir.join("inventario")
            }
        }
        None => PathBuf::from("."),
    }
}
