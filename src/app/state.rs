// ==========================================
// 库存管理系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 约束: 全部仓储共享同一个 SQLite 连接（Arc<Mutex<Connection>>）
// ==========================================

use std::fs;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::{ApiError, ApiResult, AuthApi, InventoryApi, PersistenceApi};
use crate::config::AppConfig;
use crate::db::{init_schema, open_sqlite_connection};
use crate::i18n;
use crate::importer::{ProductImporterImpl, UpsertResolver};
use crate::repository::{ProductRepository, UserRepository};
use crate::store::FlatStores;

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 生效配置
    pub config: AppConfig,

    /// 共享数据库连接
    pub conn: Arc<Mutex<Connection>>,

    /// 库存API
    pub inventory_api: Arc<InventoryApi>,

    /// 平面文件保存/查看/导入API
    pub persistence_api: Arc<PersistenceApi>,

    /// 用户注册/登录API
    pub auth_api: Arc<AuthApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并建表（幂等）
    /// 2. 创建平面文件目录
    /// 3. 设置界面语言
    /// 4. 创建所有API实例
    pub fn new(config: AppConfig) -> ApiResult<Self> {
        tracing::info!(
            db_path = %config.db_path.display(),
            data_dir = %config.data_dir.display(),
            locale = %config.locale,
            "初始化AppState"
        );

        if let Some(parent) = config.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ApiError::DatabaseConnectionError(format!("无法创建数据库目录: {}", e))
            })?;
        }
        let conn = open_sqlite_connection(&config.db_path_str())
            .map_err(|e| ApiError::DatabaseConnectionError(format!("无法打开数据库: {}", e)))?;
        init_schema(&conn)
            .map_err(|e| ApiError::DatabaseError(format!("建表失败: {}", e)))?;
        let conn = Arc::new(Mutex::new(conn));

        fs::create_dir_all(&config.data_dir)
            .map_err(|e| ApiError::StorageError(format!("无法创建数据目录: {}", e)))?;

        i18n::set_locale(&config.locale);

        // ==========================================
        // 初始化Repository层与存储层
        // ==========================================
        let product_repo = Arc::new(ProductRepository::from_connection(conn.clone()));
        let user_repo = Arc::new(UserRepository::from_connection(conn.clone()));
        let stores = Arc::new(FlatStores::in_dir(&config.data_dir));

        let importer = Arc::new(ProductImporterImpl::new(
            stores.clone(),
            UpsertResolver::new(product_repo.clone()),
        ));

        // ==========================================
        // 初始化API层
        // ==========================================
        let inventory_api = Arc::new(InventoryApi::new(product_repo));
        let persistence_api = Arc::new(PersistenceApi::new(stores, importer));
        let auth_api = Arc::new(AuthApi::new(user_repo));

        tracing::info!("AppState初始化完成");
        Ok(Self {
            config,
            conn,
            inventory_api,
            persistence_api,
            auth_api,
        })
    }
}
