// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供临时目录下的完整应用装配
// ==========================================

#![allow(dead_code)]

use inventario::config::AppConfig;
use inventario::AppState;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// 临时应用环境（TempDir 需保持存活）
pub struct TestEnv {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestEnv {
    /// 平面文件目录
    pub fn data_dir(&self) -> PathBuf {
        self.state.config.data_dir.clone()
    }

    /// 直接写入某个平面文件（模拟手工编辑/外部产生的文件）
    pub fn write_data_file(&self, file_name: &str, content: &str) {
        fs::write(self.data_dir().join(file_name), content).unwrap();
    }

    pub fn read_data_file(&self, file_name: &str) -> String {
        fs::read_to_string(self.data_dir().join(file_name)).unwrap()
    }
}

/// 创建临时应用环境
pub fn create_test_env() -> TestEnv {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(AppConfig::in_dir(dir.path())).unwrap();
    TestEnv { dir, state }
}
