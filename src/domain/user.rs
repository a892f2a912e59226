// ==========================================
// 库存管理系统 - 用户领域模型
// ==========================================
// 对齐: usuarios 表 (id, nombre, email, password_hash)
// ==========================================

use serde::{Deserialize, Serialize};

/// 系统用户
///
/// password_hash 为加盐摘要，序列化时不输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}
