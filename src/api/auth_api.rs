// ==========================================
// 用户注册/登录API
// ==========================================
// 说明: 邮箱统一小写后存储与查找；登录失败不区分"用户不存在"与"口令错误"
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::auth::{hash_password, verify_password};
use crate::domain::User;
use crate::i18n::{t, t_with_args};
use crate::repository::{RepositoryError, UserRepository};
use std::sync::Arc;

pub struct AuthApi {
    users: Arc<UserRepository>,
}

impl AuthApi {
    pub fn new(users: Arc<UserRepository>) -> Self {
        Self { users }
    }

    /// 注册新用户
    ///
    /// # 错误
    /// - InvalidInput: 字段为空、邮箱格式不合法
    /// - BusinessRuleViolation: 邮箱已注册
    pub fn register(&self, nombre: &str, email: &str, password: &str) -> ApiResult<User> {
        let nombre = nombre.trim();
        let email = email.trim().to_lowercase();
        if nombre.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ApiError::InvalidInput(t("auth.fields_required")));
        }
        if !is_plausible_email(&email) {
            return Err(ApiError::InvalidInput(t_with_args(
                "auth.invalid_email",
                &[("email", email.as_str())],
            )));
        }

        let taken = || {
            ApiError::BusinessRuleViolation(t_with_args(
                "auth.email_taken",
                &[("email", email.as_str())],
            ))
        };
        if self.users.find_by_email(&email)?.is_some() {
            return Err(taken());
        }

        let password_hash = hash_password(password);
        let id = match self.users.create(nombre, &email, &password_hash) {
            Ok(id) => id,
            // 并发注册同一邮箱时由 UNIQUE 约束兜底
            Err(RepositoryError::UniqueConstraintViolation(_)) => return Err(taken()),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(id, email = %email, "用户已注册");

        Ok(User {
            id,
            nombre: nombre.to_string(),
            email,
            password_hash,
        })
    }

    /// 登录校验
    pub fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let email = email.trim().to_lowercase();
        let invalid = || ApiError::InvalidCredentials(t("auth.invalid_credentials"));

        let user = self.users.find_by_email(&email)?.ok_or_else(invalid)?;
        if !verify_password(password, &user.password_hash) {
            tracing::warn!(email = %email, "登录失败");
            return Err(invalid());
        }

        tracing::info!(id = user.id, "登录成功");
        Ok(user)
    }

    pub fn get_user(&self, id: i64) -> ApiResult<User> {
        self.users.find_by_id(id)?.ok_or_else(|| {
            ApiError::NotFound(format!("usuario(id={})", id))
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
