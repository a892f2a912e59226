// ==========================================
// 库存管理系统 - 口令摘要
// ==========================================
// 存储格式: sha256$<盐 hex>$<摘要 hex>
// 摘要: SHA-256(盐 || 口令)，盐为 16 字节随机数
// ==========================================

use sha2::{Digest, Sha256};

const SCHEME: &str = "sha256";
const SALT_LEN: usize = 16;

fn digest(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// 生成加盐摘要
pub fn hash_password(password: &str) -> String {
    let salt: [u8; SALT_LEN] = rand::random();
    format!("{}${}${}", SCHEME, hex::encode(salt), digest(&salt, password))
}

/// 校验口令
///
/// 存储值格式不合法时返回 false
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (scheme, salt_hex, expected) = match (parts.next(), parts.next(), parts.next()) {
        (Some(s), Some(salt), Some(hash)) => (s, salt, hash),
        _ => return false,
    };
    if scheme != SCHEME {
        return false;
    }
    match hex::decode(salt_hex) {
        Ok(salt) => constant_time_eq(digest(&salt, password).as_bytes(), expected.as_bytes()),
        Err(_) => false,
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let stored = hash_password("secreto123");
        assert!(stored.starts_with("sha256$"));
        assert!(verify_password("secreto123", &stored));
        assert!(!verify_password("secreto124", &stored));
    }

    #[test]
    fn test_salt_differs_per_hash() {
        assert_ne!(hash_password("igual"), hash_password("igual"));
    }

    #[test]
    fn test_malformed_stored_value() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "md5$00$00"));
        assert!(!verify_password("x", "sha256$zz$00"));
    }
}
