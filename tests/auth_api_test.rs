// ==========================================
// AuthApi 集成测试
// ==========================================

mod test_helpers;

use inventario::api::ApiError;
use test_helpers::create_test_env;

#[test]
fn test_register_login_roundtrip() {
    let env = create_test_env();
    let auth = &env.state.auth_api;

    let user = auth.register("Luis", "luis@example.com", "clave").unwrap();
    let logged = auth.login("luis@example.com", "clave").unwrap();
    assert_eq!(logged.id, user.id);
    assert_eq!(auth.get_user(user.id).unwrap().email, "luis@example.com");
}

#[test]
fn test_password_not_stored_in_clear() {
    let env = create_test_env();
    env.state
        .auth_api
        .register("Luis", "luis@example.com", "clave")
        .unwrap();

    let conn = env.state.conn.lock().unwrap();
    let stored: String = conn
        .query_row(
            "SELECT password_hash FROM usuarios WHERE email = ?1",
            ["luis@example.com"],
            |row| row.get(0),
        )
        .unwrap();
    assert!(!stored.contains("clave"));
    assert!(stored.starts_with("sha256$"));
}

#[test]
fn test_user_json_omits_hash() {
    let env = create_test_env();
    let user = env
        .state
        .auth_api
        .register("Luis", "luis@example.com", "clave")
        .unwrap();
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none());
}

#[test]
fn test_wrong_password_rejected() {
    let env = create_test_env();
    env.state
        .auth_api
        .register("Luis", "luis@example.com", "clave")
        .unwrap();
    assert!(matches!(
        env.state.auth_api.login("luis@example.com", "otra"),
        Err(ApiError::InvalidCredentials(_))
    ));
    assert!(matches!(
        env.state.auth_api.get_user(9999),
        Err(ApiError::NotFound(_))
    ));
}
