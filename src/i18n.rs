// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持西班牙语（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"es" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use inventario::i18n::t;
/// let msg = t("common.empty_file");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use inventario::i18n::t_with_args;
/// let msg = t_with_args("import.done", &[("format", "CSV"), ("count", "3")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

// rust-i18n 的 locale 为进程级全局状态，而测试默认并行执行；
// 凡断言译文的单元测试都经由此锁串行化。
#[cfg(test)]
static LOCALE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// 持锁并切换语言；守卫存活期间语言不会被其他测试改动
#[cfg(test)]
pub(crate) fn lock_locale(locale: &str) -> std::sync::MutexGuard<'static, ()> {
    let guard = LOCALE_TEST_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    set_locale(locale);
    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_locale() {
        let _guard = lock_locale("en");
        assert_eq!(current_locale(), "en");

        set_locale("es");
        assert_eq!(current_locale(), "es");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = lock_locale("es");
        assert_eq!(t("common.empty_file"), "(archivo vacío)");

        set_locale("en");
        assert_eq!(t("common.empty_file"), "(empty file)");

        set_locale("es");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = lock_locale("es");
        let msg = t_with_args("import.done", &[("format", "TXT"), ("count", "4")]);
        assert_eq!(msg, "Importado TXT: 4");

        set_locale("en");
        let msg = t_with_args("import.done", &[("format", "TXT"), ("count", "4")]);
        assert_eq!(msg, "Imported TXT: 4");

        set_locale("es");
    }
}
