// ==========================================
// 库存管理系统 - 数值宽松转换
// ==========================================
// 职责: 将无类型输入尽力转换为整数/小数，失败时返回调用方给定的默认值
// 约束: 无副作用，永不向外报错
// ==========================================

use serde_json::Value;

/// 文本 -> 整数
///
/// - TRIM 后按整数解析
/// - None / 解析失败: 返回 default
pub fn coerce_int(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

/// 文本 -> 小数
///
/// - 小数逗号归一为小数点（"3,14" -> 3.14）
/// - None / 解析失败 / 非有限值: 返回 default
pub fn coerce_decimal(value: Option<&str>, default: f64) -> f64 {
    value
        .and_then(|v| v.trim().replace(',', ".").parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// JSON 值 -> 整数
///
/// - 整数原样返回；浮点向零截断
/// - 字符串走文本规则
/// - 布尔: true=1, false=0
/// - null / 数组 / 对象 / 缺失: 返回 default
pub fn coerce_int_value(value: Option<&Value>, default: i64) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            })
            .unwrap_or(default),
        Some(Value::String(s)) => coerce_int(Some(s.as_str()), default),
        Some(Value::Bool(b)) => i64::from(*b),
        _ => default,
    }
}

/// JSON 值 -> 小数
///
/// - 数值原样返回
/// - 字符串走文本规则
/// - 其余（含布尔、null）: 返回 default
pub fn coerce_decimal_value(value: Option<&Value>, default: f64) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(default),
        Some(Value::String(s)) => coerce_decimal(Some(s.as_str()), default),
        _ => default,
    }
}
