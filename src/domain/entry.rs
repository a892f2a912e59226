// ==========================================
// 库存管理系统 - 平面文件记录模型
// ==========================================
// 职责: 保存日志条目 / 解码后的导入记录 / 存储格式标签
// ==========================================

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 时间戳格式：ISO-8601，精确到秒
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ==========================================
// StoreFormat - 平面文件格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreFormat {
    /// 行分隔文本（datos.txt）
    Line,
    /// JSON 数组文档（datos.json）
    Document,
    /// 带表头 CSV（datos.csv）
    Tabular,
}

impl StoreFormat {
    /// import-all 的固定执行顺序
    pub const IMPORT_ORDER: [StoreFormat; 3] =
        [StoreFormat::Line, StoreFormat::Document, StoreFormat::Tabular];

    /// 展示标签
    pub fn label(&self) -> &'static str {
        match self {
            StoreFormat::Line => "TXT",
            StoreFormat::Document => "JSON",
            StoreFormat::Tabular => "CSV",
        }
    }

    /// 数据目录下的文件名
    pub fn file_name(&self) -> &'static str {
        match self {
            StoreFormat::Line => "datos.txt",
            StoreFormat::Document => "datos.json",
            StoreFormat::Tabular => "datos.csv",
        }
    }

    /// 保存请求缺省商品名
    pub fn default_product_name(&self) -> &'static str {
        match self {
            StoreFormat::Line => "Producto TXT",
            StoreFormat::Document => "Producto JSON",
            StoreFormat::Tabular => "Producto CSV",
        }
    }
}

impl fmt::Display for StoreFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StoreFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "txt" | "line" => Ok(StoreFormat::Line),
            "json" | "document" => Ok(StoreFormat::Document),
            "csv" | "tabular" => Ok(StoreFormat::Tabular),
            other => Err(format!("未知格式: {}", other)),
        }
    }
}

// ==========================================
// LogEntry - 保存日志条目
// ==========================================
// 用途: 每次保存动作追加一条，文件层永不合并/删除
// JSON 键沿用 fecha/nombre/cantidad/precio，读取时兼容英文键
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "fecha", alias = "timestamp")]
    pub timestamp: String,
    #[serde(rename = "nombre", alias = "name")]
    pub name: String,
    #[serde(rename = "cantidad", alias = "quantity")]
    pub quantity: i64,
    #[serde(rename = "precio", alias = "price")]
    pub unit_price: f64,
}

impl LogEntry {
    /// 以当前本地时间创建条目
    pub fn now(name: impl Into<String>, quantity: i64, unit_price: f64) -> Self {
        Self::at(Local::now().naive_local(), name, quantity, unit_price)
    }

    /// 以指定时间创建条目
    pub fn at(ts: NaiveDateTime, name: impl Into<String>, quantity: i64, unit_price: f64) -> Self {
        Self {
            timestamp: ts.format(TIMESTAMP_FORMAT).to_string(),
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// 价格固定两位小数的文本形式（TXT/CSV 落盘口径）
    pub fn price_2dp(&self) -> String {
        format!("{:.2}", self.unit_price)
    }
}

// ==========================================
// ParsedRecord - 解码后的导入记录
// ==========================================
// 三种格式的解码器统一产出此结构，Upsert 与格式无关
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub format: StoreFormat,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_parse() {
        assert_eq!("TXT".parse::<StoreFormat>().unwrap(), StoreFormat::Line);
        assert_eq!(" json ".parse::<StoreFormat>().unwrap(), StoreFormat::Document);
        assert_eq!("csv".parse::<StoreFormat>().unwrap(), StoreFormat::Tabular);
        assert!("xlsx".parse::<StoreFormat>().is_err());
    }

    #[test]
    fn test_entry_timestamp_second_precision() {
        let ts = NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_milli_opt(9, 5, 3, 450)
            .unwrap();
        let entry = LogEntry::at(ts, "Widget", 2, 9.99);
        assert_eq!(entry.timestamp, "2025-03-07T09:05:03");
        assert_eq!(entry.price_2dp(), "9.99");
    }

    #[test]
    fn test_entry_json_keys() {
        let ts = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let value = serde_json::to_value(LogEntry::at(ts, "Goma", 3, 0.5)).unwrap();
        assert_eq!(value["nombre"], "Goma");
        assert_eq!(value["cantidad"], 3);
        assert_eq!(value["precio"], 0.5);
        assert_eq!(value["fecha"], "2025-01-01T00:00:00");
    }

    #[test]
    fn test_entry_accepts_english_keys() {
        let entry: LogEntry = serde_json::from_str(
            r#"{"timestamp":"2025-01-01T00:00:00","name":"Tijeras","quantity":1,"price":2.5}"#,
        )
        .unwrap();
        assert_eq!(entry.name, "Tijeras");
        assert_eq!(entry.quantity, 1);
    }
}
