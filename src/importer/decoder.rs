// ==========================================
// 库存管理系统 - 格式解码器
// ==========================================
// 职责: 三种平面文件格式 -> 统一的 ParsedRecord 序列
// 约束: 单条格式错误只跳过并计数，不中断整批
// ==========================================

use crate::domain::{ParsedRecord, StoreFormat};
use crate::importer::coercion::{coerce_decimal, coerce_decimal_value, coerce_int, coerce_int_value};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{DecodeOutput, RecordDecoder};
use crate::store::line_store::FIELD_SEPARATOR;
use crate::store::tabular_store::{parse_rows, TabularRow};
use serde_json::{Map, Value};

// 字段名：西班牙语键优先，兼容英文键
const NAME_KEYS: [&str; 2] = ["nombre", "name"];
const QUANTITY_KEYS: [&str; 2] = ["cantidad", "quantity"];
const PRICE_KEYS: [&str; 2] = ["precio", "price"];

/// 按格式取解码器
pub fn decoder_for(format: StoreFormat) -> Box<dyn RecordDecoder> {
    match format {
        StoreFormat::Line => Box::new(LineDecoder),
        StoreFormat::Document => Box::new(DocumentDecoder),
        StoreFormat::Tabular => Box::new(TabularDecoder),
    }
}

// ==========================================
// LineDecoder - TXT
// ==========================================
// 每行按 '|' 切分并 TRIM；字段数不等于 4 的行跳过
pub struct LineDecoder;

impl RecordDecoder for LineDecoder {
    fn format(&self) -> StoreFormat {
        StoreFormat::Line
    }

    fn decode(&self, bytes: &[u8]) -> ImportResult<DecodeOutput> {
        let text = String::from_utf8_lossy(bytes);
        let mut output = DecodeOutput::default();

        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let parts: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
            if parts.len() != 4 {
                output.skipped += 1;
                continue;
            }
            output.records.push(ParsedRecord {
                format: StoreFormat::Line,
                name: parts[1].to_string(),
                quantity: coerce_int(Some(parts[2]), 0),
                unit_price: coerce_decimal(Some(parts[3]), 0.0),
            });
        }
        Ok(output)
    }
}

// ==========================================
// DocumentDecoder - JSON
// ==========================================
// 根必须是数组；非数组根产出 0 条记录
// 非对象元素跳过；缺失名称视为空串，缺失数值按 0 处理
pub struct DocumentDecoder;

fn first_field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k))
}

impl RecordDecoder for DocumentDecoder {
    fn format(&self) -> StoreFormat {
        StoreFormat::Document
    }

    fn decode(&self, bytes: &[u8]) -> ImportResult<DecodeOutput> {
        let root: Value = serde_json::from_slice(bytes)
            .map_err(|e| ImportError::InvalidDocument(e.to_string()))?;

        let mut output = DecodeOutput::default();
        let items = match root {
            Value::Array(items) => items,
            _ => {
                tracing::warn!("JSON 根不是数组，无可导入记录");
                return Ok(output);
            }
        };

        for item in items {
            let obj = match item {
                Value::Object(obj) => obj,
                _ => {
                    output.skipped += 1;
                    continue;
                }
            };

            let name = match first_field(&obj, &NAME_KEYS) {
                Some(Value::String(s)) => s.trim().to_string(),
                _ => String::new(),
            };
            output.records.push(ParsedRecord {
                format: StoreFormat::Document,
                name,
                quantity: coerce_int_value(first_field(&obj, &QUANTITY_KEYS), 0),
                unit_price: coerce_decimal_value(first_field(&obj, &PRICE_KEYS), 0.0),
            });
        }
        Ok(output)
    }
}

// ==========================================
// TabularDecoder - CSV
// ==========================================
// 按表头取列；缺失列按空值/0 处理；无法解析的行跳过
pub struct TabularDecoder;

fn row_field<'a>(row: &'a TabularRow, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| row.get(*k)).map(String::as_str)
}

impl RecordDecoder for TabularDecoder {
    fn format(&self) -> StoreFormat {
        StoreFormat::Tabular
    }

    fn decode(&self, bytes: &[u8]) -> ImportResult<DecodeOutput> {
        let parsed = parse_rows(bytes);
        let records = parsed
            .rows
            .iter()
            .map(|row| ParsedRecord {
                format: StoreFormat::Tabular,
                name: row_field(row, &NAME_KEYS).unwrap_or("").trim().to_string(),
                quantity: coerce_int(row_field(row, &QUANTITY_KEYS), 0),
                unit_price: coerce_decimal(row_field(row, &PRICE_KEYS), 0.0),
            })
            .collect();

        Ok(DecodeOutput {
            records,
            skipped: parsed.skipped,
        })
    }
}
